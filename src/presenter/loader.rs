use indextree::NodeId;

use crate::config::MotionConfig;
use crate::motion::{Ease, Position, Props, Step, Timeline, TimelineEvent, TweenOptions, Tweener};
use crate::stage::Stage;

pub const LOADER_ID: &str = "loader";
pub const PERCENT_ID: &str = "progress-percent";

const LETTERS_IN: &str = "letters-in";
const PROGRESS: &str = "progress";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoaderState {
    Idle,
    Running,
    /// Loader gone, waiting to release the content gate.
    Exiting { release_at: f64 },
    Done,
}

/// Emitted exactly once, when the page content is handed over to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    Completed,
    /// The watchdog forced it.
    Forced,
}

/// Splash screen sequence, the content gate and the hero entrance.
#[derive(Debug)]
pub struct Loader {
    state: LoaderState,
    timeline: Timeline,
    hero: Option<Timeline>,
    started_at: f64,
    loader: Option<NodeId>,
    gated: Vec<NodeId>,
    fills: Vec<NodeId>,
    readout: u32,
    handed_off: bool,
    handoff_delay: f64,
    grace: f64,
}

impl Loader {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            state: LoaderState::Idle,
            timeline: Timeline::new(),
            hero: None,
            started_at: 0.0,
            loader: None,
            gated: Vec::new(),
            fills: Vec::new(),
            readout: 0,
            handed_off: false,
            handoff_delay: config.handoff_delay_ms,
            grace: config.loader_grace_ms,
        }
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn readout(&self) -> u32 {
        self.readout
    }

    pub fn is_handed_off(&self) -> bool {
        self.handed_off
    }

    /// Expected length of the splash sequence.
    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    /// Hides the content and starts the splash sequence. Without a loader
    /// element in the stage the content is handed over at once.
    pub fn start(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) -> Option<Handoff> {
        if self.state != LoaderState::Idle {
            return None;
        }
        self.started_at = now;
        let Some(loader) = stage.by_id(LOADER_ID) else {
            log::info!("no loader element, showing content");
            self.state = LoaderState::Done;
            self.handed_off = true;
            return Some(Handoff::Completed);
        };
        self.loader = Some(loader);

        self.gated = stage
            .children(stage.root())
            .into_iter()
            .filter(|id| *id != loader)
            .collect();
        let gate = Props::new().opacity(0.0).y(20.0);
        for node in &self.gated {
            tweens.set(stage, *node, &gate);
        }

        let find = |class: &str| stage.by_class_within(loader, class);
        let grid = find("grid-pattern");
        let shapes = find("geometric-shapes");
        let letters = find("logo-letter");
        let indicator = find("loading-animation");
        let progress = find("progress-container");
        let fill = find("progress-fill");
        self.fills = find("logo-letter-fill");

        let fade_in = |label, targets, duration| {
            Step::from_to(
                label,
                targets,
                Props::new().opacity(0.0),
                Props::new().opacity(1.0),
                duration,
                Ease::Power3Out,
            )
        };
        let mut exit = indicator.clone();
        exit.extend(progress.iter().copied());

        self.timeline = Timeline::new()
            .with(fade_in("grid-in", grid.clone(), 1000.0))
            .with(fade_in("shapes-in", shapes.clone(), 800.0).at(Position::Offset(-500.0)))
            .with(
                Step::from_to(
                    LETTERS_IN,
                    letters.clone(),
                    Props::new().opacity(0.0).y(100.0).scale(0.5),
                    Props::new().opacity(1.0).y(0.0).scale(1.0),
                    800.0,
                    Ease::Power3Out,
                )
                .stagger(50.0)
                .at(Position::Offset(-300.0)),
            )
            .with(fade_in("indicator-in", indicator, 600.0).at(Position::Offset(-200.0)))
            .with(fade_in("progress-in", progress, 600.0).at(Position::Offset(-200.0)))
            .with(Step::from_to(
                PROGRESS,
                fill,
                Props::new().width(0.0),
                Props::new().width(100.0),
                3000.0,
                Ease::Power2InOut,
            ))
            .with(
                Step::to(
                    "letters-out",
                    letters,
                    Props::new().y(-50.0).opacity(0.0).scale(1.1),
                    600.0,
                    Ease::Power3In,
                )
                .stagger(30.0)
                .at(Position::Offset(500.0)),
            )
            .with(
                Step::to(
                    "indicator-out",
                    exit,
                    Props::new().y(30.0).opacity(0.0),
                    500.0,
                    Ease::Power3In,
                )
                .at(Position::Offset(-400.0)),
            )
            .with(
                Step::to(
                    "shapes-out",
                    shapes,
                    Props::new().scale(1.2).opacity(0.0),
                    600.0,
                    Ease::Power3In,
                )
                .at(Position::Offset(-300.0)),
            )
            .with(
                Step::to("grid-out", grid, Props::new().opacity(0.0), 400.0, Ease::Power3In)
                    .at(Position::Offset(-200.0)),
            )
            .with(Step::to(
                "loader-out",
                vec![loader],
                Props::new().opacity(0.0),
                600.0,
                Ease::Power3InOut,
            ));

        let unswept = Props::new().clip_bottom(100.0);
        for fill in &self.fills {
            tweens.set(stage, *fill, &unswept);
        }
        self.set_readout(stage, 0);
        self.timeline.play(stage, now);
        self.state = LoaderState::Running;
        log::debug!("loader started, {:.0} ms", self.timeline.duration());
        None
    }

    fn set_readout(&mut self, stage: &mut Stage, value: u32) {
        self.readout = value;
        if let Some(node) = stage.by_id(PERCENT_ID) {
            stage.set_text(node, &format!("{value}%"), false);
        }
    }

    pub fn tick(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) -> Option<Handoff> {
        if let Some(hero) = self.hero.as_mut() {
            hero.tick(stage, now);
        }
        match self.state {
            LoaderState::Running => {
                for event in self.timeline.tick(stage, now) {
                    self.on_event(event, stage, tweens, now);
                }
                None
            }
            LoaderState::Exiting { release_at } if now >= release_at => {
                self.release(stage, tweens, now);
                self.play_hero(stage, now);
                self.state = LoaderState::Done;
                self.handed_off = true;
                Some(Handoff::Completed)
            }
            _ => None,
        }
    }

    fn on_event(&mut self, event: TimelineEvent, stage: &mut Stage, tweens: &mut Tweener, now: f64) {
        match event {
            TimelineEvent::Completed(LETTERS_IN) => {
                for (i, fill) in self.fills.iter().enumerate() {
                    tweens.to(
                        *fill,
                        Props::new().clip_bottom(0.0),
                        TweenOptions::new(800.0, Ease::Power3Out).delay(i as f64 * 50.0),
                        now,
                    );
                }
            }
            TimelineEvent::Progress(PROGRESS, fraction) => {
                let value = (fraction * 100.0).round() as u32;
                if value > self.readout {
                    self.set_readout(stage, value.min(100));
                }
            }
            TimelineEvent::Finished => {
                self.detach(stage);
                self.state = LoaderState::Exiting {
                    release_at: now + self.handoff_delay,
                };
            }
            _ => {}
        }
    }

    fn detach(&mut self, stage: &mut Stage) {
        if let Some(loader) = self.loader {
            stage.detach(loader);
        }
    }

    /// Fades the gated content back in.
    fn release(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) {
        let shown = Props::new().opacity(1.0).y(0.0);
        let opts = TweenOptions::new(1200.0, Ease::Power3Out);
        for (i, node) in self.gated.iter().enumerate() {
            if stage.is_attached(*node) {
                tweens.to(*node, shown.clone(), opts.delay(i as f64 * 30.0), now);
            }
        }
    }

    fn play_hero(&mut self, stage: &mut Stage, now: f64) {
        let text = stage
            .by_id("hero-text")
            .map(|id| stage.children(id))
            .unwrap_or_default();
        let image: Vec<NodeId> = stage.by_id("hero-image-wrapper").into_iter().collect();
        let blob: Vec<NodeId> = stage.by_id("hero-blob").into_iter().collect();
        let mut hero = Timeline::new()
            .with(
                Step::from_to(
                    "hero-text",
                    text,
                    Props::new().opacity(0.0).y(50.0),
                    Props::new().opacity(1.0).y(0.0),
                    800.0,
                    Ease::Power3Out,
                )
                .stagger(100.0),
            )
            .with(
                Step::from_to(
                    "hero-image",
                    image,
                    Props::new().clip_right(100.0).scale(1.1).grayscale(100.0),
                    Props::new().clip_right(0.0).scale(1.0).grayscale(0.0),
                    1500.0,
                    Ease::ExpoOut,
                )
                .at(Position::Offset(-500.0)),
            )
            .with(
                Step::from_to(
                    "hero-blob",
                    blob,
                    Props::new().scale(0.0).opacity(0.0),
                    Props::new().scale(1.0).opacity(1.0),
                    1500.0,
                    Ease::Power2Out,
                )
                .at(Position::Offset(-1000.0)),
            );
        hero.play(stage, now);
        self.hero = Some(hero);
    }

    /// Forces the handoff when the sequence overran its expected length.
    pub fn watchdog(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) -> Option<Handoff> {
        if self.handed_off || self.state == LoaderState::Idle {
            return None;
        }
        if now - self.started_at < self.timeline.duration() + self.grace {
            return None;
        }
        log::warn!(
            "loader did not finish after {:.0} ms, revealing content",
            now - self.started_at
        );
        self.detach(stage);
        let shown = Props::new().opacity(1.0).y(0.0);
        for node in &self.gated {
            tweens.set(stage, *node, &shown);
        }
        self.handed_off = true;
        self.state = LoaderState::Done;
        Some(Handoff::Forced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Prop, StageNode};

    fn loader_stage() -> Stage {
        let mut stage = Stage::new();
        let root = stage.root();
        let loader = stage.insert(root, StageNode::new().with_id(LOADER_ID));
        stage.insert(loader, StageNode::new().with_class("grid-pattern"));
        stage.insert(loader, StageNode::new().with_class("geometric-shapes"));
        for _ in 0..4 {
            let letter = stage.insert(loader, StageNode::new().with_class("logo-letter"));
            stage.insert(letter, StageNode::new().with_class("logo-letter-fill"));
        }
        stage.insert(loader, StageNode::new().with_class("loading-animation"));
        let progress = stage.insert(loader, StageNode::new().with_class("progress-container"));
        stage.insert(progress, StageNode::new().with_class("progress-fill"));
        stage.insert(progress, StageNode::new().with_id(PERCENT_ID));

        stage.insert(root, StageNode::new().with_id("navbar"));
        let main = stage.insert(root, StageNode::new().with_id("main"));
        let hero = stage.insert(main, StageNode::new().with_id("hero-text"));
        stage.insert(hero, StageNode::new().with_id("hero-greeting"));
        stage.insert(main, StageNode::new().with_id("hero-image-wrapper"));
        stage.insert(main, StageNode::new().with_id("hero-blob"));
        stage
    }

    fn percent(stage: &Stage, node: NodeId) -> u32 {
        stage.text(node).unwrap().trim_end_matches('%').parse().unwrap()
    }

    #[test]
    fn test_timeline_shape() {
        let mut stage = loader_stage();
        let mut tweens = Tweener::new();
        let mut loader = Loader::new(&MotionConfig::default());
        assert_eq!(loader.start(&mut stage, &mut tweens, 0.0), None);
        assert_eq!(loader.timeline.start_of("shapes-in"), Some(500.0));
        // shapes end at 1300
        assert_eq!(loader.timeline.start_of(LETTERS_IN), Some(1000.0));
        assert_eq!(loader.timeline.start_of("indicator-in"), Some(1750.0));
        assert_eq!(loader.timeline.start_of("progress-in"), Some(2150.0));
        let progress = loader.timeline.start_of(PROGRESS).unwrap();
        assert_eq!(progress, 2750.0);
        assert_eq!(loader.timeline.start_of("letters-out"), Some(progress + 3500.0));
        assert!(loader.duration() > progress + 3000.0);
    }

    #[test]
    fn test_gate_hides_everything_but_the_loader() {
        let mut stage = loader_stage();
        let mut tweens = Tweener::new();
        let mut loader = Loader::new(&MotionConfig::default());
        loader.start(&mut stage, &mut tweens, 0.0);
        let main = stage.by_id("main").unwrap();
        let navbar = stage.by_id("navbar").unwrap();
        let splash = stage.by_id(LOADER_ID).unwrap();
        assert_eq!(stage.get(main, Prop::Opacity), Some(0.0));
        assert_eq!(stage.get(navbar, Prop::Y), Some(20.0));
        assert!(!stage.style(splash).unwrap().is_touched(Prop::Opacity));
        let readout = stage.by_id(PERCENT_ID).unwrap();
        assert_eq!(percent(&stage, readout), 0);
    }

    #[test]
    fn test_progress_readout_then_handoff() {
        let mut stage = loader_stage();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut loader = Loader::new(&config);
        loader.start(&mut stage, &mut tweens, 0.0);
        let readout = stage.by_id(PERCENT_ID).unwrap();

        let mut readouts = Vec::new();
        let mut handoffs = Vec::new();
        let mut detached_at = None;
        let mut grayscale_at_handoff = None;
        let image = stage.by_id("hero-image-wrapper").unwrap();
        let mut now = 0.0;
        while now < loader.duration() + 1000.0 {
            now += 16.0;
            if let Some(handoff) = loader.tick(&mut stage, &mut tweens, now) {
                handoffs.push((handoff, now));
                grayscale_at_handoff = stage.get(image, Prop::Grayscale);
            }
            tweens.tick(&mut stage, now);
            readouts.push(percent(&stage, readout));
            if detached_at.is_none() && stage.by_id(LOADER_ID).is_none() {
                detached_at = Some(now);
            }
        }

        assert!(readouts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(readouts.first(), Some(&0));
        assert_eq!(readouts.last(), Some(&100));
        assert_eq!(loader.readout(), 100);

        let detached_at = detached_at.unwrap();
        assert!(detached_at >= loader.duration());
        assert_eq!(handoffs.len(), 1);
        assert_eq!(handoffs[0].0, Handoff::Completed);
        assert!(handoffs[0].1 >= detached_at + config.handoff_delay_ms);
        assert_eq!(loader.state(), LoaderState::Done);

        // content was faded back in
        let end = now + 2000.0;
        loader.tick(&mut stage, &mut tweens, end);
        tweens.tick(&mut stage, end);
        let main = stage.by_id("main").unwrap();
        assert_eq!(stage.get(main, Prop::Opacity), Some(1.0));
        assert_eq!(stage.get(main, Prop::Y), Some(0.0));
        let greeting = stage.by_id("hero-greeting").unwrap();
        assert_eq!(stage.get(greeting, Prop::Opacity), Some(1.0));
        assert_eq!(stage.get(image, Prop::ClipRight), Some(0.0));
        assert_eq!(grayscale_at_handoff, Some(100.0));
        assert_eq!(stage.get(image, Prop::Grayscale), Some(0.0));

        // letter fills were swept
        for fill in &loader.fills {
            assert_eq!(stage.get(*fill, Prop::ClipBottom), Some(0.0));
        }
        // the watchdog has nothing left to do
        assert_eq!(loader.watchdog(&mut stage, &mut tweens, end + 60_000.0), None);
    }

    #[test]
    fn test_watchdog_forces_handoff() {
        let mut stage = loader_stage();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut loader = Loader::new(&config);
        loader.start(&mut stage, &mut tweens, 0.0);
        // frames never arrive
        let deadline = loader.duration() + config.loader_grace_ms;
        assert_eq!(loader.watchdog(&mut stage, &mut tweens, deadline - 1.0), None);
        assert_eq!(
            loader.watchdog(&mut stage, &mut tweens, deadline),
            Some(Handoff::Forced)
        );
        assert!(stage.by_id(LOADER_ID).is_none());
        let main = stage.by_id("main").unwrap();
        assert_eq!(stage.get(main, Prop::Opacity), Some(1.0));
        assert!(loader.is_handed_off());
        assert_eq!(loader.tick(&mut stage, &mut tweens, deadline + 16.0), None);
    }

    #[test]
    fn test_missing_loader_hands_off_immediately() {
        let mut stage = Stage::new();
        let mut tweens = Tweener::new();
        let mut loader = Loader::new(&MotionConfig::default());
        assert_eq!(
            loader.start(&mut stage, &mut tweens, 0.0),
            Some(Handoff::Completed)
        );
        assert_eq!(loader.start(&mut stage, &mut tweens, 1.0), None);
    }
}
