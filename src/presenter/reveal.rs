//! Scroll-triggered reveals.
//!
//! Each [`RevealSpec`] names a class of elements, their hidden and shown
//! property values and a trigger band. Every frame the band of each member
//! is recomputed from its layout rect and band changes are mapped to
//! [`ToggleActions`].

use indextree::NodeId;

use super::Viewport;
use crate::motion::{Ease, Props, TweenOptions, Tweener};
use crate::stage::{Prop, Rect, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play,
    Reverse,
    Reset,
    Complete,
    None,
}

/// What happens on enter, leave, enter-back and leave-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub enter: Action,
    pub leave: Action,
    pub enter_back: Action,
    pub leave_back: Action,
}

impl ToggleActions {
    pub const PLAY_REVERSE: ToggleActions = ToggleActions {
        enter: Action::Play,
        leave: Action::None,
        enter_back: Action::None,
        leave_back: Action::Reverse,
    };

    pub const PLAY_ONCE: ToggleActions = ToggleActions {
        enter: Action::Play,
        leave: Action::None,
        enter_back: Action::None,
        leave_back: Action::None,
    };

}

impl Default for ToggleActions {
    fn default() -> Self {
        Self::PLAY_REVERSE
    }
}

/// Position of an element relative to its trigger band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Before,
    Active,
    After,
}

/// `start` applies to the element top, `end` to its bottom, both as
/// fractions of the viewport height.
pub fn band(rect: Rect, viewport: &Viewport, start: f64, end: f64) -> Band {
    let top = rect.top - viewport.scroll_y;
    let bottom = rect.bottom() - viewport.scroll_y;
    if top > start * viewport.height {
        Band::Before
    } else if bottom <= end * viewport.height {
        Band::After
    } else {
        Band::Active
    }
}

fn transition(from: Band, to: Band, actions: &ToggleActions) -> [Action; 2] {
    use Band::*;
    match (from, to) {
        (Before, Active) => [actions.enter, Action::None],
        (Active, After) => [actions.leave, Action::None],
        (After, Active) => [actions.enter_back, Action::None],
        (Active, Before) => [actions.leave_back, Action::None],
        (Before, After) => [actions.enter, actions.leave],
        (After, Before) => [actions.enter_back, actions.leave_back],
        _ => [Action::None, Action::None],
    }
}

#[derive(Debug, Clone)]
pub struct RevealSpec {
    pub class: &'static str,
    pub from: Props,
    pub to: Props,
    pub start: f64,
    pub end: f64,
    pub actions: ToggleActions,
    pub duration: f64,
    pub ease: Ease,
    pub stagger: f64,
    /// Read the target width (percent) of each member from this attribute.
    pub width_attr: Option<&'static str>,
}

impl RevealSpec {
    pub fn new(class: &'static str, from: Props, to: Props) -> Self {
        Self {
            class,
            from,
            to,
            start: 0.8,
            end: 0.0,
            actions: ToggleActions::default(),
            duration: 1000.0,
            ease: Ease::Power3Out,
            stagger: 0.0,
            width_attr: None,
        }
    }

    pub fn start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn actions(mut self, actions: ToggleActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn width_attr(mut self, attr: &'static str) -> Self {
        self.width_attr = Some(attr);
        self
    }

    fn target_for(&self, stage: &Stage, node: NodeId) -> Props {
        let level = self
            .width_attr
            .and_then(|attr| stage.attr(node, attr))
            .and_then(|v| v.trim().trim_end_matches('%').parse::<f64>().ok());
        match level {
            Some(level) => self.to.clone().with(Prop::Width, level.clamp(0.0, 100.0)),
            None => self.to.clone(),
        }
    }
}

fn hidden() -> Props {
    Props::new().opacity(0.0)
}

/// The reveals every page section registers after the loader hands off.
pub fn default_specs() -> Vec<RevealSpec> {
    vec![
        RevealSpec::new(
            "section-title",
            hidden().clip_right(100.0),
            Props::new().opacity(1.0).clip_right(0.0),
        ),
        RevealSpec::new("about-image", hidden().x(-50.0), Props::new().opacity(1.0).x(0.0)),
        RevealSpec::new("about-text", hidden().x(50.0), Props::new().opacity(1.0).x(0.0)),
        RevealSpec::new("timeline-item", hidden().x(-50.0), Props::new().opacity(1.0).x(0.0))
            .start(0.85)
            .duration(800.0),
        RevealSpec::new("education-card", hidden().y(50.0), Props::new().opacity(1.0).y(0.0))
            .duration(800.0)
            .stagger(200.0),
        RevealSpec::new(
            "skill-card",
            hidden().y(60.0).scale(0.9),
            Props::new().opacity(1.0).y(0.0).scale(1.0),
        )
        .duration(800.0)
        .stagger(100.0),
        RevealSpec::new("skill-progress", Props::new().width(0.0), Props::new().width(100.0))
            .start(0.9)
            .actions(ToggleActions::PLAY_ONCE)
            .duration(1500.0)
            .ease(Ease::Power2Out)
            .width_attr("data-level"),
        RevealSpec::new("project-card", hidden().y(50.0), Props::new().opacity(1.0).y(0.0))
            .duration(800.0)
            .stagger(100.0),
        RevealSpec::new(
            "contact-card",
            hidden().scale(0.9),
            Props::new().opacity(1.0).scale(1.0),
        )
        .duration(800.0)
        .ease(Ease::BACK),
        RevealSpec::new("footer", hidden().y(20.0), Props::new().opacity(1.0).y(0.0))
            .start(1.0)
            .duration(800.0),
    ]
}

#[derive(Debug, Clone)]
struct Member {
    node: NodeId,
    to: Props,
    band: Band,
    revealed: bool,
}

#[derive(Debug, Clone)]
struct Descriptor {
    spec: RevealSpec,
    members: Vec<Member>,
}

impl Descriptor {
    fn update(&mut self, stage: &mut Stage, tweens: &mut Tweener, viewport: &Viewport, now: f64) {
        let opts = TweenOptions::new(self.spec.duration, self.spec.ease);
        let mut batch = 0;
        for member in self.members.iter_mut() {
            let Some(rect) = stage.rect(member.node) else {
                continue;
            };
            let next = band(rect, viewport, self.spec.start, self.spec.end);
            if next == member.band {
                continue;
            }
            let actions = transition(member.band, next, &self.spec.actions);
            member.band = next;
            let delay = batch as f64 * self.spec.stagger;
            let mut animated = false;
            for action in actions {
                match action {
                    Action::Play if !member.revealed => {
                        tweens.to(member.node, member.to.clone(), opts.delay(delay), now);
                        member.revealed = true;
                        animated = true;
                    }
                    Action::Reverse if member.revealed => {
                        tweens.to(member.node, self.spec.from.clone(), opts.delay(delay), now);
                        member.revealed = false;
                        animated = true;
                    }
                    Action::Reset => {
                        tweens.set(stage, member.node, &self.spec.from);
                        member.revealed = false;
                    }
                    Action::Complete => {
                        tweens.set(stage, member.node, &member.to);
                        member.revealed = true;
                    }
                    _ => {}
                }
            }
            if animated {
                batch += 1;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RevealEngine {
    descriptors: Vec<Descriptor>,
}

impl RevealEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every element carrying `spec.class`; returns how many were found.
    ///
    /// Members already inside the viewport are written in their shown state
    /// straight away; the rest are hidden until their band is entered.
    pub fn register(
        &mut self,
        spec: RevealSpec,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        now: f64,
    ) -> usize {
        let nodes = stage.by_class(spec.class);
        if nodes.is_empty() {
            log::debug!("no .{} elements to reveal", spec.class);
            return 0;
        }
        let mut members = Vec::with_capacity(nodes.len());
        for node in nodes {
            let to = spec.target_for(stage, node);
            let rect = stage.rect(node).unwrap_or_default();
            let top = rect.top - viewport.scroll_y;
            let bottom = rect.bottom() - viewport.scroll_y;
            if top < viewport.height && bottom > 0.0 {
                tweens.set(stage, node, &to);
                members.push(Member {
                    node,
                    to,
                    band: band(rect, viewport, spec.start, spec.end),
                    revealed: true,
                });
            } else {
                tweens.set(stage, node, &spec.from);
                members.push(Member {
                    node,
                    to,
                    band: Band::Before,
                    revealed: false,
                });
            }
        }
        let count = members.len();
        let mut descriptor = Descriptor { spec, members };
        descriptor.update(stage, tweens, viewport, now);
        self.descriptors.push(descriptor);
        count
    }

    pub fn on_scroll_frame(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        now: f64,
    ) {
        for descriptor in self.descriptors.iter_mut() {
            descriptor.update(stage, tweens, viewport, now);
        }
    }

    pub fn is_revealed(&self, node: NodeId) -> Option<bool> {
        self.descriptors
            .iter()
            .flat_map(|d| d.members.iter())
            .find(|m| m.node == node)
            .map(|m| m.revealed)
    }

    pub fn len(&self) -> usize {
        self.descriptors.iter().map(|d| d.members.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageNode;

    const VIEW: Viewport = Viewport {
        scroll_y: 0.0,
        width: 1280.0,
        height: 800.0,
    };

    fn at(scroll_y: f64) -> Viewport {
        Viewport { scroll_y, ..VIEW }
    }

    fn card_stage(tops: &[f64]) -> (Stage, Vec<NodeId>) {
        let mut stage = Stage::new();
        let root = stage.root();
        let ids = tops
            .iter()
            .map(|top| {
                stage.insert(
                    root,
                    StageNode::new()
                        .with_class("card")
                        .with_rect(Rect::new(*top, 0.0, 300.0, 50.0)),
                )
            })
            .collect();
        (stage, ids)
    }

    fn fade_in() -> RevealSpec {
        RevealSpec::new("card", Props::new().opacity(0.0).y(50.0), Props::new().opacity(1.0).y(0.0))
    }

    #[test]
    fn test_above_the_fold_is_revealed_immediately() {
        let (mut stage, ids) = card_stage(&[100.0]);
        let mut tweens = Tweener::new();
        let mut engine = RevealEngine::new();
        assert_eq!(engine.register(fade_in(), &mut stage, &mut tweens, &VIEW, 0.0), 1);
        assert_eq!(engine.is_revealed(ids[0]), Some(true));
        assert_eq!(stage.get(ids[0], Prop::Opacity), Some(1.0));
        assert_eq!(tweens.active_count(), 0);
    }

    #[test]
    fn test_hidden_until_band_then_reversed() {
        let (mut stage, ids) = card_stage(&[2000.0]);
        let mut tweens = Tweener::new();
        let mut engine = RevealEngine::new();
        engine.register(fade_in(), &mut stage, &mut tweens, &VIEW, 0.0);
        assert_eq!(stage.get(ids[0], Prop::Opacity), Some(0.0));

        // still below 80% of the viewport
        engine.on_scroll_frame(&mut stage, &mut tweens, &at(1300.0), 100.0);
        tweens.tick(&mut stage, 100.0);
        assert_eq!(engine.is_revealed(ids[0]), Some(false));
        assert_eq!(stage.get(ids[0], Prop::Opacity), Some(0.0));

        engine.on_scroll_frame(&mut stage, &mut tweens, &at(1500.0), 200.0);
        assert_eq!(engine.is_revealed(ids[0]), Some(true));
        tweens.tick(&mut stage, 200.0);
        tweens.tick(&mut stage, 1200.0);
        assert_eq!(stage.get(ids[0], Prop::Opacity), Some(1.0));
        assert_eq!(stage.get(ids[0], Prop::Y), Some(0.0));

        engine.on_scroll_frame(&mut stage, &mut tweens, &at(0.0), 1300.0);
        assert_eq!(engine.is_revealed(ids[0]), Some(false));
        tweens.tick(&mut stage, 1300.0);
        tweens.tick(&mut stage, 2300.0);
        assert_eq!(stage.get(ids[0], Prop::Opacity), Some(0.0));

        // and it can play again
        engine.on_scroll_frame(&mut stage, &mut tweens, &at(1500.0), 2400.0);
        assert_eq!(engine.is_revealed(ids[0]), Some(true));
    }

    #[test]
    fn test_batch_is_staggered() {
        let (mut stage, ids) = card_stage(&[2000.0, 2100.0, 2200.0]);
        let mut tweens = Tweener::new();
        let mut engine = RevealEngine::new();
        engine.register(
            fade_in().ease(Ease::Linear).stagger(100.0),
            &mut stage,
            &mut tweens,
            &VIEW,
            0.0,
        );
        engine.on_scroll_frame(&mut stage, &mut tweens, &at(1800.0), 1000.0);
        tweens.tick(&mut stage, 1000.0);
        tweens.tick(&mut stage, 1150.0);
        let opacity = |i: usize| stage.get(ids[i], Prop::Opacity).unwrap();
        assert!((opacity(0) - 0.15).abs() < 1e-9);
        assert!((opacity(1) - 0.05).abs() < 1e-9);
        assert_eq!(opacity(2), 0.0);
    }

    #[test]
    fn test_skill_bar_width_from_level_plays_once() {
        let mut stage = Stage::new();
        let root = stage.root();
        let bar = stage.insert(
            root,
            StageNode::new()
                .with_class("skill-progress")
                .with_attr("data-level", "85")
                .with_rect(Rect::new(3000.0, 0.0, 200.0, 8.0)),
        );
        let spec = default_specs()
            .into_iter()
            .find(|s| s.class == "skill-progress")
            .unwrap();
        let mut tweens = Tweener::new();
        let mut engine = RevealEngine::new();
        engine.register(spec, &mut stage, &mut tweens, &VIEW, 0.0);
        assert_eq!(stage.get(bar, Prop::Width), Some(0.0));

        engine.on_scroll_frame(&mut stage, &mut tweens, &at(2500.0), 10.0);
        tweens.tick(&mut stage, 10.0);
        tweens.tick(&mut stage, 2000.0);
        assert_eq!(stage.get(bar, Prop::Width), Some(85.0));

        engine.on_scroll_frame(&mut stage, &mut tweens, &at(0.0), 2100.0);
        tweens.tick(&mut stage, 5000.0);
        assert_eq!(stage.get(bar, Prop::Width), Some(85.0));
    }

    #[test]
    fn test_empty_selector_is_a_no_op() {
        let mut stage = Stage::new();
        let mut tweens = Tweener::new();
        let mut engine = RevealEngine::new();
        assert_eq!(engine.register(fade_in(), &mut stage, &mut tweens, &VIEW, 0.0), 0);
        assert!(engine.is_empty());
    }

}
