use indextree::NodeId;

use super::easing::{lerp, Ease};
use super::tween::Props;
use crate::stage::Stage;

/// Where a step starts, relative to the end of the timeline built so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Right after the previous steps end.
    Sequence,
    /// Shifted from the current end; negative values overlap.
    Offset(f64),
    /// Absolute time from the start of the timeline.
    At(f64),
}

#[derive(Debug, Clone)]
pub struct Step {
    label: &'static str,
    targets: Vec<NodeId>,
    from: Option<Props>,
    to: Props,
    duration: f64,
    ease: Ease,
    stagger: f64,
    position: Position,
}

impl Step {
    /// Animates `targets` from their values at the moment the step starts.
    pub fn to(
        label: &'static str,
        targets: Vec<NodeId>,
        to: Props,
        duration: f64,
        ease: Ease,
    ) -> Self {
        Self {
            label,
            targets,
            from: None,
            to,
            duration,
            ease,
            stagger: 0.0,
            position: Position::Sequence,
        }
    }

    /// `from` is written as soon as the timeline is played.
    pub fn from_to(
        label: &'static str,
        targets: Vec<NodeId>,
        from: Props,
        to: Props,
        duration: f64,
        ease: Ease,
    ) -> Self {
        Self {
            from: Some(from),
            ..Self::to(label, targets, to, duration, ease)
        }
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Duration plus the stagger spread across all targets.
    pub fn span(&self) -> f64 {
        let extra = self.targets.len().saturating_sub(1) as f64 * self.stagger;
        self.duration.max(0.0) + extra
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    Started(&'static str),
    /// Fraction of the step's span that has elapsed.
    Progress(&'static str, f64),
    Completed(&'static str),
    Finished,
}

#[derive(Debug, Clone)]
struct Scheduled {
    step: Step,
    start: f64,
    started: bool,
    completed: bool,
    captured: Vec<Option<Props>>,
    settled: Vec<bool>,
}

/// An ordered list of tween steps played against one clock.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    steps: Vec<Scheduled>,
    end: f64,
    last_start: f64,
    started_at: Option<f64>,
    finished: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step. A step never starts before the one added ahead of it.
    pub fn push(&mut self, step: Step) -> &mut Self {
        let base = match step.position {
            Position::Sequence => self.end,
            Position::Offset(offset) => self.end + offset,
            Position::At(at) => at,
        };
        let start = base.max(self.last_start).max(0.0);
        self.last_start = start;
        self.end = self.end.max(start + step.span());
        let n = step.targets.len();
        self.steps.push(Scheduled {
            step,
            start,
            started: false,
            completed: false,
            captured: vec![None; n],
            settled: vec![false; n],
        });
        self
    }

    pub fn with(mut self, step: Step) -> Self {
        self.push(step);
        self
    }

    pub fn duration(&self) -> f64 {
        self.end
    }

    pub fn start_of(&self, label: &str) -> Option<f64> {
        self.steps
            .iter()
            .find(|s| s.step.label == label)
            .map(|s| s.start)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Writes the `from` values of every from-to step and starts the clock.
    pub fn play(&mut self, stage: &mut Stage, now: f64) {
        for scheduled in &self.steps {
            if let Some(from) = &scheduled.step.from {
                for target in &scheduled.step.targets {
                    from.apply(stage, *target);
                }
            }
        }
        self.started_at = Some(now);
    }

    pub fn tick(&mut self, stage: &mut Stage, now: f64) -> Vec<TimelineEvent> {
        match self.started_at {
            Some(started_at) => self.advance(now - started_at, stage),
            None => Vec::new(),
        }
    }

    /// Renders every step at `elapsed` ms into the timeline.
    pub fn advance(&mut self, elapsed: f64, stage: &mut Stage) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        for scheduled in self.steps.iter_mut() {
            if scheduled.completed || elapsed < scheduled.start {
                continue;
            }
            let step = &scheduled.step;
            if !scheduled.started {
                scheduled.started = true;
                events.push(TimelineEvent::Started(step.label));
            }
            for (i, target) in step.targets.iter().enumerate() {
                if scheduled.settled[i] {
                    continue;
                }
                let local = elapsed - scheduled.start - i as f64 * step.stagger;
                if local < 0.0 {
                    continue;
                }
                let from = match (&step.from, &scheduled.captured[i]) {
                    (Some(from), _) => from.clone(),
                    (None, Some(captured)) => captured.clone(),
                    (None, None) => {
                        let captured = step.to.snapshot(stage, *target);
                        scheduled.captured[i] = Some(captured.clone());
                        captured
                    }
                };
                let progress = if step.duration <= 0.0 {
                    1.0
                } else {
                    (local / step.duration).clamp(0.0, 1.0)
                };
                let eased = step.ease.apply(progress);
                for (prop, target_value) in step.to.iter() {
                    let start = from.get(prop).unwrap_or(target_value);
                    stage.set(*target, prop, lerp(start, target_value, eased));
                }
                if progress >= 1.0 {
                    scheduled.settled[i] = true;
                }
            }
            let span = step.span();
            let fraction = if span <= 0.0 {
                1.0
            } else {
                ((elapsed - scheduled.start) / span).clamp(0.0, 1.0)
            };
            events.push(TimelineEvent::Progress(step.label, fraction));
            if fraction >= 1.0 {
                scheduled.completed = true;
                events.push(TimelineEvent::Completed(step.label));
            }
        }
        if self.steps.iter().all(|s| s.completed) {
            self.finished = true;
            events.push(TimelineEvent::Finished);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Prop, StageNode};

    fn nodes(stage: &mut Stage, n: usize) -> Vec<NodeId> {
        let root = stage.root();
        (0..n)
            .map(|i| stage.insert(root, StageNode::new().with_id(format!("n{i}"))))
            .collect()
    }

    #[test]
    fn test_positions_are_relative_to_end() {
        let mut stage = Stage::new();
        let ids = nodes(&mut stage, 3);
        let tl = Timeline::new()
            .with(Step::to("a", vec![ids[0]], Props::new().x(1.0), 1000.0, Ease::Linear))
            .with(
                Step::to("b", vec![ids[1]], Props::new().x(1.0), 800.0, Ease::Linear)
                    .at(Position::Offset(-500.0)),
            )
            .with(
                Step::to("c", ids.clone(), Props::new().y(1.0), 800.0, Ease::Linear)
                    .stagger(50.0)
                    .at(Position::Offset(-300.0)),
            );
        assert_eq!(tl.start_of("a"), Some(0.0));
        assert_eq!(tl.start_of("b"), Some(500.0));
        assert_eq!(tl.start_of("c"), Some(1000.0));
        assert_eq!(tl.duration(), 1000.0 + 800.0 + 100.0);
    }

    #[test]
    fn test_step_never_starts_before_previous() {
        let mut stage = Stage::new();
        let ids = nodes(&mut stage, 1);
        let tl = Timeline::new()
            .with(Step::to("a", ids.clone(), Props::new().x(1.0), 100.0, Ease::Linear).at(Position::At(400.0)))
            .with(Step::to("b", ids.clone(), Props::new().y(1.0), 100.0, Ease::Linear).at(Position::Offset(-1000.0)));
        assert_eq!(tl.start_of("b"), Some(400.0));
    }

    #[test]
    fn test_advance_renders_and_reports() {
        let mut stage = Stage::new();
        let ids = nodes(&mut stage, 2);
        let mut tl = Timeline::new().with(
            Step::from_to(
                "fade",
                ids.clone(),
                Props::new().opacity(0.0),
                Props::new().opacity(1.0),
                100.0,
                Ease::Linear,
            )
            .stagger(100.0),
        );
        tl.play(&mut stage, 1000.0);
        assert_eq!(stage.get(ids[1], Prop::Opacity), Some(0.0));

        let events = tl.tick(&mut stage, 1050.0);
        assert_eq!(events[0], TimelineEvent::Started("fade"));
        assert_eq!(events[1], TimelineEvent::Progress("fade", 0.25));
        assert_eq!(stage.get(ids[0], Prop::Opacity), Some(0.5));
        assert_eq!(stage.get(ids[1], Prop::Opacity), Some(0.0));

        let events = tl.tick(&mut stage, 1200.0);
        assert!(events.contains(&TimelineEvent::Completed("fade")));
        assert_eq!(events.last(), Some(&TimelineEvent::Finished));
        assert_eq!(stage.get(ids[1], Prop::Opacity), Some(1.0));
        assert!(tl.is_finished());
        assert!(tl.tick(&mut stage, 1300.0).is_empty());
    }

    #[test]
    fn test_to_step_starts_from_current_value() {
        let mut stage = Stage::new();
        let ids = nodes(&mut stage, 1);
        let mut tl = Timeline::new()
            .with(Step::to("in", ids.clone(), Props::new().y(100.0), 100.0, Ease::Linear))
            .with(Step::to("out", ids.clone(), Props::new().y(0.0), 100.0, Ease::Linear));
        tl.advance(100.0, &mut stage);
        assert_eq!(stage.get(ids[0], Prop::Y), Some(100.0));
        tl.advance(150.0, &mut stage);
        assert_eq!(stage.get(ids[0], Prop::Y), Some(50.0));
        tl.advance(500.0, &mut stage);
        assert_eq!(stage.get(ids[0], Prop::Y), Some(0.0));
    }
}
