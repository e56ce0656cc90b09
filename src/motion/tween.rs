use indextree::NodeId;

use super::easing::{lerp, Ease};
use crate::stage::{Prop, Stage};

/// A partial set of visual property values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Vec<(Prop, f64)>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: Prop, value: f64) -> Self {
        self.insert(prop, value);
        self
    }

    pub fn insert(&mut self, prop: Prop, value: f64) {
        match self.0.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.0.push((prop, value)),
        }
    }

    pub fn opacity(self, v: f64) -> Self {
        self.with(Prop::Opacity, v)
    }

    pub fn x(self, v: f64) -> Self {
        self.with(Prop::X, v)
    }

    pub fn y(self, v: f64) -> Self {
        self.with(Prop::Y, v)
    }

    pub fn y_percent(self, v: f64) -> Self {
        self.with(Prop::YPercent, v)
    }

    pub fn scale(self, v: f64) -> Self {
        self.with(Prop::Scale, v)
    }

    pub fn rotate_x(self, v: f64) -> Self {
        self.with(Prop::RotateX, v)
    }

    pub fn rotate_y(self, v: f64) -> Self {
        self.with(Prop::RotateY, v)
    }

    pub fn clip_right(self, v: f64) -> Self {
        self.with(Prop::ClipRight, v)
    }

    pub fn clip_bottom(self, v: f64) -> Self {
        self.with(Prop::ClipBottom, v)
    }

    pub fn width(self, v: f64) -> Self {
        self.with(Prop::Width, v)
    }

    pub fn grayscale(self, v: f64) -> Self {
        self.with(Prop::Grayscale, v)
    }

    pub fn get(&self, prop: Prop) -> Option<f64> {
        self.0.iter().find(|(p, _)| *p == prop).map(|(_, v)| *v)
    }

    pub fn contains(&self, prop: Prop) -> bool {
        self.get(prop).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prop, f64)> + '_ {
        self.0.iter().copied()
    }

    fn retain_missing_from(&mut self, other: &Props) {
        self.0.retain(|(p, _)| !other.contains(*p));
    }

    /// Current stage values for the same properties.
    pub fn snapshot(&self, stage: &Stage, node: NodeId) -> Props {
        Props(
            self.0
                .iter()
                .filter_map(|(p, _)| stage.get(node, *p).map(|v| (*p, v)))
                .collect(),
        )
    }

    pub fn apply(&self, stage: &mut Stage, node: NodeId) {
        for (prop, value) in self.iter() {
            stage.set(node, prop, value);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenOptions {
    pub duration: f64,
    pub ease: Ease,
    pub delay: f64,
    /// Restart every `duration` until overwritten.
    pub repeat: bool,
    /// Play every other cycle backwards. Only meaningful with `repeat`.
    pub yoyo: bool,
}

impl TweenOptions {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            duration,
            ease,
            delay: 0.0,
            repeat: false,
            yoyo: false,
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Loops forever, alternating direction each cycle.
    pub fn yoyo_forever(mut self) -> Self {
        self.repeat = true;
        self.yoyo = true;
        self
    }

    /// Linear progress at `elapsed` ms, and whether the tween is done.
    fn progress(&self, elapsed: f64) -> (f64, bool) {
        if self.duration <= 0.0 {
            return (1.0, true);
        }
        let cycles = elapsed / self.duration;
        if !self.repeat {
            return (cycles.clamp(0.0, 1.0), cycles >= 1.0);
        }
        let local = cycles.fract();
        let backwards = self.yoyo && (cycles.floor() as u64) % 2 == 1;
        (if backwards { 1.0 - local } else { local }, false)
    }
}

#[derive(Debug, Clone)]
struct Tween {
    id: u64,
    node: NodeId,
    from: Option<Props>,
    to: Props,
    start: f64,
    opts: TweenOptions,
}

/// Runs every free-standing tween once per frame.
///
/// Starting a tween removes the same properties from any in-flight tween on
/// that node, so repeated input (hover in/out, pointer parallax) never
/// builds a backlog.
#[derive(Debug, Default)]
pub struct Tweener {
    tweens: Vec<Tween>,
    next_id: u64,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animates from whatever values the node has when the tween begins.
    pub fn to(
        &mut self,
        node: NodeId,
        to: Props,
        opts: TweenOptions,
        now: f64,
    ) -> u64 {
        self.push(node, None, to, opts, now)
    }

    /// Writes `from` immediately and animates to `to`.
    pub fn from_to(
        &mut self,
        stage: &mut Stage,
        node: NodeId,
        from: Props,
        to: Props,
        opts: TweenOptions,
        now: f64,
    ) -> u64 {
        from.apply(stage, node);
        self.push(node, Some(from), to, opts, now)
    }

    /// Jumps straight to `props`, cancelling any tween on those properties.
    pub fn set(&mut self, stage: &mut Stage, node: NodeId, props: &Props) {
        self.overwrite(node, props);
        props.apply(stage, node);
    }

    fn push(
        &mut self,
        node: NodeId,
        from: Option<Props>,
        to: Props,
        opts: TweenOptions,
        now: f64,
    ) -> u64 {
        self.overwrite(node, &to);
        self.next_id += 1;
        let id = self.next_id;
        self.tweens.push(Tween {
            id,
            node,
            from,
            to,
            start: now + opts.delay,
            opts,
        });
        id
    }

    fn overwrite(&mut self, node: NodeId, props: &Props) {
        for tween in self.tweens.iter_mut().filter(|t| t.node == node) {
            tween.to.retain_missing_from(props);
            if let Some(from) = tween.from.as_mut() {
                from.retain_missing_from(props);
            }
        }
        self.tweens.retain(|t| !t.to.is_empty());
    }

    pub fn is_active(&self, node: NodeId) -> bool {
        self.tweens.iter().any(|t| t.node == node)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Advances every tween to `now`; returns the ids that finished.
    pub fn tick(&mut self, stage: &mut Stage, now: f64) -> Vec<u64> {
        let mut finished = Vec::new();
        for tween in self.tweens.iter_mut() {
            if now < tween.start {
                continue;
            }
            if tween.from.is_none() {
                tween.from = Some(tween.to.snapshot(stage, tween.node));
            }
            let from = tween.from.clone().unwrap_or_default();
            let (progress, done) = tween.opts.progress(now - tween.start);
            let eased = tween.opts.ease.apply(progress);
            for (prop, target) in tween.to.iter() {
                let start = from.get(prop).unwrap_or(target);
                stage.set(tween.node, prop, lerp(start, target, eased));
            }
            if done {
                finished.push(tween.id);
            }
        }
        self.tweens.retain(|t| !finished.contains(&t.id));
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageNode;

    fn stage_with_node() -> (Stage, NodeId) {
        let mut stage = Stage::new();
        let root = stage.root();
        let node = stage.insert(root, StageNode::new().with_id("box"));
        (stage, node)
    }

    #[test]
    fn test_to_captures_start_values_when_it_begins() {
        let (mut stage, node) = stage_with_node();
        let mut tweens = Tweener::new();
        tweens.to(
            node,
            Props::new().x(100.0),
            TweenOptions::new(100.0, Ease::Linear).delay(50.0),
            0.0,
        );
        // moved before the delay elapsed; the tween starts from here
        stage.set(node, Prop::X, 50.0);
        tweens.tick(&mut stage, 10.0);
        assert_eq!(stage.get(node, Prop::X), Some(50.0));
        tweens.tick(&mut stage, 50.0);
        tweens.tick(&mut stage, 100.0);
        assert_eq!(stage.get(node, Prop::X), Some(75.0));
        let done = tweens.tick(&mut stage, 150.0);
        assert_eq!(done.len(), 1);
        assert_eq!(stage.get(node, Prop::X), Some(100.0));
        assert_eq!(tweens.active_count(), 0);
    }

    #[test]
    fn test_from_to_renders_immediately() {
        let (mut stage, node) = stage_with_node();
        let mut tweens = Tweener::new();
        tweens.from_to(
            &mut stage,
            node,
            Props::new().opacity(0.0).y(60.0),
            Props::new().opacity(1.0).y(0.0),
            TweenOptions::new(800.0, Ease::Power3Out).delay(100.0),
            0.0,
        );
        assert_eq!(stage.get(node, Prop::Opacity), Some(0.0));
        assert_eq!(stage.get(node, Prop::Y), Some(60.0));
        tweens.tick(&mut stage, 900.0);
        assert_eq!(stage.get(node, Prop::Opacity), Some(1.0));
        assert_eq!(stage.get(node, Prop::Y), Some(0.0));
    }

    #[test]
    fn test_last_write_wins() {
        let (mut stage, node) = stage_with_node();
        let mut tweens = Tweener::new();
        let opts = TweenOptions::new(300.0, Ease::Power2Out);
        // hover in
        tweens.to(node, Props::new().scale(1.05).y(-10.0), opts, 0.0);
        tweens.tick(&mut stage, 100.0);
        // hover out before it finished
        tweens.to(node, Props::new().scale(1.0), opts, 100.0);
        assert_eq!(tweens.active_count(), 2);
        tweens.tick(&mut stage, 1000.0);
        assert_eq!(stage.get(node, Prop::Scale), Some(1.0));
        // y was not superseded and still completed
        assert_eq!(stage.get(node, Prop::Y), Some(-10.0));

        // a full overwrite drops the older tween entirely
        tweens.to(node, Props::new().x(10.0), opts, 1000.0);
        tweens.to(node, Props::new().x(-10.0), opts, 1010.0);
        assert_eq!(tweens.active_count(), 1);
        tweens.tick(&mut stage, 2000.0);
        assert_eq!(stage.get(node, Prop::X), Some(-10.0));
    }

    #[test]
    fn test_set_cancels_running_tween() {
        let (mut stage, node) = stage_with_node();
        let mut tweens = Tweener::new();
        tweens.to(
            node,
            Props::new().opacity(0.0),
            TweenOptions::new(500.0, Ease::Linear),
            0.0,
        );
        tweens.set(&mut stage, node, &Props::new().opacity(1.0));
        assert!(!tweens.is_active(node));
        tweens.tick(&mut stage, 250.0);
        assert_eq!(stage.get(node, Prop::Opacity), Some(1.0));
    }

    #[test]
    fn test_yoyo_runs_until_overwritten() {
        let (mut stage, node) = stage_with_node();
        let mut tweens = Tweener::new();
        tweens.to(
            node,
            Props::new().y(-10.0),
            TweenOptions::new(100.0, Ease::Linear).yoyo_forever(),
            0.0,
        );
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 50.0);
        assert_eq!(stage.get(node, Prop::Y), Some(-5.0));
        // on the way back
        assert!(tweens.tick(&mut stage, 125.0).is_empty());
        assert_eq!(stage.get(node, Prop::Y), Some(-7.5));
        tweens.tick(&mut stage, 200.0);
        assert_eq!(stage.get(node, Prop::Y), Some(0.0));
        tweens.tick(&mut stage, 10_050.0);
        assert_eq!(stage.get(node, Prop::Y), Some(-5.0));
        assert!(tweens.is_active(node));

        tweens.set(&mut stage, node, &Props::new().y(3.0));
        assert!(!tweens.is_active(node));
    }

    #[test]
    fn test_props_builder_replaces_values() {
        let props = Props::new().x(1.0).x(2.0).opacity(0.5);
        assert_eq!(props.get(Prop::X), Some(2.0));
        assert_eq!(props.iter().count(), 2);
        assert!(!props.contains(Prop::Y));
    }
}
