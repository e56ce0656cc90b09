//! Frame-driven animation primitives: easing curves, property tweens and
//! ordered timelines. Everything here is time-explicit (milliseconds passed
//! in by the caller) so it runs the same in the browser and in tests.

pub mod easing;
pub mod timeline;
pub mod tween;

pub use easing::Ease;
pub use timeline::{Position, Step, Timeline, TimelineEvent};
pub use tween::{Props, TweenOptions, Tweener};
