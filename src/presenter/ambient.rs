//! Decorative motion that runs on its own once the content is shown: the
//! drifting background particles, the floating profile photo, the nav dock
//! entrance and the hero backdrop scrub.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Viewport;
use crate::motion::{Ease, Props, TweenOptions, Tweener};
use crate::stage::Stage;

pub const PARTICLE_CLASS: &str = "bg-particle";
pub const PARTICLE_COUNT: usize = 25;
/// Resting opacity the markup renders particles with.
pub const PARTICLE_OPACITY: f64 = 0.5;
const PARTICLE_SEED: u64 = 0x0a1b_e27f;

pub const HERO_BACKDROP: &str = "hero-bg";
const HERO_SECTION: &str = "home";
const HERO_IMAGE: &str = "hero-image";
const DOCK: &str = "nav-dock";

/// Placement and motion of one background particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Percent of the particle layer.
    pub left: f64,
    pub top: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub drift_ms: f64,
    pub opacity: f64,
    pub pulse_ms: f64,
    pub pulse_delay: f64,
}

/// The particle field. Seeded, so the server and the browser lay it out
/// identically.
pub fn particles() -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(PARTICLE_SEED);
    (0..PARTICLE_COUNT)
        .map(|_| Particle {
            left: rng.gen_range(0.0..100.0),
            top: rng.gen_range(0.0..100.0),
            drift_x: rng.gen_range(-25.0..25.0),
            drift_y: rng.gen_range(-25.0..25.0),
            drift_ms: rng.gen_range(10_000.0..25_000.0),
            opacity: rng.gen_range(0.2..1.0),
            pulse_ms: rng.gen_range(2_000.0..6_000.0),
            pulse_delay: rng.gen_range(0.0..3_000.0),
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct Ambient {
    started: bool,
    hero_progress: Option<f64>,
}

impl Ambient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) {
        if self.started {
            return;
        }
        self.started = true;

        if let Some(dock) = stage.by_id(DOCK) {
            tweens.from_to(
                stage,
                dock,
                Props::new().y(100.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
                TweenOptions::new(1000.0, Ease::Power3Out).delay(500.0),
                now,
            );
        }

        if let Some(image) = stage.by_id(HERO_IMAGE) {
            tweens.to(
                image,
                Props::new().y(-10.0),
                TweenOptions::new(4000.0, Ease::Power2InOut).yoyo_forever(),
                now,
            );
        }

        let resting = Props::new().opacity(PARTICLE_OPACITY);
        for (node, particle) in stage.by_class(PARTICLE_CLASS).into_iter().zip(particles()) {
            tweens.set(stage, node, &resting);
            tweens.to(
                node,
                Props::new().x(particle.drift_x).y(particle.drift_y),
                TweenOptions::new(particle.drift_ms, Ease::Linear).yoyo_forever(),
                now,
            );
            tweens.to(
                node,
                Props::new().opacity(particle.opacity),
                TweenOptions::new(particle.pulse_ms, Ease::Power2InOut)
                    .delay(particle.pulse_delay)
                    .yoyo_forever(),
                now,
            );
        }
    }

    /// Tracks the hero backdrop to the hero's passage through the viewport,
    /// from its top meeting the viewport bottom to its bottom leaving the top.
    pub fn on_scroll(&mut self, stage: &mut Stage, tweens: &mut Tweener, viewport: &Viewport) {
        let (Some(hero), Some(backdrop)) = (stage.by_id(HERO_SECTION), stage.by_id(HERO_BACKDROP))
        else {
            return;
        };
        let Some(rect) = stage.rect(hero) else {
            return;
        };
        let span = rect.height + viewport.height;
        if span <= 0.0 {
            return;
        }
        let progress = ((viewport.scroll_y + viewport.height - rect.top) / span).clamp(0.0, 1.0);
        if self.hero_progress == Some(progress) {
            return;
        }
        self.hero_progress = Some(progress);
        tweens.set(stage, backdrop, &Props::new().y_percent(-50.0 * progress));
    }
}
