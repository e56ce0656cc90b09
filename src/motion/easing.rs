use std::f64::consts::PI;

/// Named easing curves. `apply` maps linear progress in `[0, 1]` to eased
/// progress; every curve maps 0 to 0 and 1 to 1 exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    CubicInOut,
    ExpoOut,
    /// Overshoots by `s` before settling.
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    pub const BACK: Ease = Ease::BackOut(1.7);
    pub const ELASTIC: Ease = Ease::ElasticOut {
        amplitude: 1.0,
        period: 0.5,
    };

    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2InOut => in_out(t, 2),
            Ease::Power3In => t.powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3InOut | Ease::CubicInOut => in_out(t, 3),
            Ease::ExpoOut => 1.0 - 2f64.powf(-10.0 * t),
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
            Ease::ElasticOut { amplitude, period } => {
                let amplitude = amplitude.max(1.0);
                let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin()
                    + 1.0
            }
        }
    }
}

fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
