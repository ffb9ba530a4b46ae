//! Pure easing functions for settle, return and page-turn animations
//!
//! Maps progress in [0, 1] to eased progress in [0, 1].

pub use crate::config::EasingType;

/// A curve together with its tuning factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    pub kind: EasingType,
    /// Only used by [`EasingType::Decelerate`]
    pub factor: f32,
}

impl Easing {
    pub fn new(kind: EasingType, factor: f32) -> Self {
        Self { kind, factor }
    }

    /// Decelerating curve with the given factor
    pub fn decelerate(factor: f32) -> Self {
        Self::new(EasingType::Decelerate, factor)
    }

    /// Apply the easing function to a progress value
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.kind {
            EasingType::Linear => t,
            EasingType::Decelerate => decelerate(t, self.factor as f64),
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
        }
    }
}

impl From<EasingType> for Easing {
    fn from(kind: EasingType) -> Self {
        Self::new(kind, 1.0)
    }
}

/// Decelerate: f(t) = 1 - (1-t)^(2*factor)
#[inline]
fn decelerate(t: f64, factor: f64) -> f64 {
    if factor == 1.0 {
        let inv = 1.0 - t;
        1.0 - inv * inv
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::Decelerate,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for kind in ALL {
            let easing = Easing::new(kind, 2.0);
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", kind);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", kind);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for kind in ALL {
            let easing = Easing::new(kind, 2.0);
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", kind, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_decelerate_runs_ahead_of_linear() {
        let easing = Easing::decelerate(2.0);
        assert!(easing.apply(0.25) > 0.25);
        // 1 - 0.5^4
        assert!((easing.apply(0.5) - 0.9375).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let linear = Easing::from(EasingType::Linear);
        assert_eq!(linear.apply(-1.0), 0.0);
        assert_eq!(linear.apply(2.0), 1.0);
    }
}
