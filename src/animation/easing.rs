//! Easing functions for tweened values

use serde::{Deserialize, Serialize};

/// Easing function types
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation
    Linear,
    /// Fast start, quadratic deceleration
    EaseOutQuad,
    /// Fast start, cubic deceleration
    #[default]
    EaseOutCubic,
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseOutQuad => 1.0 - (1.0 - t).powi(2),
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::EaseOutQuad, Easing::EaseOutCubic];

    #[test]
    fn test_ease_bounds() {
        for easing in ALL {
            assert_eq!(ease(0.0, easing), 0.0, "Easing {:?} should start at 0", easing);
            assert_eq!(ease(1.0, easing), 1.0, "Easing {:?} should end at 1", easing);
        }
    }

    #[test]
    fn test_ease_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let v = ease(t, easing);
                assert!(v >= prev, "Easing {:?} should be monotonic", easing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_out_cubic_midpoint() {
        assert!((ease(0.5, Easing::EaseOutCubic) - 0.875).abs() < 1e-6);
        assert!(ease(0.5, Easing::EaseOutCubic) > ease(0.5, Easing::EaseOutQuad));
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease(-0.5, Easing::Linear), 0.0);
        assert_eq!(ease(1.5, Easing::EaseOutCubic), 1.0);
    }
}
