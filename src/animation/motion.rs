//! Perpetual motion: snowfall, slow galaxy and sky rotation, star pulse

use crate::config::AnimationConfig;
use crate::geometry::ParticleCloud;

/// One frame of snowfall. Flakes fall a fixed step per tick, wrap from the
/// bottom of the volume back to the top, then drift sideways.
pub fn advance_snow(snow: &mut ParticleCloud, time: f32, extent: f32, config: &AnimationConfig) {
    for p in snow.positions_mut() {
        p.y -= config.snow_fall;
        if p.y < -extent {
            p.y = extent;
        }
        p.x += (time * 0.5 + p.y).sin() * config.snow_sway;
    }
}

/// Y-axis rotations of the rotating groups at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotations {
    pub spiral: f32,
    pub cloud: f32,
    pub sky: f32,
}

impl Rotations {
    pub fn at(time: f32, config: &AnimationConfig) -> Self {
        Self {
            spiral: time * config.spiral_rotation_speed,
            cloud: time * config.cloud_rotation_speed,
            sky: time * config.sky_rotation_speed,
        }
    }
}

/// Uniform scale shared by the star and its halo
pub fn star_pulse(time: f32, config: &AnimationConfig) -> f32 {
    1.0 + (time * config.star_pulse_speed).sin() * config.star_pulse_amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Particle;
    use crate::math::{Color, Vec3};

    fn flake(x: f32, y: f32) -> ParticleCloud {
        let mut snow = ParticleCloud::new();
        snow.push(Particle::new(Vec3::new(x, y, 0.0), Color::WHITE));
        snow
    }

    #[test]
    fn test_snow_falls() {
        let config = AnimationConfig::default();
        let mut snow = flake(0.0, 10.0);
        advance_snow(&mut snow, 0.0, 100.0, &config);
        let p = snow.position(0);
        assert!((p.y - 9.95).abs() < 1e-5);
        assert!((p.x - 9.95f32.sin() * 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_snow_wraps_to_top() {
        let config = AnimationConfig::default();
        let mut snow = flake(3.0, -99.96);
        advance_snow(&mut snow, 2.0, 100.0, &config);
        let p = snow.position(0);
        assert_eq!(p.y, 100.0);
        assert!((p.x - (3.0 + (1.0f32 + 100.0).sin() * 0.005)).abs() < 1e-6);
    }

    #[test]
    fn test_snow_at_floor_does_not_wrap_early() {
        let config = AnimationConfig::default();
        let mut snow = flake(0.0, -99.95);
        advance_snow(&mut snow, 0.0, 100.0, &config);
        // lands at -100.0 (within float error), which is not below the floor
        assert!(snow.position(0).y < -99.99);
    }

    #[test]
    fn test_rotations() {
        let r = Rotations::at(10.0, &AnimationConfig::default());
        assert!((r.spiral - 0.5).abs() < 1e-6);
        assert!((r.cloud - 0.2).abs() < 1e-6);
        assert!((r.sky - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_star_pulse_range() {
        let config = AnimationConfig::default();
        assert_eq!(star_pulse(0.0, &config), 1.0);
        for i in 0..100 {
            let s = star_pulse(i as f32 * 0.1, &config);
            assert!((0.95 - 1e-6..=1.05 + 1e-6).contains(&s));
        }
    }
}
