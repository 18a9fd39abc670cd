//! Per-frame state changes, independent of rendering
//!
//! The driver is the only writer of the animated buffers (snow and text).
//! Frames run with no text until the overlay is attached.

use crate::animation::{advance_snow, star_pulse, ConvergenceStep, Rotations, TextConvergence};
use crate::config::AnimationConfig;
use crate::error::SceneError;
use crate::geometry::ParticleCloud;
use crate::text::TextGlyphCloud;

/// Glyph cloud together with the tween that moves it
#[derive(Debug, Clone)]
pub struct TextOverlay {
    pub cloud: TextGlyphCloud,
    pub convergence: TextConvergence,
}

/// Everything the renderer needs to know about one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub time: f32,
    pub rotations: Rotations,
    /// Scale of the star and its halo
    pub star_scale: f32,
    pub snow_dirty: bool,
    pub text_dirty: bool,
}

pub struct FrameDriver {
    config: AnimationConfig,
    snow_extent: f32,
    snow: ParticleCloud,
    text: Option<TextOverlay>,
}

impl FrameDriver {
    pub fn new(config: AnimationConfig, snow_extent: f32, snow: ParticleCloud) -> Self {
        Self {
            config,
            snow_extent,
            snow,
            text: None,
        }
    }

    pub fn attach_text(&mut self, overlay: TextOverlay) -> Result<(), SceneError> {
        if self.text.is_some() {
            return Err(SceneError::TextAlreadyAttached);
        }
        self.text = Some(overlay);
        Ok(())
    }

    pub fn snow(&self) -> &ParticleCloud {
        &self.snow
    }

    pub fn text(&self) -> Option<&TextOverlay> {
        self.text.as_ref()
    }

    /// Advance to `time` seconds since scene start
    pub fn tick(&mut self, time: f32) -> FrameUpdate {
        advance_snow(&mut self.snow, time, self.snow_extent, &self.config);

        let text_dirty = match self.text.as_mut() {
            Some(overlay) => match overlay.convergence.advance(time) {
                ConvergenceStep::Idle => false,
                ConvergenceStep::Interpolate(progress) => {
                    overlay.cloud.interpolate(progress);
                    true
                }
                ConvergenceStep::Snap => {
                    overlay.cloud.snap_to_target();
                    true
                }
            },
            None => false,
        };

        FrameUpdate {
            time,
            rotations: Rotations::at(time, &self.config),
            star_scale: star_pulse(time, &self.config),
            snow_dirty: !self.snow.is_empty(),
            text_dirty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ConvergenceTiming;
    use crate::geometry::Particle;
    use crate::math::{Color, Vec3};

    fn driver() -> FrameDriver {
        let mut snow = ParticleCloud::new();
        snow.push(Particle::new(Vec3::new(0.0, 0.0, 0.0), Color::WHITE));
        FrameDriver::new(AnimationConfig::default(), 100.0, snow)
    }

    fn overlay() -> TextOverlay {
        let config = AnimationConfig::default();
        TextOverlay {
            cloud: TextGlyphCloud::from_points(
                vec![Vec3::new(-50.0, 30.0, 80.0), Vec3::new(7.0, -3.0, 1.0)],
                vec![Vec3::new(1.1, 2.2, 0.0), Vec3::new(-3.3, 4.4, 0.0)],
                Color::WHITE,
            )
            .unwrap(),
            convergence: TextConvergence::new(ConvergenceTiming::from_config(&config)),
        }
    }

    #[test]
    fn test_runs_without_text() {
        let mut d = driver();
        for frame in 0..10 {
            let update = d.tick(frame as f32 / 60.0);
            assert!(!update.text_dirty);
            assert!(update.snow_dirty);
        }
        assert!(d.text().is_none());
        assert!(d.snow().position(0).y < 0.0);
    }

    #[test]
    fn test_second_attach_is_rejected() {
        let mut d = driver();
        assert!(d.attach_text(overlay()).is_ok());
        assert!(matches!(d.attach_text(overlay()), Err(SceneError::TextAlreadyAttached)));
    }

    #[test]
    fn test_text_settles_bit_identical() {
        let mut d = driver();
        d.attach_text(overlay()).unwrap();

        let mut dirty_frames = 0;
        for frame in 0..360 {
            if d.tick(frame as f32 / 60.0).text_dirty {
                dirty_frames += 1;
            }
        }
        // 1.5 s delay, then 3 s of tween and the snap frame
        assert!(dirty_frames > 150 && dirty_frames < 200);

        let text = d.text().unwrap();
        assert!(text.convergence.is_finalized());
        assert_eq!(text.cloud.current().positions(), text.cloud.target());

        let settled = text.cloud.current().clone();
        for frame in 360..420 {
            assert!(!d.tick(frame as f32 / 60.0).text_dirty);
        }
        assert_eq!(d.text().unwrap().cloud.current(), &settled);
    }

    #[test]
    fn test_pulse_and_rotation() {
        let mut d = driver();
        let update = d.tick(10.0);
        assert!((update.rotations.spiral - 0.5).abs() < 1e-6);
        assert!((update.star_scale - (1.0 + (30.0f32).sin() * 0.05)).abs() < 1e-6);
    }
}
