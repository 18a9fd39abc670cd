//! Text convergence: a one-shot tween from scattered points onto the glyphs
//!
//! Progress is a pure function of the time elapsed since scene start, so
//! a text cloud attached late picks up wherever the tween already is.

use super::easing::{ease, Easing};
use crate::config::AnimationConfig;

/// When and how the convergence runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceTiming {
    pub delay: f32,
    pub duration: f32,
    pub easing: Easing,
}

impl ConvergenceTiming {
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            delay: config.text_delay,
            duration: config.text_duration,
            easing: config.text_easing,
        }
    }

    /// Eased progress in [0, 1] at `elapsed` seconds since scene start
    pub fn progress_at(&self, elapsed: f32) -> f32 {
        ease((elapsed - self.delay) / self.duration, self.easing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergencePhase {
    Scattered,
    Converging,
    /// Progress reached 1 but positions have not been snapped yet
    Converged,
    Settled,
}

/// What a frame should do to the text positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvergenceStep {
    Idle,
    Interpolate(f32),
    Snap,
}

#[derive(Debug, Clone)]
pub struct TextConvergence {
    progress: f32,
    finalized: bool,
    timing: ConvergenceTiming,
}

impl TextConvergence {
    pub fn new(timing: ConvergenceTiming) -> Self {
        Self {
            progress: 0.0,
            finalized: false,
            timing,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn phase(&self) -> ConvergencePhase {
        if self.finalized {
            ConvergencePhase::Settled
        } else if self.progress >= 1.0 {
            ConvergencePhase::Converged
        } else if self.progress > 0.0 {
            ConvergencePhase::Converging
        } else {
            ConvergencePhase::Scattered
        }
    }

    /// Move the tween to `elapsed` without touching any positions
    pub fn sync(&mut self, elapsed: f32) {
        self.progress = self.progress.max(self.timing.progress_at(elapsed));
    }

    /// The position update owed for the current progress; the snap is handed out once
    pub fn take_step(&mut self) -> ConvergenceStep {
        match self.phase() {
            ConvergencePhase::Scattered | ConvergencePhase::Settled => ConvergenceStep::Idle,
            ConvergencePhase::Converging => ConvergenceStep::Interpolate(self.progress),
            ConvergencePhase::Converged => {
                self.finalized = true;
                ConvergenceStep::Snap
            }
        }
    }

    /// `sync` then `take_step`; the returned step must be applied to the glyph cloud
    pub fn advance(&mut self, elapsed: f32) -> ConvergenceStep {
        self.sync(elapsed);
        self.take_step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> ConvergenceTiming {
        ConvergenceTiming::from_config(&AnimationConfig::default())
    }

    #[test]
    fn test_progress_curve() {
        let t = timing();
        assert_eq!(t.progress_at(0.0), 0.0);
        assert_eq!(t.progress_at(1.5), 0.0);
        // halfway through the tween, cubic ease-out
        assert!((t.progress_at(3.0) - 0.875).abs() < 1e-5);
        assert_eq!(t.progress_at(4.5), 1.0);
        assert_eq!(t.progress_at(100.0), 1.0);
    }

    #[test]
    fn test_phases_in_order() {
        let mut c = TextConvergence::new(timing());
        assert_eq!(c.phase(), ConvergencePhase::Scattered);

        assert_eq!(c.advance(1.0), ConvergenceStep::Idle);
        assert_eq!(c.phase(), ConvergencePhase::Scattered);

        assert!(matches!(c.advance(2.0), ConvergenceStep::Interpolate(p) if p > 0.0 && p < 1.0));
        assert_eq!(c.phase(), ConvergencePhase::Converging);

        assert_eq!(c.advance(5.0), ConvergenceStep::Snap);
        assert_eq!(c.phase(), ConvergencePhase::Settled);
    }

    #[test]
    fn test_snap_happens_once() {
        let mut c = TextConvergence::new(timing());
        let snaps = (0..600)
            .map(|frame| c.advance(frame as f32 / 60.0))
            .filter(|step| *step == ConvergenceStep::Snap)
            .count();
        assert_eq!(snaps, 1);
        assert!(c.is_finalized());
        assert_eq!(c.advance(20.0), ConvergenceStep::Idle);
    }

    #[test]
    fn test_progress_never_regresses() {
        let mut c = TextConvergence::new(timing());
        c.advance(3.0);
        let before = c.progress();
        assert_eq!(c.advance(2.0), ConvergenceStep::Interpolate(before));
        assert_eq!(c.progress(), before);
    }

    #[test]
    fn test_converged_until_step_taken() {
        let mut c = TextConvergence::new(timing());
        c.sync(4.5);
        assert_eq!(c.phase(), ConvergencePhase::Converged);
        assert!(!c.is_finalized());
        assert_eq!(c.take_step(), ConvergenceStep::Snap);
        assert_eq!(c.take_step(), ConvergenceStep::Idle);
    }

    #[test]
    fn test_late_start_jumps_straight_to_snap() {
        let mut c = TextConvergence::new(timing());
        assert_eq!(c.advance(10.0), ConvergenceStep::Snap);
    }
}
