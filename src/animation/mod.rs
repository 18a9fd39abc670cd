//! Time-driven animation: the text convergence tween and the perpetual
//! motions of snow, galaxies, sky and star.

mod easing;
mod convergence;
mod motion;

pub use easing::{Easing, ease};
pub use convergence::{ConvergencePhase, ConvergenceStep, ConvergenceTiming, TextConvergence};
pub use motion::{advance_snow, star_pulse, Rotations};
