//! Short-rate models.
//!
//! A [`ShortRateProcess`] exposes the initial short rate and an exact (or
//! discretised) transition so that path generators can drive any one-factor
//! model without knowing its parameters.

mod hull_white;

pub use hull_white::{CurveHandle, HullWhite, HullWhiteProcess};

use crate::error::ModelError;

/// One-factor short-rate dynamics.
pub trait ShortRateProcess: Send + Sync {
    /// Short rate at time zero.
    fn x0(&self) -> f64;

    /// Short rate at `t + dt` given `x` at `t` and a standard normal draw `z`.
    fn evolve(&self, t: f64, x: f64, dt: f64, z: f64) -> Result<f64, ModelError>;
}
