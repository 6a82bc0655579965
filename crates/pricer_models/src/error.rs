//! Model errors.

use pricer_core::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Errors raised while building or querying term structures and rate models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A model parameter is outside its admissible range
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Curve nodes are inconsistent
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    /// Query time lies outside the curve and extrapolation is disabled
    #[error("Time {t} is outside the curve range [0, {max}]")]
    OutOfRange { t: f64, max: f64 },

    /// Lattice query outside the built tree
    #[error("Lattice index out of range: {0}")]
    LatticeIndex(String),

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}
