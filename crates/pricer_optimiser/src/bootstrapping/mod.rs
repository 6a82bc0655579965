//! Yield curve bootstrapping from par-yield bond quotes.
//!
//! Each quoted tenor becomes a fixed-rate bond priced at par. Pillar
//! discount factors are solved one maturity at a time so that every bond
//! reprices to its quote.

mod bond_helper;
mod curve_builder;

pub use bond_helper::{BondConventions, CashFlow, FixedRateBondHelper};
pub use curve_builder::{BootstrapConfig, CurveBootstrapper};

use pricer_models::curves::InterpolatedDiscountCurve;

/// Result of curve bootstrapping.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// Bootstrapped curve, with extrapolation enabled
    pub curve: InterpolatedDiscountCurve,
    /// Largest absolute clean price error over the helpers
    pub residual: f64,
    /// Number of sweeps over the pillars
    pub iterations: usize,
}
