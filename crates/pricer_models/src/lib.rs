//! # pricer_models
//!
//! Interest rate term structures and short-rate models for ratekit.
//!
//! ## Modules
//!
//! - [`curves`]: discount curves and the [`curves::YieldTermStructure`] trait
//! - [`short_rate`]: Hull-White model and its exact simulation process
//! - [`lattice`]: Black-Derman-Toy binomial tree
//!
//! ## Architecture Position
//!
//! Part of the **P**ricer layer. Depends on `pricer_core` only; calibration
//! of these models lives in `pricer_optimiser` and simulation in `pricer_kernel`.

pub mod curves;
pub mod error;
pub mod lattice;
pub mod short_rate;

pub use error::ModelError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::curves::{
        CurveInterpolation, FlatForward, InterpolatedDiscountCurve, YieldTermStructure,
    };
    pub use crate::error::ModelError;
    pub use crate::lattice::{BdtQuote, BdtTree};
    pub use crate::short_rate::{HullWhite, HullWhiteProcess, ShortRateProcess};
}
