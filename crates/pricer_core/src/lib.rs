//! # pricer_core
//!
//! Foundation layer for ratekit: rate arithmetic, day count conventions,
//! interpolation and one-dimensional root finding.
//!
//! ## Architecture Position
//!
//! Layer 1 of the **P**ricer layer. Has no dependency on any other ratekit
//! crate; every model, curve and optimiser builds on the types defined here.
//!
//! ## Modules
//!
//! - `types`: day counts, compounding, [`InterestRate`](types::InterestRate), error types
//! - `math`: interpolators and root solvers
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{Compounding, DayCountConvention, Frequency, InterestRate};
//!
//! let rate = InterestRate::new(0.05, DayCountConvention::Actual365Fixed, Compounding::Compounded, Frequency::Semiannual);
//! let df = rate.discount_factor(2.0).unwrap();
//! assert!((df - 1.025_f64.powi(-4)).abs() < 1e-12);
//! ```

pub mod math;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::math::interpolators::{CubicSplineInterpolator, Interpolator, LinearInterpolator};
    pub use crate::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
    pub use crate::types::{
        Compounding, DayCountConvention, Frequency, InterestRate, InterpolationError,
        PricingError, SolverError,
    };
}
