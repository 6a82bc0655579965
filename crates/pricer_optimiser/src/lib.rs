//! # pricer_optimiser
//!
//! Calibration layer for ratekit.
//!
//! ## Modules
//!
//! - [`solvers`]: Levenberg-Marquardt nonlinear least squares
//! - [`bootstrapping`]: par bond helpers and discount curve bootstrapping
//! - [`calibration`]: Black-Derman-Toy tree calibration
//!
//! ## Architecture Position
//!
//! Part of the **P**ricer layer. Depends on `pricer_core`, `pricer_models`
//! and `infra_master` for calendars and schedules.

pub mod bootstrapping;
pub mod calibration;
pub mod error;
pub mod solvers;

pub use error::OptimiserError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrapping::{
        BondConventions, BootstrapConfig, BootstrapResult, CurveBootstrapper, FixedRateBondHelper,
    };
    pub use crate::calibration::{BdtCalibrator, BdtCalibratorConfig};
    pub use crate::error::OptimiserError;
    pub use crate::solvers::{LevenbergMarquardt, LevenbergMarquardtConfig, OptimisationResult};
}
