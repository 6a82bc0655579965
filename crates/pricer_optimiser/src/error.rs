//! Optimiser errors.

use infra_master::MasterDataError;
use pricer_core::types::{PricingError, SolverError};
use pricer_models::ModelError;
use thiserror::Error;

/// Errors that can occur during optimisation, bootstrapping and calibration.
#[derive(Error, Debug)]
pub enum OptimiserError {
    /// Convergence failure
    #[error("Failed to converge after {iterations} iterations (residual: {residual})")]
    ConvergenceFailure { iterations: usize, residual: f64 },

    /// Singular matrix encountered
    #[error("Singular matrix encountered during optimisation")]
    SingularMatrix,

    /// Inconsistent problem dimensions
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Numerical instability
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Invalid market data
    #[error("Invalid market data: {0}")]
    InvalidMarketData(String),

    /// Insufficient data points
    #[error("Insufficient data points: need {required}, got {provided}")]
    InsufficientData { required: usize, provided: usize },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    MasterData(#[from] MasterDataError),
}
