//! Kernel errors.

use pricer_models::ModelError;
use thiserror::Error;

/// Errors raised by simulation set-up and path generation.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Monte Carlo configuration rejected by the builder
    #[error("Invalid Monte Carlo configuration: {0}")]
    InvalidConfig(String),

    /// Query outside the simulated grid or path set
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    /// The global thread pool could not be configured
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
