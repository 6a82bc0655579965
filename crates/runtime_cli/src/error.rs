//! CLI error types

use thiserror::Error;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] infra_config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Market data feed error
    #[error("Feed error: {0}")]
    Feed(#[from] adapter_feeds::FeedError),

    /// Input file error
    #[error("Loader error: {0}")]
    Loader(#[from] adapter_loader::LoaderError),

    /// Output file error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Bootstrapping or calibration error
    #[error("Calibration error: {0}")]
    Calibration(#[from] pricer_optimiser::OptimiserError),

    /// Model error
    #[error("Model error: {0}")]
    Model(#[from] pricer_models::ModelError),

    /// Simulation error
    #[error("Simulation error: {0}")]
    Simulation(#[from] pricer_kernel::KernelError),

    /// Pricing error
    #[error("Pricing error: {0}")]
    Pricing(#[from] pricer_core::types::PricingError),

    /// Date or calendar error
    #[error("Date error: {0}")]
    MasterData(#[from] infra_master::MasterDataError),
}
