//! Monte Carlo simulation of short-rate paths.
//!
//! - [`MonteCarloConfig`]: validated run parameters (builder)
//! - [`TimeGrid`]: simulation times
//! - [`PathGenerator`]: parallel generation over any
//!   [`ShortRateProcess`](pricer_models::short_rate::ShortRateProcess)
//! - [`PathMatrix`]: simulated rates with summary statistics

mod config;
mod grid;
mod paths;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder};
pub use grid::TimeGrid;
pub use paths::{PathGenerator, PathMatrix};
