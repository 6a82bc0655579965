//! Model calibration module.
//!
//! Fits model parameters so that model prices match market prices.

mod bdt;

pub use bdt::{BdtCalibrator, BdtCalibratorConfig};
