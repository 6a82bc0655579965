//! Core numeric and time types.
//!
//! This module provides:
//! - `time`: Day count conventions, compounding rules and interest rate arithmetic
//! - `error`: Structured error types for pricing, interpolation and root finding

pub mod error;
pub mod time;

pub use error::{InterpolationError, PricingError, SolverError};
pub use time::{time_to_maturity, Compounding, DayCountConvention, Frequency, InterestRate};
