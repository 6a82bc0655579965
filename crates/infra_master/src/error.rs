//! Master data errors.

use thiserror::Error;

/// Errors that can occur when accessing master data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MasterDataError {
    /// Calendar not found
    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    /// Invalid or out-of-range date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Unparseable or unsupported period
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Schedule cannot be generated from the given inputs
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
}
