//! Loader errors.

use thiserror::Error;

/// Errors raised while reading quote files.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error, including rows that do not match the expected columns
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Header row lacks a required column
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A value parsed but is not acceptable
    #[error("Invalid data format in row {row}: {message}")]
    InvalidFormat { row: usize, message: String },

    /// The same tenor appears twice
    #[error("Duplicate tenor {tenor} in row {row}")]
    DuplicateTenor { row: usize, tenor: String },

    /// No data rows
    #[error("No records in {0}")]
    Empty(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
}
