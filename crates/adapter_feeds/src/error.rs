//! Feed errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while fetching or parsing market data feeds.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Not enough quotes for the requested date
    #[error("No par yields for {date}: found {found} tenors")]
    NoData { date: NaiveDate, found: usize },

    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed field value
    #[error("Parse error: {0}")]
    Parse(String),
}
