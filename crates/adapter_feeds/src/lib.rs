//! # adapter_feeds
//!
//! Market data feeds for ratekit.
//!
//! Fetches the US Treasury daily par yield curve and normalises each
//! curve point into a [`ParYieldQuote`] keyed by tenor.
//!
//! ## Architecture Position
//!
//! Part of the **A**dapter layer. Depends only on `infra_master` (for tenors).
//!
//! ## Example
//!
//! ```rust,ignore
//! use adapter_feeds::{UsTreasuryFeed, DEFAULT_BASE_URL};
//!
//! let feed = UsTreasuryFeed::new(DEFAULT_BASE_URL, Duration::from_secs(30))?;
//! let curve = feed.fetch_par_yields(as_of).await?;
//! ```

mod error;
mod quote;
pub mod treasury;

pub use error::FeedError;
pub use quote::{ParYieldCurveQuotes, ParYieldQuote};
pub use treasury::{month_url, parse_par_yields, UsTreasuryFeed, DEFAULT_BASE_URL};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{FeedError, ParYieldCurveQuotes, ParYieldQuote, UsTreasuryFeed};
}
