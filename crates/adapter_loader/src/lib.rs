//! # adapter_loader
//!
//! Flat file loaders for ratekit market inputs.
//!
//! Reads par yield curves (`tenor,yield`) as an offline alternative to the
//! Treasury feed, and BDT term structures (`tenor,rate,volatility`).
//!
//! ## Architecture Position
//!
//! Part of the **A**dapter layer. Produces `adapter_feeds` quotes and
//! `pricer_models` lattice inputs.
//!
//! ## Example
//!
//! ```rust,ignore
//! use adapter_loader::CsvLoader;
//!
//! let quotes = CsvLoader::load_par_yields("par_yields.csv")?;
//! ```

mod csv_loader;
mod error;

pub use csv_loader::{CsvLoader, CsvRecord};
pub use error::LoaderError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CsvLoader, CsvRecord, LoaderError};
}
