//! Recombining short-rate lattices.

mod bdt;

pub use bdt::{BdtQuote, BdtTree};
