//! Mathematical utilities.
//!
//! ## Submodules
//! - `interpolators`: Interpolation methods for curve fitting
//! - `solvers`: Root-finding algorithms for numerical solving

pub mod interpolators;
pub mod solvers;
