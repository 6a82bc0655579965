//! One-dimensional root finding.
//!
//! Curve bootstrapping solves one discount factor per pillar with
//! [`BrentSolver`]; rate inversions with a known derivative use
//! [`NewtonRaphsonSolver`]. Both take a [`SolverConfig`]
//! (`tolerance = 1e-10`, `max_iterations = 100` by default).
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Continuously compounded rate giving a discount factor of 0.95 over 2 years
//! let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
//! let r = solver.find_root(|r: f64| (-2.0 * r).exp() - 0.95, 0.0, 1.0).unwrap();
//! assert!((r - (-0.95_f64.ln() / 2.0)).abs() < 1e-10);
//! ```

mod brent;
mod config;
mod newton_raphson;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
