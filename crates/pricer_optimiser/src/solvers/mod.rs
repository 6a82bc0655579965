//! Numerical optimisation solvers.
//!
//! Levenberg-Marquardt for nonlinear least squares. One-dimensional root
//! finding lives in `pricer_core::math::solvers`.

mod levenberg_marquardt;

pub use levenberg_marquardt::{LevenbergMarquardt, LevenbergMarquardtConfig};

/// Optimisation result.
#[derive(Debug, Clone)]
pub struct OptimisationResult {
    /// Optimal parameters
    pub parameters: Vec<f64>,
    /// Final sum of squared residuals
    pub objective: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Number of function evaluations
    pub function_evaluations: usize,
    /// Whether a stopping criterion was met before the iteration limit
    pub converged: bool,
}
