//! Newton-Raphson root finding.

use super::SolverConfig;
use crate::types::SolverError;

/// Newton-Raphson solver using an explicit derivative.
#[derive(Debug, Clone, Default)]
pub struct NewtonRaphsonSolver {
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Find a root of `f` starting from `x0`.
    ///
    /// Stops when `|f(x)| < tolerance` or the step is smaller than `tolerance`.
    pub fn find_root<F, D>(&self, f: F, f_prime: D, x0: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let mut x = x0;
        for _ in 0..self.config.max_iterations {
            let fx = f(x);
            if !fx.is_finite() {
                return Err(SolverError::NonFinite { x });
            }
            if fx.abs() < self.config.tolerance {
                return Ok(x);
            }

            let dfx = f_prime(x);
            if !dfx.is_finite() || dfx.abs() < f64::EPSILON {
                return Err(SolverError::DerivativeTooSmall { x });
            }

            let step = fx / dfx;
            x -= step;
            if step.abs() < self.config.tolerance {
                return Ok(x);
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last: x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_two() {
        let solver = NewtonRaphsonSolver::default();
        let root = solver.find_root(|x| x * x - 2.0, |x| 2.0 * x, 1.0).unwrap();
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_derivative() {
        let solver = NewtonRaphsonSolver::default();
        let result = solver.find_root(|x| x * x + 1.0, |x| 2.0 * x, 0.0);
        assert!(matches!(result, Err(SolverError::DerivativeTooSmall { .. })));
    }

    #[test]
    fn test_yield_from_price() {
        // Continuous yield of a 5y zero priced at 80
        let solver = NewtonRaphsonSolver::default();
        let root = solver
            .find_root(|y| (-5.0 * y).exp() * 100.0 - 80.0, |y| -500.0 * (-5.0 * y).exp(), 0.05)
            .unwrap();
        assert_relative_eq!(root, -(0.8_f64.ln()) / 5.0, epsilon = 1e-10);
    }
}
