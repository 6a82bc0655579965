//! Levenberg-Marquardt algorithm for nonlinear least squares.

use tracing::trace;

use crate::error::OptimiserError;
use crate::solvers::OptimisationResult;

/// Configuration for Levenberg-Marquardt solver.
#[derive(Debug, Clone)]
pub struct LevenbergMarquardtConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Stop when the infinity norm of `Jᵀr` falls below this
    pub gradient_tolerance: f64,
    /// Stop when the step norm falls below this
    pub parameter_tolerance: f64,
    /// Stop when the sum of squared residuals falls below this
    pub residual_tolerance: f64,
    /// Initial damping parameter (λ)
    pub initial_lambda: f64,
    /// Damping increase factor
    pub lambda_increase: f64,
    /// Damping decrease factor
    pub lambda_decrease: f64,
    /// Relative finite difference step size
    pub fd_step: f64,
}

impl Default for LevenbergMarquardtConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            gradient_tolerance: 1e-12,
            parameter_tolerance: 1e-12,
            residual_tolerance: 1e-16,
            initial_lambda: 1e-3,
            lambda_increase: 10.0,
            lambda_decrease: 0.1,
            fd_step: 1e-7,
        }
    }
}

/// Levenberg-Marquardt solver for nonlinear least squares problems.
///
/// Minimises the sum of squared residuals `Σ r_i(x)²` with a forward
/// difference Jacobian.
///
/// # Example
///
/// ```
/// use pricer_optimiser::solvers::LevenbergMarquardt;
///
/// // Fit y = a e^{b x} to three exact points
/// let data = [(0.0, 2.0), (1.0, 2.0 * 0.5_f64.exp()), (2.0, 2.0 * 1.0_f64.exp())];
/// let result = LevenbergMarquardt::new()
///     .solve(&[1.0, 0.1], |p| data.iter().map(|(x, y)| p[0] * (p[1] * x).exp() - y).collect())
///     .unwrap();
/// assert!((result.parameters[0] - 2.0).abs() < 1e-6);
/// assert!((result.parameters[1] - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LevenbergMarquardt {
    config: LevenbergMarquardtConfig,
}

impl LevenbergMarquardt {
    /// Create a new solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new solver with custom configuration.
    pub fn with_config(config: LevenbergMarquardtConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LevenbergMarquardtConfig {
        &self.config
    }

    /// Solve a nonlinear least squares problem.
    ///
    /// # Arguments
    ///
    /// * `initial` - Initial parameter guess
    /// * `residuals` - Function that computes residual vector given parameters
    ///
    /// # Errors
    ///
    /// `ConvergenceFailure` when no stopping criterion is met within
    /// `max_iterations`, `NumericalInstability` when the residuals at the
    /// initial guess are not finite.
    #[allow(clippy::needless_range_loop)]
    pub fn solve<F>(
        &self,
        initial: &[f64],
        residuals: F,
    ) -> Result<OptimisationResult, OptimiserError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let n = initial.len();
        if n == 0 {
            return Err(OptimiserError::DimensionMismatch(
                "no parameters to optimise".to_string(),
            ));
        }

        let mut x = initial.to_vec();
        let mut r = residuals(&x);
        let mut func_evals = 1;
        let m = r.len();
        let mut ssr = sum_of_squares(&r);
        if !ssr.is_finite() {
            return Err(OptimiserError::NumericalInstability(format!(
                "non-finite residuals at initial guess {:?}",
                initial
            )));
        }

        let mut lambda = self.config.initial_lambda;
        let done = |x: Vec<f64>, ssr: f64, iterations: usize, evals: usize| OptimisationResult {
            parameters: x,
            objective: ssr,
            iterations,
            function_evaluations: evals,
            converged: true,
        };

        for iteration in 0..self.config.max_iterations {
            if ssr <= self.config.residual_tolerance {
                return Ok(done(x, ssr, iteration, func_evals));
            }

            // Forward difference Jacobian, step scaled to the parameter
            let mut j = vec![vec![0.0; n]; m];
            for k in 0..n {
                let h = self.config.fd_step * x[k].abs().max(1.0);
                let mut x_plus = x.clone();
                x_plus[k] += h;
                let r_plus = residuals(&x_plus);
                func_evals += 1;
                if r_plus.len() != m {
                    return Err(OptimiserError::DimensionMismatch(format!(
                        "residual length changed from {} to {}",
                        m,
                        r_plus.len()
                    )));
                }
                for i in 0..m {
                    j[i][k] = (r_plus[i] - r[i]) / h;
                }
            }

            // Normal equations: (JᵀJ + λ diag(JᵀJ)) δ = −Jᵀr
            let mut jtj = vec![vec![0.0; n]; n];
            let mut jtr = vec![0.0; n];
            for i in 0..n {
                for k in 0..n {
                    for l in 0..m {
                        jtj[i][k] += j[l][i] * j[l][k];
                    }
                }
                for l in 0..m {
                    jtr[i] += j[l][i] * r[l];
                }
            }

            let gradient_norm = jtr.iter().fold(0.0_f64, |acc, g| acc.max(g.abs()));
            if gradient_norm <= self.config.gradient_tolerance {
                return Ok(done(x, ssr, iteration, func_evals));
            }

            let mut damped = jtj.clone();
            for i in 0..n {
                damped[i][i] += lambda * jtj[i][i].max(1e-12);
            }
            let rhs: Vec<f64> = jtr.iter().map(|v| -v).collect();
            let step = solve_linear_system(&damped, &rhs)?;

            let step_norm: f64 = step.iter().map(|s| s * s).sum::<f64>().sqrt();
            if step_norm <= self.config.parameter_tolerance * (1.0 + norm(&x)) {
                return Ok(done(x, ssr, iteration, func_evals));
            }

            let x_new: Vec<f64> = x.iter().zip(step.iter()).map(|(xi, si)| xi + si).collect();
            let r_new = residuals(&x_new);
            func_evals += 1;
            let ssr_new = sum_of_squares(&r_new);

            trace!(iteration, ssr, ssr_new, lambda, "levenberg-marquardt step");

            // Non-finite trial residuals count as a rejected step
            if ssr_new.is_finite() && ssr_new < ssr {
                x = x_new;
                r = r_new;
                ssr = ssr_new;
                lambda *= self.config.lambda_decrease;
            } else {
                lambda *= self.config.lambda_increase;
            }
        }

        if ssr <= self.config.residual_tolerance {
            return Ok(done(x, ssr, self.config.max_iterations, func_evals));
        }
        Err(OptimiserError::ConvergenceFailure {
            iterations: self.config.max_iterations,
            residual: ssr,
        })
    }
}

fn sum_of_squares(r: &[f64]) -> f64 {
    r.iter().map(|ri| ri * ri).sum()
}

fn norm(x: &[f64]) -> f64 {
    sum_of_squares(x).sqrt()
}

/// Gaussian elimination with partial pivoting.
fn solve_linear_system(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>, OptimiserError> {
    let n = b.len();
    if a.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(OptimiserError::DimensionMismatch(format!(
            "expected a {}x{} matrix",
            n, n
        )));
    }

    let mut aug: Vec<Vec<f64>> = a
        .iter()
        .zip(b.iter())
        .map(|(row, bi)| {
            let mut new_row = row.clone();
            new_row.push(*bi);
            new_row
        })
        .collect();

    for i in 0..n {
        let max_row = (i..n)
            .max_by(|&p, &q| aug[p][i].abs().total_cmp(&aug[q][i].abs()))
            .unwrap_or(i);
        aug.swap(i, max_row);

        if aug[i][i].abs() < 1e-300 {
            return Err(OptimiserError::SingularMatrix);
        }

        for k in (i + 1)..n {
            let factor = aug[k][i] / aug[i][i];
            for j in i..=n {
                aug[k][j] -= factor * aug[i][j];
            }
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        x[i] = aug[i][n];
        for j in (i + 1)..n {
            x[i] -= aug[i][j] * x[j];
        }
        x[i] /= aug[i][i];
    }

    Ok(x)
}
