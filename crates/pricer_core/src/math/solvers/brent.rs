//! Brent's method (bisection / secant / inverse quadratic interpolation).

use super::SolverConfig;
use crate::types::SolverError;

/// Bracketing root solver that needs no derivative.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::BrentSolver;
///
/// let solver = BrentSolver::default();
/// let root = solver.find_root(|x: f64| x.cos() - x, 0.0, 1.0).unwrap();
/// assert!((root - 0.739_085_133_215).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrentSolver {
    config: SolverConfig,
}

impl BrentSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a root of `f` in `[a, b]`. `f(a)` and `f(b)` must differ in sign.
    pub fn find_root<F>(&self, f: F, a: f64, b: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let fa = f(a);
        let fb = f(b);
        self.solve_bracketed(&f, a, fa, b, fb)
    }

    /// Find a root near `guess`, first growing a bracket of half-width `step`
    /// until the sign changes, without leaving `[lower, upper]`.
    pub fn find_root_bracketed<F>(
        &self,
        f: F,
        guess: f64,
        step: f64,
        lower: f64,
        upper: f64,
    ) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        const GROWTH: f64 = 1.6;

        let mut a = (guess - step).max(lower);
        let mut b = (guess + step).min(upper);
        let mut fa = f(a);
        let mut fb = f(b);

        for _ in 0..self.config.max_iterations {
            if !fa.is_finite() {
                return Err(SolverError::NonFinite { x: a });
            }
            if !fb.is_finite() {
                return Err(SolverError::NonFinite { x: b });
            }
            if fa * fb <= 0.0 {
                return self.solve_bracketed(&f, a, fa, b, fb);
            }

            let width = b - a;
            let can_go_down = a > lower;
            let can_go_up = b < upper;
            if !can_go_down && !can_go_up {
                break;
            }

            if (fa.abs() < fb.abs() && can_go_down) || !can_go_up {
                a = (a - GROWTH * width).max(lower);
                fa = f(a);
            } else {
                b = (b + GROWTH * width).min(upper);
                fb = f(b);
            }
        }

        Err(SolverError::NoBracket { a, b, fa, fb })
    }

    fn solve_bracketed<F>(
        &self,
        f: &F,
        a: f64,
        fa: f64,
        b: f64,
        fb: f64,
    ) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        if !fa.is_finite() {
            return Err(SolverError::NonFinite { x: a });
        }
        if !fb.is_finite() {
            return Err(SolverError::NonFinite { x: b });
        }
        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa * fb > 0.0 {
            return Err(SolverError::NoBracket { a, b, fa, fb });
        }

        let (mut a, mut fa, mut b, mut fb) = (a, fa, b, fb);
        let (mut c, mut fc) = (b, fb);
        let (mut d, mut e) = (b - a, b - a);

        for _ in 0..self.config.max_iterations {
            if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.config.tolerance;
            let xm = 0.5 * (c - b);
            if xm.abs() <= tol || fb == 0.0 {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                // Attempt inverse quadratic interpolation (secant when a == c)
                let s = fb / fa;
                let (mut p, mut q);
                if a == c {
                    p = 2.0 * xm * s;
                    q = 1.0 - s;
                } else {
                    let qa = fa / fc;
                    let r = fb / fc;
                    p = s * (2.0 * xm * qa * (qa - r) - (b - a) * (r - 1.0));
                    q = (qa - 1.0) * (r - 1.0) * (s - 1.0);
                }
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();

                let min1 = 3.0 * xm * q - (tol * q).abs();
                let min2 = (e * q).abs();
                if 2.0 * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol { d } else { tol.copysign(xm) };
            fb = f(b);
            if !fb.is_finite() {
                return Err(SolverError::NonFinite { x: b });
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last: b,
        })
    }
}
