//! Natural cubic spline interpolation.

use super::{constant, find_segment, out_of_bounds, validate_nodes, Interpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Natural cubic spline: C2 through every node with zero second derivative
/// at both ends.
///
/// Outside the domain the spline is continued linearly with the end slope,
/// which keeps the continuation C2 because the end curvature is zero.
///
/// Applied to the logarithm of discount factors this reproduces the
/// "natural log-cubic discount" curve used for Treasury par curves.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{CubicSplineInterpolator, Interpolator};
///
/// let xs = [0.0_f64, 1.0, 2.0, 3.0];
/// let ys = [0.0_f64, 1.0, 8.0, 27.0];
/// let spline = CubicSplineInterpolator::new(&xs, &ys).unwrap();
/// assert!((spline.interpolate(2.0).unwrap() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    /// Second derivatives at the nodes
    curvatures: Vec<T>,
}

impl<T: Float> CubicSplineInterpolator<T> {
    /// Build a natural spline. Requires at least two points and strictly
    /// increasing `xs`; with two points the spline is a straight line.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        validate_nodes(xs, ys)?;
        let curvatures = natural_curvatures(xs, ys);
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            curvatures,
        })
    }

    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Second derivatives at the nodes.
    #[inline]
    pub fn curvatures(&self) -> &[T] {
        &self.curvatures
    }

    /// Coefficients `(a, b, c, d)` of segment `i` in `a + b u + c u² + d u³`, `u = x - xs[i]`.
    fn coefficients(&self, i: usize) -> (T, T, T, T) {
        let two = constant::<T>(2.0);
        let six = constant::<T>(6.0);
        let h = self.xs[i + 1] - self.xs[i];
        let (m0, m1) = (self.curvatures[i], self.curvatures[i + 1]);

        let a = self.ys[i];
        let b = (self.ys[i + 1] - self.ys[i]) / h - h * (two * m0 + m1) / six;
        let c = m0 / two;
        let d = (m1 - m0) / (six * h);
        (a, b, c, d)
    }

    fn end_slope(&self, left: bool) -> T {
        let last = self.xs.len() - 2;
        if left {
            self.coefficients(0).1
        } else {
            let (_, b, c, d) = self.coefficients(last);
            let h = self.xs[last + 1] - self.xs[last];
            b + constant::<T>(2.0) * c * h + constant::<T>(3.0) * d * h * h
        }
    }
}

/// Solve the tridiagonal system for the interior second derivatives
/// (Thomas algorithm); the end values are zero.
fn natural_curvatures<T: Float>(xs: &[T], ys: &[T]) -> Vec<T> {
    let n = xs.len();
    let mut m = vec![T::zero(); n];
    if n < 3 {
        return m;
    }

    let two = constant::<T>(2.0);
    let six = constant::<T>(6.0);
    let h: Vec<T> = xs.windows(2).map(|w| w[1] - w[0]).collect();

    // Unknowns m[1..n-1]; row k corresponds to node k + 1.
    let size = n - 2;
    let mut diag = Vec::with_capacity(size);
    let mut upper = Vec::with_capacity(size);
    let mut rhs = Vec::with_capacity(size);
    for i in 1..n - 1 {
        diag.push(two * (h[i - 1] + h[i]));
        upper.push(h[i]);
        rhs.push(six * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]));
    }

    // Forward sweep; the sub-diagonal entry of row k is h[k].
    for k in 1..size {
        let w = h[k] / diag[k - 1];
        diag[k] = diag[k] - w * upper[k - 1];
        rhs[k] = rhs[k] - w * rhs[k - 1];
    }

    // Back substitution
    m[size] = rhs[size - 1] / diag[size - 1];
    for k in (0..size - 1).rev() {
        m[k + 1] = (rhs[k] - upper[k] * m[k + 2]) / diag[k];
    }

    m
}

impl<T: Float> Interpolator<T> for CubicSplineInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        if !self.contains(x) {
            let (min, max) = self.domain();
            return Err(out_of_bounds(x, min, max));
        }
        Ok(self.extrapolate(x))
    }

    fn extrapolate(&self, x: T) -> T {
        let (x_min, x_max) = self.domain();
        if x < x_min {
            return self.ys[0] + self.end_slope(true) * (x - x_min);
        }
        if x > x_max {
            return self.ys[self.ys.len() - 1] + self.end_slope(false) * (x - x_max);
        }

        let i = find_segment(&self.xs, x);
        let (a, b, c, d) = self.coefficients(i);
        let u = x - self.xs[i];
        a + u * (b + u * (c + u * d))
    }

    fn derivative(&self, x: T) -> T {
        let (x_min, x_max) = self.domain();
        if x < x_min {
            return self.end_slope(true);
        }
        if x > x_max {
            return self.end_slope(false);
        }

        let i = find_segment(&self.xs, x);
        let (_, b, c, d) = self.coefficients(i);
        let u = x - self.xs[i];
        b + u * (constant::<T>(2.0) * c + constant::<T>(3.0) * d * u)
    }

    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
