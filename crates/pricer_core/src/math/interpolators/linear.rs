//! Piecewise linear interpolation.

use super::{find_segment, out_of_bounds, validate_nodes, Interpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator over strictly increasing abscissae.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
/// assert_eq!(interp.interpolate(1.5).unwrap(), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Build from nodes. Requires at least two points and strictly increasing `xs`.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        validate_nodes(xs, ys)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
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

    #[inline]
    fn slope(&self, i: usize) -> T {
        (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        if !self.contains(x) {
            let (min, max) = self.domain();
            return Err(out_of_bounds(x, min, max));
        }
        Ok(self.extrapolate(x))
    }

    fn extrapolate(&self, x: T) -> T {
        let i = find_segment(&self.xs, x);
        self.ys[i] + self.slope(i) * (x - self.xs[i])
    }

    fn derivative(&self, x: T) -> T {
        self.slope(find_segment(&self.xs, x))
    }

    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
