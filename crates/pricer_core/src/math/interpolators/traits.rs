//! Core traits for interpolation.

use crate::types::InterpolationError;
use num_traits::Float;

/// Generic trait for 1D interpolation.
///
/// # Contract
///
/// - `interpolate(x)` returns `Ok(y)` if `x` is within `domain()`
/// - `interpolate(x)` returns `Err(OutOfBounds)` if `x` is outside `domain()`
/// - `extrapolate(x)` never fails and agrees with `interpolate` inside the domain
/// - `domain()` returns `(x_min, x_max)` where `x_min < x_max`
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
/// assert!(interp.interpolate(2.0).is_err());
/// assert_eq!(interp.extrapolate(2.0), 4.0);
/// ```
pub trait Interpolator<T: Float> {
    /// Interpolate value at point `x`.
    ///
    /// # Returns
    ///
    /// * `Ok(y)` - The interpolated value at `x`
    /// * `Err(InterpolationError::OutOfBounds)` - If `x` is outside the valid domain
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Evaluate at `x`, extending the end segments outside the domain.
    fn extrapolate(&self, x: T) -> T;

    /// First derivative at `x` (end segments extended outside the domain).
    fn derivative(&self, x: T) -> T;

    /// Return the valid interpolation domain.
    fn domain(&self) -> (T, T);

    /// Whether `x` lies inside the domain (boundaries included).
    fn contains(&self, x: T) -> bool {
        let (x_min, x_max) = self.domain();
        x >= x_min && x <= x_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accept_dyn_interpolator(_: &dyn Interpolator<f64>) {}
    }

    struct DoublingInterpolator {
        x_min: f64,
        x_max: f64,
    }

    impl Interpolator<f64> for DoublingInterpolator {
        fn interpolate(&self, x: f64) -> Result<f64, InterpolationError> {
            if !self.contains(x) {
                return Err(InterpolationError::OutOfBounds {
                    x,
                    min: self.x_min,
                    max: self.x_max,
                });
            }
            Ok(self.extrapolate(x))
        }

        fn extrapolate(&self, x: f64) -> f64 {
            x * 2.0
        }

        fn derivative(&self, _x: f64) -> f64 {
            2.0
        }

        fn domain(&self) -> (f64, f64) {
            (self.x_min, self.x_max)
        }
    }

    #[test]
    fn test_contains_includes_boundaries() {
        let interp = DoublingInterpolator {
            x_min: 0.0,
            x_max: 10.0,
        };
        assert!(interp.contains(0.0));
        assert!(interp.contains(10.0));
        assert!(!interp.contains(10.000_001));
        assert!(!interp.contains(-0.5));
    }

    #[test]
    fn test_out_of_bounds_carries_domain() {
        let interp = DoublingInterpolator {
            x_min: 0.0,
            x_max: 10.0,
        };
        match interp.interpolate(-1.0) {
            Err(InterpolationError::OutOfBounds { x, min, max }) => {
                assert_eq!(x, -1.0);
                assert_eq!(min, 0.0);
                assert_eq!(max, 10.0);
            }
            other => panic!("Expected OutOfBounds error, got {:?}", other),
        }
    }
}
