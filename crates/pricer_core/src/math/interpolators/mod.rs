//! Interpolation methods for curve construction.
//!
//! - [`LinearInterpolator`]: piecewise linear
//! - [`CubicSplineInterpolator`]: natural cubic spline (zero curvature at both ends)
//!
//! Both require at least two points with strictly increasing abscissae and
//! implement the [`Interpolator`] trait.

mod cubic_spline;
mod linear;
mod traits;

pub use cubic_spline::CubicSplineInterpolator;
pub use linear::LinearInterpolator;
pub use traits::Interpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// Convert an `f64` literal into `T`.
#[inline]
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Validate interpolation nodes: equal lengths, at least two points,
/// finite values and strictly increasing abscissae.
pub(crate) fn validate_nodes<T: Float>(xs: &[T], ys: &[T]) -> Result<(), InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }

    if xs.len() < 2 {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need: 2,
        });
    }

    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return Err(InterpolationError::InvalidInput(
            "interpolation nodes must be finite".to_string(),
        ));
    }

    if let Some(index) = (1..xs.len()).find(|&i| xs[i] <= xs[i - 1]) {
        return Err(InterpolationError::NonIncreasingAbscissae { index });
    }

    Ok(())
}

/// Index `i` of the segment `[xs[i], xs[i+1]]` used for `x`.
///
/// Points left of the domain map to the first segment and points right of
/// it to the last one.
#[inline]
pub(crate) fn find_segment<T: Float>(xs: &[T], x: T) -> usize {
    let pos = xs.partition_point(|&xi| xi <= x);
    if pos == 0 {
        0
    } else if pos >= xs.len() {
        xs.len() - 2
    } else {
        pos - 1
    }
}

pub(crate) fn out_of_bounds<T: Float>(x: T, min: T, max: T) -> InterpolationError {
    InterpolationError::OutOfBounds {
        x: x.to_f64().unwrap_or(f64::NAN),
        min: min.to_f64().unwrap_or(f64::NAN),
        max: max.to_f64().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_segment_interior_and_edges() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(find_segment(&xs, -1.0), 0);
        assert_eq!(find_segment(&xs, 0.0), 0);
        assert_eq!(find_segment(&xs, 1.5), 1);
        assert_eq!(find_segment(&xs, 2.0), 2);
        assert_eq!(find_segment(&xs, 3.0), 2);
        assert_eq!(find_segment(&xs, 9.0), 2);
    }

    #[test]
    fn test_validate_nodes_rejects_unsorted() {
        let result = validate_nodes(&[0.0, 2.0, 1.0], &[1.0, 2.0, 3.0]);
        assert_eq!(
            result,
            Err(InterpolationError::NonIncreasingAbscissae { index: 2 })
        );
    }

    #[test]
    fn test_validate_nodes_rejects_duplicates() {
        let result = validate_nodes(&[0.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(InterpolationError::NonIncreasingAbscissae { index: 2 })
        ));
    }

    #[test]
    fn test_validate_nodes_rejects_nan() {
        let result = validate_nodes(&[0.0, 1.0], &[1.0, f64::NAN]);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }
}
