//! Error types for rate arithmetic, interpolation and root finding.

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Computation failed to converge
/// - `ModelFailure`: Model assumptions violated
/// - `UnsupportedInstrument`: Instrument type not supported by model
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative year fraction".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative year fraction");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Model failed to produce valid result
    #[error("Model failure: {0}")]
    ModelFailure(String),

    /// Instrument type not supported
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),
}

/// Errors raised by interpolators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point lies outside the interpolation domain
    #[error("Point {x} is outside the interpolation domain [{min}, {max}]")]
    OutOfBounds { x: f64, min: f64, max: f64 },

    /// Not enough data points to build the interpolator
    #[error("Insufficient data: got {got} points, need at least {need}")]
    InsufficientData { got: usize, need: usize },

    /// Malformed input (length mismatch, non-finite values)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Abscissae must be strictly increasing
    #[error("Abscissae must be strictly increasing (violated at index {index})")]
    NonIncreasingAbscissae { index: usize },
}

/// Errors raised by the one-dimensional root solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Iteration budget exhausted
    #[error("Maximum iterations ({iterations}) exceeded, last estimate {last}")]
    MaxIterationsExceeded { iterations: usize, last: f64 },

    /// The supplied interval does not bracket a root
    #[error("No sign change in [{a}, {b}]: f(a) = {fa}, f(b) = {fb}")]
    NoBracket { a: f64, b: f64, fa: f64, fb: f64 },

    /// Newton step undefined
    #[error("Derivative too small at x = {x}")]
    DerivativeTooSmall { x: f64 },

    /// The objective returned NaN or infinity
    #[error("Objective is not finite at x = {x}")]
    NonFinite { x: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = PricingError::InvalidInput("Test error".to_string());
        assert_eq!(format!("{}", err), "Invalid input: Test error");
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = PricingError::NumericalInstability("Failed to converge".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: Failed to converge");
    }

    #[test]
    fn test_model_failure_display() {
        let err = PricingError::ModelFailure("Negative discount factor".to_string());
        assert_eq!(format!("{}", err), "Model failure: Negative discount factor");
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = InterpolationError::OutOfBounds {
            x: 11.0,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Point 11 is outside the interpolation domain [0, 10]"
        );
    }

    #[test]
    fn test_no_bracket_display() {
        let err = SolverError::NoBracket {
            a: 0.0,
            b: 1.0,
            fa: 1.0,
            fb: 2.0,
        };
        assert!(err.to_string().starts_with("No sign change in [0, 1]"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::InvalidInput("Test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
