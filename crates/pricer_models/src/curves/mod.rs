//! Yield term structures.
//!
//! - [`YieldTermStructure`]: discount factors, zero and forward rates
//! - [`InterpolatedDiscountCurve`]: pillars joined by a [`CurveInterpolation`]
//! - [`FlatForward`]: constant rate

mod discount_curve;
mod flat_forward;
mod term_structure;

pub use discount_curve::{CurveInterpolation, InterpolatedDiscountCurve};
pub use flat_forward::FlatForward;
pub use term_structure::YieldTermStructure;
