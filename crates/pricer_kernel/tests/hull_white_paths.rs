//! Hull-White paths reproduce the initial discount curve on average.

use std::sync::Arc;

use chrono::NaiveDate;
use pricer_core::types::DayCountConvention;
use pricer_kernel::mc::{MonteCarloConfig, PathGenerator};
use pricer_models::curves::{CurveInterpolation, InterpolatedDiscountCurve, YieldTermStructure};
use pricer_models::short_rate::HullWhite;

fn upward_curve() -> InterpolatedDiscountCurve {
    let times = vec![0.0, 0.5, 1.0, 2.0, 5.0, 10.0];
    let zeros: [f64; 6] = [0.0, 0.030, 0.032, 0.035, 0.038, 0.040];
    let discounts = times
        .iter()
        .zip(zeros.iter())
        .map(|(t, z)| (-z * t).exp())
        .collect();
    InterpolatedDiscountCurve::new(
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        DayCountConvention::ActualActualIsda,
        times,
        discounts,
        CurveInterpolation::LogCubic,
    )
    .unwrap()
    .with_extrapolation(true)
}

#[test]
fn test_monte_carlo_discount_factors_match_curve() {
    let curve = Arc::new(upward_curve());
    let model = HullWhite::new(curve.clone(), 0.1, 0.01).unwrap();
    let process = model.process().unwrap();

    let config = MonteCarloConfig::builder()
        .n_paths(8_192)
        .n_steps(120)
        .horizon(10.0)
        .seed(2024)
        .build()
        .unwrap();
    let generator = PathGenerator::new(config).unwrap();
    let paths = generator.generate(&process).unwrap();
    let dfs = paths.discount_factors();

    for years in [1.0, 2.0, 5.0, 10.0] {
        let j = generator.grid().closest_index(years);
        let expected = curve.discount(years).unwrap();
        // The drift uses an annually compounded forward, which biases rates slightly upwards
        assert!(
            (dfs[j] / expected - 1.0).abs() < 1.5e-2,
            "t = {}: MC {} vs curve {}",
            years,
            dfs[j],
            expected
        );
    }
}

#[test]
fn test_mean_path_tracks_alpha() {
    let curve = Arc::new(upward_curve());
    let model = HullWhite::new(curve, 0.1, 0.01).unwrap();
    let process = model.process().unwrap();

    let config = MonteCarloConfig::builder()
        .n_paths(8_192)
        .n_steps(60)
        .horizon(5.0)
        .seed(99)
        .build()
        .unwrap();
    let generator = PathGenerator::new(config).unwrap();
    let paths = generator.generate(&process).unwrap();
    let mean = paths.mean_path();

    for (t, m) in paths.times().iter().zip(&mean).step_by(12) {
        let alpha = model.alpha(*t).unwrap();
        assert!((m - alpha).abs() < 1e-3, "t = {}: mean {} vs alpha {}", t, m, alpha);
    }
}
