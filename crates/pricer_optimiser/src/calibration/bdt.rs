//! Black-Derman-Toy tree calibration to zero yields and volatilities.

use std::collections::BTreeMap;

use pricer_models::lattice::{BdtQuote, BdtTree};
use tracing::{debug, info, warn};

use crate::error::OptimiserError;
use crate::solvers::{LevenbergMarquardt, LevenbergMarquardtConfig};

/// Configuration for BDT calibration.
#[derive(Debug, Clone)]
pub struct BdtCalibratorConfig {
    /// Solver settings for each level
    pub solver: LevenbergMarquardtConfig,
    /// Maximum accepted zero price error, per unit of face
    pub tolerance: f64,
    /// Face amount of the zero-coupon bonds being matched
    pub face: f64,
}

impl Default for BdtCalibratorConfig {
    fn default() -> Self {
        Self {
            solver: LevenbergMarquardtConfig {
                max_iterations: 200,
                residual_tolerance: 1e-24,
                ..Default::default()
            },
            tolerance: 1e-10,
            face: 100.0,
        }
    }
}

/// Builds a BDT tree level by level so that it reprices each zero-coupon bond.
///
/// Level `t` is calibrated to the `t + 1` year bond using the volatility
/// quoted for that tenor. Only the lowest rate of each level is solved for;
/// the rest follow from the volatility spacing.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use pricer_models::lattice::BdtQuote;
/// use pricer_optimiser::calibration::BdtCalibrator;
///
/// let quotes = BTreeMap::from([
///     (1, BdtQuote::new(0.10, 0.20)),
///     (2, BdtQuote::new(0.11, 0.19)),
/// ]);
/// let tree = BdtCalibrator::new().calibrate(&quotes, 2).unwrap();
/// assert_eq!(tree.levels(), 2);
/// assert!((tree.zero_coupon_price(2, 100.0).unwrap() - 100.0 / 1.11_f64.powi(2)).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BdtCalibrator {
    config: BdtCalibratorConfig,
}

impl BdtCalibrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BdtCalibratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BdtCalibratorConfig {
        &self.config
    }

    /// Calibrate a tree with `max_tenor` one-year levels.
    ///
    /// # Errors
    ///
    /// - `InvalidMarketData` when `max_tenor` is zero, a tenor in
    ///   `1..=max_tenor` has no quote, or a quote is out of range
    /// - `ConvergenceFailure` when a level cannot reprice its bond
    pub fn calibrate(
        &self,
        quotes: &BTreeMap<u32, BdtQuote>,
        max_tenor: u32,
    ) -> Result<BdtTree, OptimiserError> {
        validate_quotes(quotes, max_tenor)?;

        info!(max_tenor, "calibrating BDT tree");
        for (tenor, quote) in quotes.range(1..=max_tenor) {
            info!(
                tenor,
                rate_pct = quote.rate * 100.0,
                vol_pct = quote.volatility * 100.0,
                "term structure input"
            );
        }

        let lm = LevenbergMarquardt::with_config(self.config.solver.clone());
        let mut tree = BdtTree::new();

        for tenor in 1..=max_tenor {
            let quote = quotes[&tenor];
            let level = (tenor - 1) as usize;
            let target = quote.zero_price(tenor, self.config.face) / self.config.face;

            if level == 0 {
                tree.push_level(vec![quote.rate])?;
                continue;
            }

            let state_prices = tree.state_prices(level)?;
            let model_price = |theta: f64| -> f64 {
                BdtTree::level_rates(theta.exp(), quote.volatility, level)
                    .iter()
                    .zip(&state_prices)
                    .map(|(r, q)| q / (1.0 + r))
                    .sum()
            };

            let guess = quote.rate.max(1e-6).ln();
            let solved = lm
                .solve(&[guess], |p| vec![model_price(p[0]) - target])
                .map_err(|e| {
                    warn!(level, tenor, error = %e, "BDT level failed to calibrate");
                    e
                })?;

            let theta = solved.parameters[0];
            let error = (model_price(theta) - target).abs();
            if !(error <= self.config.tolerance) {
                warn!(level, tenor, error, "BDT level failed to reprice its bond");
                return Err(OptimiserError::ConvergenceFailure {
                    iterations: solved.iterations,
                    residual: error,
                });
            }

            let base = theta.exp();
            debug!(level, base, iterations = solved.iterations, "calibrated BDT level");
            tree.push_level(BdtTree::level_rates(base, quote.volatility, level))?;
        }

        Ok(tree)
    }
}

fn validate_quotes(quotes: &BTreeMap<u32, BdtQuote>, max_tenor: u32) -> Result<(), OptimiserError> {
    if max_tenor == 0 {
        return Err(OptimiserError::InvalidMarketData(
            "max tenor must be at least 1".to_string(),
        ));
    }
    for tenor in 1..=max_tenor {
        let quote = quotes.get(&tenor).ok_or_else(|| {
            OptimiserError::InvalidMarketData(format!("no quote for tenor {}", tenor))
        })?;
        if !(quote.rate.is_finite() && quote.rate > -1.0) {
            return Err(OptimiserError::InvalidMarketData(format!(
                "rate {} for tenor {} must be finite and above -100%",
                quote.rate, tenor
            )));
        }
        if !(quote.volatility.is_finite() && quote.volatility >= 0.0) {
            return Err(OptimiserError::InvalidMarketData(format!(
                "volatility {} for tenor {} must be finite and non-negative",
                quote.volatility, tenor
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example_quotes() -> BTreeMap<u32, BdtQuote> {
        BTreeMap::from([
            (1, BdtQuote::new(0.10, 0.20)),
            (2, BdtQuote::new(0.11, 0.19)),
            (3, BdtQuote::new(0.12, 0.18)),
            (4, BdtQuote::new(0.125, 0.17)),
            (5, BdtQuote::new(0.13, 0.16)),
        ])
    }

    #[test]
    fn test_example_tree() {
        let tree = BdtCalibrator::new().calibrate(&example_quotes(), 5).unwrap();
        assert_eq!(tree.levels(), 5);

        let expected = [
            vec![10.0],
            vec![9.79156, 14.318047],
            vec![9.586159, 13.740124, 19.694124],
            vec![8.236142, 11.571347, 16.257136, 22.840424],
            vec![7.787174, 10.723933, 14.768226, 20.337734, 28.007659],
        ];
        for (t, level) in expected.iter().enumerate() {
            let rates = tree.level(t).unwrap();
            assert_eq!(rates.len(), t + 1);
            for (r, e) in rates.iter().zip(level) {
                assert_relative_eq!(r * 100.0, *e, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_reprices_every_zero() {
        let quotes = example_quotes();
        let tree = BdtCalibrator::new().calibrate(&quotes, 5).unwrap();
        for (tenor, quote) in &quotes {
            let price = tree.zero_coupon_price(*tenor as usize, 100.0).unwrap();
            assert_relative_eq!(price, quote.zero_price(*tenor, 100.0), epsilon = 1e-7);
        }
    }

    #[test]
    fn test_shorter_tree_ignores_extra_quotes() {
        let tree = BdtCalibrator::new().calibrate(&example_quotes(), 3).unwrap();
        assert_eq!(tree.levels(), 3);
        assert_relative_eq!(tree.rate(1, 0).unwrap(), 0.0979156, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_volatility_gives_flat_levels() {
        let quotes = BTreeMap::from([
            (1, BdtQuote::new(0.05, 0.0)),
            (2, BdtQuote::new(0.05, 0.0)),
            (3, BdtQuote::new(0.05, 0.0)),
        ]);
        let tree = BdtCalibrator::new().calibrate(&quotes, 3).unwrap();
        for t in 0..3 {
            for r in tree.level(t).unwrap() {
                assert_relative_eq!(*r, 0.05, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let calibrator = BdtCalibrator::new();
        let quotes = example_quotes();

        assert!(matches!(
            calibrator.calibrate(&quotes, 0),
            Err(OptimiserError::InvalidMarketData(_))
        ));
        assert!(matches!(
            calibrator.calibrate(&quotes, 6),
            Err(OptimiserError::InvalidMarketData(_))
        ));

        let mut bad_vol = quotes.clone();
        bad_vol.insert(2, BdtQuote::new(0.11, -0.1));
        assert!(matches!(
            calibrator.calibrate(&bad_vol, 3),
            Err(OptimiserError::InvalidMarketData(_))
        ));

        let mut bad_rate = quotes;
        bad_rate.insert(1, BdtQuote::new(-1.5, 0.2));
        assert!(matches!(
            calibrator.calibrate(&bad_rate, 1),
            Err(OptimiserError::InvalidMarketData(_))
        ));
    }
}
