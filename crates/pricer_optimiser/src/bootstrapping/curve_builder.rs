//! Iterative discount curve bootstrapping from bond helpers.

use chrono::NaiveDate;
use pricer_core::math::solvers::{BrentSolver, SolverConfig};
use pricer_core::types::DayCountConvention;
use pricer_models::curves::{CurveInterpolation, InterpolatedDiscountCurve};
use tracing::{debug, info};

use super::{BootstrapResult, FixedRateBondHelper};
use crate::error::OptimiserError;

/// Configuration for curve bootstrapping.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Maximum number of full sweeps over the pillars
    pub max_iterations: usize,
    /// Sweeps stop once no discount factor moves by more than this
    pub tolerance: f64,
    /// Interpolation between pillars
    pub interpolation: CurveInterpolation,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-12,
            interpolation: CurveInterpolation::LogCubic,
        }
    }
}

/// Solves pillar discount factors so that every helper reprices to its quote.
#[derive(Debug, Clone, Default)]
pub struct CurveBootstrapper {
    config: BootstrapConfig,
}

impl CurveBootstrapper {
    /// Create a new curve bootstrapper with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new curve bootstrapper with custom configuration.
    pub fn with_config(config: BootstrapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstrap a discount curve anchored at `reference_date`.
    ///
    /// Helpers are sorted by maturity; each maturity becomes one pillar.
    /// With a local interpolation a single sweep is exact. With `LogCubic`,
    /// later pillars move earlier segments, so sweeps repeat over the full
    /// node set until the largest discount factor change is below
    /// `tolerance`.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` without helpers
    /// - `InvalidMarketData` for duplicate maturities or maturities on or
    ///   before the reference date
    /// - `ConvergenceFailure` when sweeps do not settle within `max_iterations`
    pub fn bootstrap(
        &self,
        reference_date: NaiveDate,
        helpers: &[FixedRateBondHelper],
        day_count: DayCountConvention,
    ) -> Result<BootstrapResult, OptimiserError> {
        if helpers.is_empty() {
            return Err(OptimiserError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let mut sorted: Vec<&FixedRateBondHelper> = helpers.iter().collect();
        sorted.sort_by_key(|h| h.maturity_date());
        for pair in sorted.windows(2) {
            if pair[0].maturity_date() == pair[1].maturity_date() {
                return Err(OptimiserError::InvalidMarketData(format!(
                    "helpers {} and {} share maturity {}",
                    pair[0].tenor(),
                    pair[1].tenor(),
                    pair[0].maturity_date()
                )));
            }
        }
        if let Some(first) = sorted.first() {
            if first.maturity_date() <= reference_date {
                return Err(OptimiserError::InvalidMarketData(format!(
                    "helper {} matures on {}, not after reference date {}",
                    first.tenor(),
                    first.maturity_date(),
                    reference_date
                )));
            }
        }

        let mut times = Vec::with_capacity(sorted.len() + 1);
        times.push(0.0);
        times.extend(
            sorted
                .iter()
                .map(|h| day_count.year_fraction(reference_date, h.maturity_date())),
        );

        // Initial guess: continuously compounded at each helper's coupon
        let mut discounts = vec![1.0; times.len()];
        for (k, helper) in sorted.iter().enumerate() {
            discounts[k + 1] = discounts[k] * (-helper.coupon() * (times[k + 1] - times[k])).exp();
        }

        let interpolation = self.config.interpolation;
        let solver = BrentSolver::new(SolverConfig::new(
            (self.config.tolerance * 1e-2).max(f64::EPSILON),
            200,
        ));
        let max_sweeps = if interpolation.is_local() {
            1
        } else {
            self.config.max_iterations.max(1)
        };

        let mut iterations = 0;
        let mut converged = false;
        let mut last_change = f64::INFINITY;
        while iterations < max_sweeps {
            let first_sweep = iterations == 0;
            iterations += 1;
            let mut max_change: f64 = 0.0;

            for (k, helper) in sorted.iter().enumerate() {
                let pillar = k + 1;
                // First sweep (and every sweep of a local scheme) sees only the pillars solved so far
                let active = if first_sweep || interpolation.is_local() {
                    pillar + 1
                } else {
                    times.len()
                };

                let objective = |df: f64| -> f64 {
                    let mut trial = discounts[..active].to_vec();
                    trial[pillar] = df;
                    build_curve(reference_date, day_count, &times[..active], trial, interpolation)
                        .and_then(|curve| helper.implied_clean_price(&curve))
                        .map(|price| price - helper.quote())
                        .unwrap_or(f64::NAN)
                };

                let guess = discounts[pillar];
                let solved = solver
                    .find_root_bracketed(objective, guess, 0.01 * guess, 1e-8, 2.0)
                    .map_err(|e| {
                        debug!(tenor = %helper.tenor(), error = %e, "pillar solve failed");
                        e
                    })?;

                max_change = max_change.max((solved - discounts[pillar]).abs());
                discounts[pillar] = solved;
            }

            debug!(sweep = iterations, max_change, "bootstrap sweep");
            last_change = max_change;
            if interpolation.is_local() || (!first_sweep && max_change <= self.config.tolerance) {
                converged = true;
                break;
            }
        }

        if !converged {
            return Err(OptimiserError::ConvergenceFailure {
                iterations,
                residual: last_change,
            });
        }

        let curve = build_curve(reference_date, day_count, &times, discounts, interpolation)?;
        let mut residual: f64 = 0.0;
        for helper in &sorted {
            residual = residual.max((helper.implied_clean_price(&curve)? - helper.quote()).abs());
        }

        info!(
            pillars = sorted.len(),
            interpolation = interpolation.name(),
            iterations,
            residual,
            "bootstrapped discount curve"
        );

        Ok(BootstrapResult {
            curve,
            residual,
            iterations,
        })
    }
}

fn build_curve(
    reference_date: NaiveDate,
    day_count: DayCountConvention,
    times: &[f64],
    discounts: Vec<f64>,
    interpolation: CurveInterpolation,
) -> Result<InterpolatedDiscountCurve, OptimiserError> {
    Ok(InterpolatedDiscountCurve::new(
        reference_date,
        day_count,
        times.to_vec(),
        discounts,
        interpolation,
    )?
    .with_extrapolation(true))
}
