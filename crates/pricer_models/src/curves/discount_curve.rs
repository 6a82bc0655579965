//! Discount curve interpolated between pillar discount factors.

use chrono::NaiveDate;
use pricer_core::math::interpolators::{CubicSplineInterpolator, Interpolator, LinearInterpolator};
use pricer_core::types::DayCountConvention;

use super::YieldTermStructure;
use crate::error::ModelError;

/// Interpolation scheme between curve pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurveInterpolation {
    /// Linear on discount factors
    Linear,
    /// Linear on log discount factors (piecewise flat forwards)
    LogLinear,
    /// Natural cubic spline on log discount factors
    #[default]
    LogCubic,
}

impl CurveInterpolation {
    /// Whether moving one pillar changes the curve beyond its neighbouring segments.
    pub fn is_local(&self) -> bool {
        !matches!(self, CurveInterpolation::LogCubic)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CurveInterpolation::Linear => "linear",
            CurveInterpolation::LogLinear => "log-linear",
            CurveInterpolation::LogCubic => "log-cubic",
        }
    }
}

impl std::str::FromStr for CurveInterpolation {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(CurveInterpolation::Linear),
            "log-linear" | "loglinear" => Ok(CurveInterpolation::LogLinear),
            "log-cubic" | "logcubic" => Ok(CurveInterpolation::LogCubic),
            other => Err(ModelError::InvalidCurve(format!(
                "unknown interpolation '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum Interpolant {
    Discount(LinearInterpolator<f64>),
    LogLinear(LinearInterpolator<f64>),
    LogCubic(CubicSplineInterpolator<f64>),
}

impl Interpolant {
    fn build(
        scheme: CurveInterpolation,
        times: &[f64],
        discounts: &[f64],
    ) -> Result<Self, ModelError> {
        let log_discounts = || discounts.iter().map(|d| d.ln()).collect::<Vec<_>>();
        Ok(match scheme {
            CurveInterpolation::Linear => {
                Interpolant::Discount(LinearInterpolator::new(times, discounts)?)
            }
            CurveInterpolation::LogLinear => {
                Interpolant::LogLinear(LinearInterpolator::new(times, &log_discounts())?)
            }
            CurveInterpolation::LogCubic => {
                Interpolant::LogCubic(CubicSplineInterpolator::new(times, &log_discounts())?)
            }
        })
    }

    fn discount(&self, t: f64) -> Result<f64, ModelError> {
        Ok(match self {
            Interpolant::Discount(interp) => interp.interpolate(t)?,
            Interpolant::LogLinear(interp) => interp.interpolate(t)?.exp(),
            Interpolant::LogCubic(interp) => interp.interpolate(t)?.exp(),
        })
    }
}

/// Discount curve through `(time, discount factor)` pillars.
///
/// The first pillar is the reference date (`t = 0`, `D = 1`). With
/// extrapolation enabled, the log discount factor continues linearly past the
/// last pillar at the average forward rate of the last segment.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::DayCountConvention;
/// use pricer_models::curves::{CurveInterpolation, InterpolatedDiscountCurve, YieldTermStructure};
///
/// let reference = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
/// let curve = InterpolatedDiscountCurve::new(
///     reference,
///     DayCountConvention::Actual365Fixed,
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.96, 0.92],
///     CurveInterpolation::LogLinear,
/// )
/// .unwrap();
/// assert!((curve.discount(1.0).unwrap() - 0.96).abs() < 1e-12);
/// assert!(curve.discount(3.0).is_err());
/// assert!(curve.with_extrapolation(true).discount(3.0).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDiscountCurve {
    reference_date: NaiveDate,
    day_count: DayCountConvention,
    times: Vec<f64>,
    discounts: Vec<f64>,
    interpolation: CurveInterpolation,
    interpolant: Interpolant,
    extrapolate: bool,
}

impl InterpolatedDiscountCurve {
    /// Build a curve from pillar times and discount factors.
    ///
    /// # Errors
    ///
    /// `InvalidCurve` unless `times[0] == 0`, `discounts[0] == 1`, times are
    /// strictly increasing and all discount factors are positive and finite.
    pub fn new(
        reference_date: NaiveDate,
        day_count: DayCountConvention,
        times: Vec<f64>,
        discounts: Vec<f64>,
        interpolation: CurveInterpolation,
    ) -> Result<Self, ModelError> {
        if times.len() != discounts.len() {
            return Err(ModelError::InvalidCurve(format!(
                "{} times but {} discount factors",
                times.len(),
                discounts.len()
            )));
        }
        if times.len() < 2 {
            return Err(ModelError::InvalidCurve(format!(
                "need at least 2 pillars, got {}",
                times.len()
            )));
        }
        if times[0] != 0.0 || discounts[0] != 1.0 {
            return Err(ModelError::InvalidCurve(
                "first pillar must be (0, 1)".to_string(),
            ));
        }
        if let Some(i) = times.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(ModelError::InvalidCurve(format!(
                "pillar times must be strictly increasing (index {})",
                i + 1
            )));
        }
        if let Some(d) = discounts.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
            return Err(ModelError::InvalidCurve(format!(
                "discount factors must be positive and finite, got {}",
                d
            )));
        }

        let interpolant = Interpolant::build(interpolation, &times, &discounts)?;
        Ok(Self {
            reference_date,
            day_count,
            times,
            discounts,
            interpolation,
            interpolant,
            extrapolate: false,
        })
    }

    /// Build a curve from pillar dates; the reference date pillar is prepended.
    pub fn from_dates(
        reference_date: NaiveDate,
        day_count: DayCountConvention,
        dates: &[NaiveDate],
        discounts: &[f64],
        interpolation: CurveInterpolation,
    ) -> Result<Self, ModelError> {
        if dates.len() != discounts.len() {
            return Err(ModelError::InvalidCurve(format!(
                "{} dates but {} discount factors",
                dates.len(),
                discounts.len()
            )));
        }
        let mut times = Vec::with_capacity(dates.len() + 1);
        times.push(0.0);
        for date in dates {
            if *date <= reference_date {
                return Err(ModelError::InvalidCurve(format!(
                    "pillar date {} is not after reference date {}",
                    date, reference_date
                )));
            }
            times.push(day_count.year_fraction(reference_date, *date));
        }
        let mut dfs = Vec::with_capacity(discounts.len() + 1);
        dfs.push(1.0);
        dfs.extend_from_slice(discounts);
        Self::new(reference_date, day_count, times, dfs, interpolation)
    }

    pub fn with_extrapolation(mut self, enabled: bool) -> Self {
        self.extrapolate = enabled;
        self
    }

    pub fn enable_extrapolation(&mut self) {
        self.extrapolate = true;
    }

    pub fn allows_extrapolation(&self) -> bool {
        self.extrapolate
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn discounts(&self) -> &[f64] {
        &self.discounts
    }

    pub fn interpolation(&self) -> CurveInterpolation {
        self.interpolation
    }

    /// Time of the last pillar.
    pub fn max_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// `(time, discount factor)` pillars.
    pub fn nodes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.discounts.iter().copied())
    }

    fn extrapolate_discount(&self, t: f64) -> f64 {
        let n = self.times.len() - 1;
        let (t0, t1) = (self.times[n - 1], self.times[n]);
        let (ln0, ln1) = (self.discounts[n - 1].ln(), self.discounts[n].ln());
        let forward = (ln0 - ln1) / (t1 - t0);
        (ln1 - forward * (t - t1)).exp()
    }
}

impl YieldTermStructure for InterpolatedDiscountCurve {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn discount(&self, t: f64) -> Result<f64, ModelError> {
        if !(t >= 0.0) {
            return Err(ModelError::OutOfRange {
                t,
                max: self.max_time(),
            });
        }
        if t <= self.max_time() {
            return self.interpolant.discount(t);
        }
        if self.extrapolate {
            Ok(self.extrapolate_discount(t))
        } else {
            Err(ModelError::OutOfRange {
                t,
                max: self.max_time(),
            })
        }
    }
}
