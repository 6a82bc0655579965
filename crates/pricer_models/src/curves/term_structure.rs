//! The yield term structure abstraction.

use chrono::NaiveDate;
use pricer_core::types::{Compounding, DayCountConvention, Frequency, InterestRate};

use crate::error::ModelError;

/// Smallest time span used when a rate is requested over a zero-length interval.
pub(crate) const MIN_RATE_TIME: f64 = 1e-4;

/// A discount curve anchored at a reference date.
///
/// Implementors supply [`discount`](Self::discount); rates are derived from it.
/// Times are year fractions from `reference_date()` under `day_count()`.
pub trait YieldTermStructure {
    /// Date at which discount factors equal one.
    fn reference_date(&self) -> NaiveDate;

    /// Day count used to turn dates into times.
    fn day_count(&self) -> DayCountConvention;

    /// Discount factor for time `t` (years).
    fn discount(&self, t: f64) -> Result<f64, ModelError>;

    /// Year fraction from the reference date to `date`.
    fn time_from_reference(&self, date: NaiveDate) -> Result<f64, ModelError> {
        let reference = self.reference_date();
        if date < reference {
            return Err(ModelError::InvalidCurve(format!(
                "date {} precedes reference date {}",
                date, reference
            )));
        }
        Ok(self.day_count().year_fraction(reference, date))
    }

    fn discount_date(&self, date: NaiveDate) -> Result<f64, ModelError> {
        self.discount(self.time_from_reference(date)?)
    }

    /// Zero rate to time `t`. A zero `t` is replaced by a short positive time.
    fn zero_rate(
        &self,
        t: f64,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<InterestRate, ModelError> {
        let t = if t == 0.0 { MIN_RATE_TIME } else { t };
        let compound = 1.0 / self.discount(t)?;
        Ok(InterestRate::implied_rate(
            compound,
            self.day_count(),
            compounding,
            frequency,
            t,
        )?)
    }

    /// Forward rate between `t1` and `t2` implied by `D(t1) / D(t2)`.
    fn forward_rate(
        &self,
        t1: f64,
        t2: f64,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<InterestRate, ModelError> {
        if t2 < t1 {
            return Err(ModelError::InvalidCurve(format!(
                "forward start {} is after forward end {}",
                t1, t2
            )));
        }
        let t2 = if t2 == t1 { t1 + MIN_RATE_TIME } else { t2 };
        let compound = self.discount(t1)? / self.discount(t2)?;
        Ok(InterestRate::implied_rate(
            compound,
            self.day_count(),
            compounding,
            frequency,
            t2 - t1,
        )?)
    }
}

impl<T: YieldTermStructure + ?Sized> YieldTermStructure for &T {
    fn reference_date(&self) -> NaiveDate {
        (**self).reference_date()
    }

    fn day_count(&self) -> DayCountConvention {
        (**self).day_count()
    }

    fn discount(&self, t: f64) -> Result<f64, ModelError> {
        (**self).discount(t)
    }
}
