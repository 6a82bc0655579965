use chrono::NaiveDate;
use pricer_core::types::{DayCountConvention, InterestRate};

use super::YieldTermStructure;
use crate::error::ModelError;

/// Curve with a single constant rate at every maturity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForward {
    reference_date: NaiveDate,
    rate: InterestRate,
}

impl FlatForward {
    pub fn new(reference_date: NaiveDate, rate: InterestRate) -> Self {
        Self {
            reference_date,
            rate,
        }
    }

    pub fn rate(&self) -> InterestRate {
        self.rate
    }
}

impl YieldTermStructure for FlatForward {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.rate.day_count()
    }

    fn discount(&self, t: f64) -> Result<f64, ModelError> {
        Ok(self.rate.discount_factor(t)?)
    }
}
