//! Tenors such as `1D`, `6W`, `3M` and `10Y`.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};

use crate::error::MasterDataError;

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    fn suffix(&self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }
}

/// A signed length of calendar time.
///
/// # Example
///
/// ```
/// use infra_master::{Period, TimeUnit};
///
/// let p: Period = "10Y".parse().unwrap();
/// assert_eq!(p, Period::new(10, TimeUnit::Years));
/// assert_eq!(p.to_string(), "10Y");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    length: i32,
    unit: TimeUnit,
}

impl Period {
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    pub const fn days(length: i32) -> Self {
        Self::new(length, TimeUnit::Days)
    }

    pub const fn weeks(length: i32) -> Self {
        Self::new(length, TimeUnit::Weeks)
    }

    pub const fn months(length: i32) -> Self {
        Self::new(length, TimeUnit::Months)
    }

    pub const fn years(length: i32) -> Self {
        Self::new(length, TimeUnit::Years)
    }

    #[inline]
    pub fn length(&self) -> i32 {
        self.length
    }

    #[inline]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// This period multiplied by `factor`.
    pub fn times(&self, factor: i32) -> Self {
        Self::new(self.length * factor, self.unit)
    }

    /// Approximate length in years, used for ordering tenors.
    pub fn approx_years(&self) -> f64 {
        let n = self.length as f64;
        match self.unit {
            TimeUnit::Days => n / 365.25,
            TimeUnit::Weeks => n * 7.0 / 365.25,
            TimeUnit::Months => n / 12.0,
            TimeUnit::Years => n,
        }
    }

    /// Shift `date` by this period in calendar time (no holiday adjustment).
    ///
    /// Month and year shifts clamp to the end of the target month, so
    /// 31 January + 1M is the last day of February.
    pub fn apply(&self, date: NaiveDate) -> Result<NaiveDate, MasterDataError> {
        let shifted = match self.unit {
            TimeUnit::Days => shift_days(date, self.length as i64),
            TimeUnit::Weeks => shift_days(date, 7 * self.length as i64),
            TimeUnit::Months => shift_months(date, self.length),
            TimeUnit::Years => shift_months(date, 12 * self.length),
        };
        shifted.ok_or_else(|| {
            MasterDataError::InvalidDate(format!("{} shifted by {} is out of range", date, self))
        })
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = MasterDataError;

    /// Parse `<integer><unit>` where unit is one of `D`, `W`, `M`, `Y`
    /// (case-insensitive), e.g. `"3M"` or `"30y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || MasterDataError::InvalidPeriod(s.to_string());

        let mut chars = trimmed.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TimeUnit::Days,
            Some('W') => TimeUnit::Weeks,
            Some('M') => TimeUnit::Months,
            Some('Y') => TimeUnit::Years,
            _ => return Err(invalid()),
        };

        let length: i32 = chars.as_str().parse().map_err(|_| invalid())?;
        Ok(Self::new(length, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("1D".parse::<Period>().unwrap(), Period::days(1));
        assert_eq!("6w".parse::<Period>().unwrap(), Period::weeks(6));
        assert_eq!("3M".parse::<Period>().unwrap(), Period::months(3));
        assert_eq!(" 30Y ".parse::<Period>().unwrap(), Period::years(30));
        assert_eq!("-2M".parse::<Period>().unwrap(), Period::months(-2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "M", "1X", "1_5M", "Y10", "1.5Y"] {
            assert!(
                matches!(bad.parse::<Period>(), Err(MasterDataError::InvalidPeriod(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_month_shift_clamps_to_month_end() {
        assert_eq!(Period::months(1).apply(date(2024, 1, 31)).unwrap(), date(2024, 2, 29));
        assert_eq!(Period::years(1).apply(date(2024, 2, 29)).unwrap(), date(2025, 2, 28));
        assert_eq!(Period::months(-6).apply(date(2024, 8, 31)).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_week_and_day_shifts() {
        assert_eq!(Period::weeks(6).apply(date(2025, 3, 3)).unwrap(), date(2025, 4, 14));
        assert_eq!(Period::days(-3).apply(date(2025, 3, 3)).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_approx_years_orders_tenors() {
        let mut tenors: Vec<Period> = ["10Y", "1M", "6W", "2Y", "3M"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        tenors.sort_by(|a, b| a.approx_years().total_cmp(&b.approx_years()));
        let labels: Vec<String> = tenors.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["1M", "6W", "3M", "2Y", "10Y"]);
    }
}
