//! Holiday calendar definitions and business day rolling.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::MasterDataError;
use crate::period::{Period, TimeUnit};

/// Calendar identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarId {
    /// US government bond market (SIFMA recommended closures)
    UnitedStatesGovernmentBond,
    /// Weekend only (Saturday/Sunday)
    WeekendOnly,
}

/// Rule for rolling a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// First business day after
    Following,
    /// Following, unless that crosses into the next month, then Preceding
    #[default]
    ModifiedFollowing,
    /// Last business day before
    Preceding,
    /// Preceding, unless that crosses into the previous month, then Following
    ModifiedPreceding,
    /// No adjustment
    Unadjusted,
}

/// Holiday calendar for business day calculations.
#[derive(Debug, Clone)]
pub struct Calendar {
    id: CalendarId,
}

impl Calendar {
    /// Get a calendar by identifier.
    pub fn get(id: CalendarId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> CalendarId {
        self.id
    }

    /// Check if a date is a business day.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        !self.is_holiday(date)
    }

    /// Check if a date is a holiday (excluding weekends).
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        match self.id {
            CalendarId::WeekendOnly => false,
            CalendarId::UnitedStatesGovernmentBond => is_us_government_bond_holiday(date),
        }
    }

    /// Get the next business day on or after the given date.
    pub fn next_business_day(&self, mut date: NaiveDate) -> NaiveDate {
        while !self.is_business_day(date) {
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        date
    }

    /// Get the previous business day on or before the given date.
    pub fn prev_business_day(&self, mut date: NaiveDate) -> NaiveDate {
        while !self.is_business_day(date) {
            match date.pred_opt() {
                Some(prev) => date = prev,
                None => break,
            }
        }
        date
    }

    /// Add business days to a date.
    pub fn add_business_days(&self, mut date: NaiveDate, days: i32) -> NaiveDate {
        let forward = days >= 0;
        let mut remaining = days.unsigned_abs();

        while remaining > 0 {
            let next = if forward { date.succ_opt() } else { date.pred_opt() };
            match next {
                Some(d) => date = d,
                None => break,
            }
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }

        date
    }

    /// Roll `date` according to `convention`.
    pub fn adjust(&self, date: NaiveDate, convention: BusinessDayConvention) -> NaiveDate {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => self.next_business_day(date),
            BusinessDayConvention::Preceding => self.prev_business_day(date),
            BusinessDayConvention::ModifiedFollowing => {
                let rolled = self.next_business_day(date);
                if rolled.month() != date.month() {
                    self.prev_business_day(date)
                } else {
                    rolled
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let rolled = self.prev_business_day(date);
                if rolled.month() != date.month() {
                    self.next_business_day(date)
                } else {
                    rolled
                }
            }
        }
    }

    /// Whether `date` is the last business day of its month.
    pub fn is_end_of_month(&self, date: NaiveDate) -> bool {
        date == self.end_of_month(date)
    }

    /// Last business day of the month containing `date`.
    pub fn end_of_month(&self, date: NaiveDate) -> NaiveDate {
        self.prev_business_day(last_day_of_month(date))
    }

    /// Advance `date` by `period`.
    ///
    /// Day periods count business days. Week, month and year periods move in
    /// calendar time and the result is rolled with `convention`. With
    /// `end_of_month`, a start date on the last business day of its month
    /// lands on the last business day of the target month.
    pub fn advance(
        &self,
        date: NaiveDate,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<NaiveDate, MasterDataError> {
        match period.unit() {
            TimeUnit::Days => {
                if period.length() == 0 {
                    Ok(self.adjust(date, convention))
                } else {
                    Ok(self.add_business_days(date, period.length()))
                }
            }
            TimeUnit::Weeks => Ok(self.adjust(period.apply(date)?, convention)),
            TimeUnit::Months | TimeUnit::Years => {
                let shifted = period.apply(date)?;
                if end_of_month && self.is_end_of_month(date) {
                    Ok(self.end_of_month(shifted))
                } else {
                    Ok(self.adjust(shifted, convention))
                }
            }
        }
    }

    /// Number of business days in `(start, end]`.
    pub fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= end)
            .filter(|d| self.is_business_day(*d))
            .count() as u32
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Easter Sunday (anonymous Gregorian algorithm).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Saturday holidays move to Friday, Sunday holidays to Monday.
fn observed(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.pred_opt(),
        Weekday::Sun => date.succ_opt(),
        _ => Some(date),
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    nth_weekday(year, month, weekday, 5).or_else(|| nth_weekday(year, month, weekday, 4))
}

// US government bond market holidays
fn is_us_government_bond_holiday(date: NaiveDate) -> bool {
    let year = date.year();
    let fixed = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day);

    let holidays = [
        // New Year's Day, moved to Monday only when it falls on a Sunday
        fixed(1, 1).and_then(|d| {
            if d.weekday() == Weekday::Sun {
                d.succ_opt()
            } else {
                Some(d)
            }
        }),
        // Martin Luther King Jr. Day
        (year >= 1983)
            .then(|| nth_weekday(year, 1, Weekday::Mon, 3))
            .flatten(),
        // Washington's Birthday
        nth_weekday(year, 2, Weekday::Mon, 3),
        // Good Friday
        easter_sunday(year).and_then(|e| e.checked_sub_days(Days::new(2))),
        // Memorial Day
        last_weekday(year, 5, Weekday::Mon),
        // Juneteenth
        (year >= 2022).then(|| fixed(6, 19).and_then(observed)).flatten(),
        // Independence Day
        fixed(7, 4).and_then(observed),
        // Labor Day
        nth_weekday(year, 9, Weekday::Mon, 1),
        // Columbus Day
        (year >= 1971)
            .then(|| nth_weekday(year, 10, Weekday::Mon, 2))
            .flatten(),
        // Veterans Day
        fixed(11, 11).and_then(observed),
        // Thanksgiving
        nth_weekday(year, 11, Weekday::Thu, 4),
        // Christmas
        fixed(12, 25).and_then(observed),
    ];

    holidays.into_iter().flatten().any(|h| h == date)
}
