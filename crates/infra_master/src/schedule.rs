//! Coupon schedule generation.

use chrono::NaiveDate;

use crate::calendar::{BusinessDayConvention, Calendar, CalendarId};
use crate::error::MasterDataError;
use crate::period::Period;

/// Direction in which schedule dates are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateGeneration {
    /// Step back from the termination date; any stub sits at the front
    #[default]
    Backward,
    /// Step forward from the effective date; any stub sits at the back
    Forward,
}

/// Ordered, strictly increasing adjusted dates from effective to termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    dates: Vec<NaiveDate>,
    tenor: Period,
}

impl Schedule {
    /// Start building a schedule.
    pub fn builder(effective: NaiveDate, termination: NaiveDate, tenor: Period) -> ScheduleBuilder {
        ScheduleBuilder {
            effective,
            termination,
            tenor,
            calendar: Calendar::get(CalendarId::WeekendOnly),
            convention: BusinessDayConvention::Following,
            termination_convention: BusinessDayConvention::Following,
            rule: DateGeneration::Backward,
            end_of_month: false,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn tenor(&self) -> Period {
        self.tenor
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn end_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Accrual periods as `(start, end)` pairs.
    pub fn periods(&self) -> impl Iterator<Item = (NaiveDate, NaiveDate)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Builder for [`Schedule`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use infra_master::{BusinessDayConvention, Calendar, CalendarId, DateGeneration, Period, Schedule};
///
/// let effective = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let termination = NaiveDate::from_ymd_opt(2027, 3, 3).unwrap();
/// let schedule = Schedule::builder(effective, termination, Period::months(6))
///     .calendar(Calendar::get(CalendarId::UnitedStatesGovernmentBond))
///     .convention(BusinessDayConvention::ModifiedFollowing)
///     .termination_convention(BusinessDayConvention::ModifiedFollowing)
///     .rule(DateGeneration::Backward)
///     .build()
///     .unwrap();
/// assert_eq!(schedule.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    effective: NaiveDate,
    termination: NaiveDate,
    tenor: Period,
    calendar: Calendar,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
}

impl ScheduleBuilder {
    pub fn calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn termination_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.termination_convention = convention;
        self
    }

    pub fn rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    pub fn end_of_month(mut self, end_of_month: bool) -> Self {
        self.end_of_month = end_of_month;
        self
    }

    /// Generate and adjust the schedule dates.
    pub fn build(self) -> Result<Schedule, MasterDataError> {
        if self.effective >= self.termination {
            return Err(MasterDataError::InvalidSchedule(format!(
                "effective date {} must precede termination date {}",
                self.effective, self.termination
            )));
        }
        if self.tenor.length() <= 0 {
            return Err(MasterDataError::InvalidSchedule(format!(
                "tenor must be positive, got {}",
                self.tenor
            )));
        }

        let unadjusted = match self.rule {
            DateGeneration::Backward => self.generate_backward()?,
            DateGeneration::Forward => self.generate_forward()?,
        };

        let last = unadjusted.len() - 1;
        let mut dates: Vec<NaiveDate> = Vec::with_capacity(unadjusted.len());
        for (i, date) in unadjusted.into_iter().enumerate() {
            let convention = if i == last {
                self.termination_convention
            } else {
                self.convention
            };
            let adjusted = self.calendar.adjust(date, convention);
            if dates.last().map_or(true, |prev| adjusted > *prev) {
                dates.push(adjusted);
            }
        }

        if dates.len() < 2 {
            return Err(MasterDataError::InvalidSchedule(format!(
                "schedule from {} to {} collapses after adjustment",
                self.effective, self.termination
            )));
        }

        Ok(Schedule {
            dates,
            tenor: self.tenor,
        })
    }

    fn month_end_aligned(&self, anchor: NaiveDate) -> bool {
        self.end_of_month && is_calendar_month_end(anchor)
    }

    fn generate_backward(&self) -> Result<Vec<NaiveDate>, MasterDataError> {
        let eom = self.month_end_aligned(self.termination);
        let mut dates = vec![self.termination];
        for k in 1.. {
            let mut date = self.tenor.times(-k).apply(self.termination)?;
            if eom {
                date = calendar_month_end(date);
            }
            if date <= self.effective {
                break;
            }
            dates.push(date);
        }
        dates.push(self.effective);
        dates.reverse();
        Ok(dates)
    }

    fn generate_forward(&self) -> Result<Vec<NaiveDate>, MasterDataError> {
        let eom = self.month_end_aligned(self.effective);
        let mut dates = vec![self.effective];
        for k in 1.. {
            let mut date = self.tenor.times(k).apply(self.effective)?;
            if eom {
                date = calendar_month_end(date);
            }
            if date >= self.termination {
                break;
            }
            dates.push(date);
        }
        dates.push(self.termination);
        Ok(dates)
    }
}

fn is_calendar_month_end(date: NaiveDate) -> bool {
    date.succ_opt()
        .map_or(true, |next| chrono::Datelike::month(&next) != chrono::Datelike::month(&date))
}

fn calendar_month_end(date: NaiveDate) -> NaiveDate {
    let mut d = date;
    while !is_calendar_month_end(d) {
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn treasury_builder(effective: NaiveDate, termination: NaiveDate) -> ScheduleBuilder {
        Schedule::builder(effective, termination, Period::months(6))
            .calendar(Calendar::get(CalendarId::UnitedStatesGovernmentBond))
            .convention(BusinessDayConvention::ModifiedFollowing)
            .termination_convention(BusinessDayConvention::ModifiedFollowing)
            .rule(DateGeneration::Backward)
    }

    #[test]
    fn test_backward_regular_schedule() {
        let schedule = treasury_builder(date(2025, 3, 3), date(2027, 3, 3)).build().unwrap();
        assert_eq!(
            schedule.dates(),
            &[
                date(2025, 3, 3),
                date(2025, 9, 3),
                date(2026, 3, 3),
                date(2026, 9, 3),
                date(2027, 3, 3),
            ]
        );
    }

    #[test]
    fn test_backward_short_front_stub() {
        // 1-month bill: a single period from effective to termination
        let schedule = treasury_builder(date(2025, 3, 3), date(2025, 4, 3)).build().unwrap();
        assert_eq!(schedule.dates(), &[date(2025, 3, 3), date(2025, 4, 3)]);

        // 9 months: a 3-month front stub followed by a regular period
        let schedule = treasury_builder(date(2025, 3, 3), date(2025, 12, 3)).build().unwrap();
        assert_eq!(
            schedule.dates(),
            &[date(2025, 3, 3), date(2025, 6, 3), date(2025, 12, 3)]
        );
    }

    #[test]
    fn test_forward_short_back_stub() {
        let schedule = Schedule::builder(date(2025, 1, 15), date(2025, 10, 15), Period::months(6))
            .rule(DateGeneration::Forward)
            .build()
            .unwrap();
        assert_eq!(
            schedule.dates(),
            &[date(2025, 1, 15), date(2025, 7, 15), date(2025, 10, 15)]
        );
    }

    #[test]
    fn test_dates_are_adjusted() {
        // Sunday 4 January and Saturday 4 July 2026 (observed Friday 3 July)
        let schedule = treasury_builder(date(2026, 1, 4), date(2026, 7, 4)).build().unwrap();
        assert_eq!(schedule.dates(), &[date(2026, 1, 5), date(2026, 7, 6)]);
    }

    #[test]
    fn test_end_of_month_rule() {
        let schedule = Schedule::builder(date(2024, 2, 29), date(2025, 2, 28), Period::months(3))
            .rule(DateGeneration::Backward)
            .convention(BusinessDayConvention::Unadjusted)
            .termination_convention(BusinessDayConvention::Unadjusted)
            .end_of_month(true)
            .build()
            .unwrap();
        assert_eq!(
            schedule.dates(),
            &[
                date(2024, 2, 29),
                date(2024, 5, 31),
                date(2024, 8, 31),
                date(2024, 11, 30),
                date(2025, 2, 28),
            ]
        );
    }

    #[test]
    fn test_periods_cover_schedule() {
        let schedule = treasury_builder(date(2025, 3, 3), date(2030, 3, 4)).build().unwrap();
        let periods: Vec<_> = schedule.periods().collect();
        assert_eq!(periods.len(), schedule.len() - 1);
        assert_eq!(periods[0].0, schedule.start_date());
        assert_eq!(periods[periods.len() - 1].1, schedule.end_date());
        assert!(periods.iter().all(|(s, e)| s < e));
    }

    #[test]
    fn test_rejects_inverted_dates() {
        let result = treasury_builder(date(2025, 3, 3), date(2025, 3, 3)).build();
        assert!(matches!(result, Err(MasterDataError::InvalidSchedule(_))));
    }

    #[test]
    fn test_rejects_non_positive_tenor() {
        let result = Schedule::builder(date(2025, 1, 1), date(2026, 1, 1), Period::months(0)).build();
        assert!(matches!(result, Err(MasterDataError::InvalidSchedule(_))));
    }
}
