//! Fixed-rate bond quoted at par, used as a bootstrapping instrument.

use chrono::NaiveDate;
use infra_master::{BusinessDayConvention, Calendar, CalendarId, DateGeneration, Period, Schedule};
use pricer_core::types::{DayCountConvention, Frequency};
use pricer_models::curves::YieldTermStructure;

use crate::error::OptimiserError;

/// Market conventions shared by a family of bonds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondConventions {
    pub calendar: CalendarId,
    pub convention: BusinessDayConvention,
    pub day_count: DayCountConvention,
    /// Business days from trade to settlement
    pub settlement_days: u32,
    pub face_amount: f64,
    pub frequency: Frequency,
    pub end_of_month: bool,
}

impl BondConventions {
    /// US Treasury notes and bonds: par yields are bond-equivalent, so each
    /// tenor is a semiannual coupon security.
    pub fn us_treasury() -> Self {
        Self {
            calendar: CalendarId::UnitedStatesGovernmentBond,
            convention: BusinessDayConvention::ModifiedFollowing,
            day_count: DayCountConvention::ActualActualIsda,
            settlement_days: 1,
            face_amount: 100.0,
            frequency: Frequency::Semiannual,
            end_of_month: false,
        }
    }
}

impl Default for BondConventions {
    fn default() -> Self {
        Self::us_treasury()
    }
}

/// A dated cash flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy)]
struct Accrual {
    start: NaiveDate,
    end: NaiveDate,
}

/// Bond whose coupon equals its par yield, so its clean price quote is par.
#[derive(Debug, Clone)]
pub struct FixedRateBondHelper {
    tenor: Period,
    coupon: f64,
    conventions: BondConventions,
    settlement_date: NaiveDate,
    accruals: Vec<Accrual>,
    cash_flows: Vec<CashFlow>,
}

impl FixedRateBondHelper {
    /// Clean price quote of a par bond, in percent of face.
    pub const PAR: f64 = 100.0;

    /// Bond issued on `as_of` maturing `tenor` later with coupon `par_yield_pct / 100`.
    pub fn new(
        par_yield_pct: f64,
        tenor: Period,
        as_of: NaiveDate,
        conventions: &BondConventions,
    ) -> Result<Self, OptimiserError> {
        if !par_yield_pct.is_finite() {
            return Err(OptimiserError::InvalidMarketData(format!(
                "par yield for {} is not finite",
                tenor
            )));
        }
        if conventions.face_amount <= 0.0 {
            return Err(OptimiserError::InvalidMarketData(format!(
                "face amount must be positive, got {}",
                conventions.face_amount
            )));
        }

        let calendar = Calendar::get(conventions.calendar);
        let maturity = tenor.apply(as_of)?;
        let coupon_tenor = Period::months(conventions.frequency.months() as i32);
        let schedule = Schedule::builder(as_of, maturity, coupon_tenor)
            .calendar(calendar.clone())
            .convention(conventions.convention)
            .termination_convention(conventions.convention)
            .rule(DateGeneration::Backward)
            .end_of_month(conventions.end_of_month)
            .build()?;

        let settlement_date =
            calendar.add_business_days(as_of, conventions.settlement_days as i32);
        let coupon = par_yield_pct / 100.0;
        let face = conventions.face_amount;

        let accruals: Vec<Accrual> = schedule
            .periods()
            .map(|(start, end)| Accrual { start, end })
            .collect();
        let mut cash_flows: Vec<CashFlow> = accruals
            .iter()
            .map(|a| CashFlow {
                date: a.end,
                amount: face * coupon * conventions.day_count.year_fraction(a.start, a.end),
            })
            .collect();
        cash_flows.push(CashFlow {
            date: schedule.end_date(),
            amount: face,
        });

        Ok(Self {
            tenor,
            coupon,
            conventions: *conventions,
            settlement_date,
            accruals,
            cash_flows,
        })
    }

    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Annual coupon rate as a decimal.
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    pub fn quote(&self) -> f64 {
        Self::PAR
    }

    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    /// Adjusted maturity, which is the curve pillar this helper determines.
    pub fn maturity_date(&self) -> NaiveDate {
        self.cash_flows[self.cash_flows.len() - 1].date
    }

    pub fn cash_flows(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Accrued coupon at `date`, in currency units.
    pub fn accrued_amount(&self, date: NaiveDate) -> f64 {
        let face = self.conventions.face_amount;
        self.accruals
            .iter()
            .find(|a| a.start <= date && date < a.end)
            .map(|a| face * self.coupon * self.conventions.day_count.year_fraction(a.start, date))
            .unwrap_or(0.0)
    }

    /// Dirty value at settlement of the cash flows paid after settlement.
    pub fn dirty_value<C: YieldTermStructure + ?Sized>(
        &self,
        curve: &C,
    ) -> Result<f64, OptimiserError> {
        let settlement_discount = curve.discount_date(self.settlement_date)?;
        let mut pv = 0.0;
        for cf in self.cash_flows.iter().filter(|cf| cf.date > self.settlement_date) {
            pv += cf.amount * curve.discount_date(cf.date)?;
        }
        Ok(pv / settlement_discount)
    }

    /// Clean price at settlement, in percent of face, implied by `curve`.
    pub fn implied_clean_price<C: YieldTermStructure + ?Sized>(
        &self,
        curve: &C,
    ) -> Result<f64, OptimiserError> {
        let dirty = self.dirty_value(curve)?;
        let accrued = self.accrued_amount(self.settlement_date);
        Ok((dirty - accrued) * 100.0 / self.conventions.face_amount)
    }
}
