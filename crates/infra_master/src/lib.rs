//! # infra_master
//!
//! Static master data for ratekit.
//!
//! This crate is the "Source of Truth" for date conventions:
//! - Holiday calendars (US government bond market)
//! - Business day conventions and date rolling
//! - Tenors (`3M`, `10Y`, ...) and coupon schedules
//!
//! ## Architecture Position
//!
//! Part of the **I**nfra layer.
//! Must not depend on **P**ricer or **R**untime crates.
//!
//! ## Example
//!
//! ```rust
//! use infra_master::{BusinessDayConvention, Calendar, CalendarId, Period};
//! use chrono::NaiveDate;
//!
//! let calendar = Calendar::get(CalendarId::UnitedStatesGovernmentBond);
//! // Independence Day 2026 falls on a Saturday and is observed on Friday 3 July
//! assert!(!calendar.is_business_day(NaiveDate::from_ymd_opt(2026, 7, 3).unwrap()));
//!
//! let tenor: Period = "6M".parse().unwrap();
//! let date = calendar
//!     .advance(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), tenor, BusinessDayConvention::ModifiedFollowing, false)
//!     .unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2026, 7, 2).unwrap());
//! ```

mod calendar;
mod error;
mod period;
mod schedule;

pub use calendar::{BusinessDayConvention, Calendar, CalendarId};
pub use error::MasterDataError;
pub use period::{Period, TimeUnit};
pub use schedule::{DateGeneration, Schedule, ScheduleBuilder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BusinessDayConvention, Calendar, CalendarId, DateGeneration, MasterDataError, Period,
        Schedule, TimeUnit,
    };
}
