//! # Datecalc Core
//!
//! Business day adjustment for financial dates.
//!
//! This crate provides:
//!
//! - **Calendars**: a working week plus named holiday sets, combined into a
//!   non-working-day predicate
//! - **Conventions**: Forward, Backward, Modified Following, Modified
//!   Preceding and Forward Unless Moving Back
//! - **Stepping and periods**: move N business days, add calendar periods
//!   then adjust, market tenors (ON, TN, SN, SP, 3M, ...)
//! - **IMM dates**: third Wednesday of March, June, September, December
//! - **Period counts**: 30/360, 30E/360, ACT/360, ACT/365, ACT/ACT
//! - **Registry**: named holiday sets and the calculators built from them
//!
//! All calculators are immutable and thread-safe; every operation takes the
//! date it works on and returns a new one.
//!
//! ## Example
//!
//! ```rust
//! use datecalc_core::prelude::*;
//!
//! let mut registry = HolidayRegistry::new();
//! registry.register(HolidaySet::new("EUR", [Date::from_ymd(2025, 5, 1).unwrap()]));
//!
//! let calc = registry.calculator("EUR", BusinessDayConvention::ModifiedFollowing);
//! let date = calc.adjust(Date::from_ymd(2025, 5, 1).unwrap()).unwrap();
//! assert_eq!(date, Date::from_ymd(2025, 5, 2).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod calculator;
pub mod calendars;
pub mod config;
pub mod daycounts;
pub mod error;
pub mod imm;
pub mod periods;
pub mod registry;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::{CurrencyDateCalculator, DateCalculator, DEFAULT_SPOT_LAG};
    pub use crate::calendars::{
        adjust, combined_calendar, step_business_days, BusinessCalendar, BusinessDayConvention,
        HolidaySet, NonWorkingDays, WorkingWeek,
    };
    pub use crate::config::{RegistryConfig, Validate};
    pub use crate::daycounts::{DayCount, PeriodCountBasis};
    pub use crate::error::{DateCalcError, DateCalcResult};
    pub use crate::imm::{is_imm_date, next_imm_date, previous_imm_date, ImmPeriod};
    pub use crate::periods::add_period;
    pub use crate::registry::HolidayRegistry;
    pub use crate::types::{Date, PeriodUnit, Tenor, TenorCode};
}
