//! Non-working-day calendars, business day conventions and date stepping.
//!
//! This module provides:
//! - [`NonWorkingDays`], the predicate every algorithm consumes
//! - [`BusinessCalendar`], a working week plus any number of holiday sets
//! - [`BusinessDayConvention`] adjustment and business-day stepping

use std::fmt;
use std::sync::Arc;

mod conventions;
mod holidays;
mod stepping;
mod working_week;

pub use conventions::{adjust, adjust_moving, BusinessDayConvention};
pub use holidays::{HolidaySet, HolidaySetData};
pub use stepping::step_business_days;
pub use working_week::WorkingWeek;

use crate::error::DateCalcResult;
use crate::types::Date;

/// Decides whether a date is a non-working day.
///
/// Implementations must be pure: the same date always gives the same answer.
/// Any `Fn(Date) -> bool` closure is a `NonWorkingDays`.
///
/// # Termination
///
/// Adjustment and stepping loop until they find a working day. A predicate
/// that is true for every date from some point onward makes them spin
/// forever; keeping holiday data finite is the caller's job.
pub trait NonWorkingDays {
    /// Returns true if `date` is a weekend day or a holiday.
    fn is_non_working_day(&self, date: Date) -> bool;

    /// Returns true if `date` is a business day.
    fn is_working_day(&self, date: Date) -> bool {
        !self.is_non_working_day(date)
    }
}

impl<F> NonWorkingDays for F
where
    F: Fn(Date) -> bool,
{
    fn is_non_working_day(&self, date: Date) -> bool {
        self(date)
    }
}

/// A working week combined with zero or more holiday sets.
///
/// A date is non-working if its weekday is a weekend day under the working
/// week, or if *any* of the holiday sets contains it.
///
/// Holiday sets are shared (`Arc`) so that many calendars built from one
/// registry do not copy holiday data.
#[derive(Clone, Default)]
pub struct BusinessCalendar {
    week: WorkingWeek,
    holidays: Vec<Arc<HolidaySet>>,
}

impl BusinessCalendar {
    /// Weekend-only calendar (Saturday/Sunday).
    pub fn weekends_only() -> Self {
        Self::default()
    }

    /// Calendar over the given holiday sets with a Saturday/Sunday weekend.
    pub fn new(holidays: impl IntoIterator<Item = Arc<HolidaySet>>) -> Self {
        Self {
            week: WorkingWeek::default(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Replaces the working week.
    #[must_use]
    pub fn with_working_week(mut self, week: WorkingWeek) -> Self {
        self.week = week;
        self
    }

    /// Adds a holiday set.
    #[must_use]
    pub fn with_holidays(mut self, set: Arc<HolidaySet>) -> Self {
        self.holidays.push(set);
        self
    }

    /// The working week in force.
    pub fn working_week(&self) -> WorkingWeek {
        self.week
    }

    /// The holiday sets consulted, in insertion order.
    pub fn holiday_sets(&self) -> &[Arc<HolidaySet>] {
        &self.holidays
    }

    /// True if any holiday set lists `date` (weekends not considered).
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.iter().any(|set| set.contains(date))
    }

    /// Fails if `date` is outside the boundary of any holiday set.
    pub fn check_boundary(&self, date: Date) -> DateCalcResult<()> {
        self.holidays
            .iter()
            .try_for_each(|set| set.check_boundary(date))
    }

    /// Union of both calendars' holiday sets.
    ///
    /// The working week is the intersection: a weekday is working only if
    /// both calendars treat it as working.
    #[must_use]
    pub fn union(&self, other: &BusinessCalendar) -> BusinessCalendar {
        let mut week = self.week;
        for day in self.week.working_days() {
            if other.week.is_weekend(day) {
                week = week.with_working_day(day, false);
            }
        }

        let mut holidays = self.holidays.clone();
        for set in &other.holidays {
            if !holidays.iter().any(|existing| Arc::ptr_eq(existing, set)) {
                holidays.push(Arc::clone(set));
            }
        }
        BusinessCalendar { week, holidays }
    }
}

impl NonWorkingDays for BusinessCalendar {
    fn is_non_working_day(&self, date: Date) -> bool {
        self.week.is_weekend(date.weekday()) || self.is_holiday(date)
    }
}

impl fmt::Debug for BusinessCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.holidays.iter().map(|set| set.name()).collect();
        f.debug_struct("BusinessCalendar")
            .field("week", &self.week)
            .field("holidays", &names)
            .finish()
    }
}

/// Combines holiday sets into one non-working-day predicate.
///
/// The result treats a date as non-working if it is a weekend day or a
/// holiday in *any* of `sets`. This is how a currency pair's settlement
/// calendar is built from each currency's holidays plus the settlement
/// currency's.
pub fn combined_calendar(sets: &[Arc<HolidaySet>]) -> BusinessCalendar {
    BusinessCalendar::new(sets.iter().cloned())
}
