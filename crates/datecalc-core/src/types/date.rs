//! Calendar date value.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{DateCalcError, DateCalcResult};

/// An immutable calendar date.
///
/// Newtype over `chrono::NaiveDate`. Every operation returns a new value;
/// there is no time-of-day or timezone component.
///
/// # Example
///
/// ```rust
/// use datecalc_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns `DateCalcError::InvalidDate` if the components do not form a date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> DateCalcResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| DateCalcError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `DateCalcError::InvalidDate` if the text is not a date.
    pub fn parse(s: &str) -> DateCalcResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| DateCalcError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's local date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day-of-month component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of the year (1-366).
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// True for leap years.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Number of days in this date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ if self.is_leap_year() => 29,
            _ => 28,
        }
    }

    /// Number of days in this date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds (or with a negative count, subtracts) calendar days.
    ///
    /// # Panics
    ///
    /// Panics if the result is outside chrono's date range. Use
    /// [`Date::checked_add_days`] for counts that come from callers.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds (or with a negative count, subtracts) calendar days.
    ///
    /// # Errors
    ///
    /// Returns `DateCalcError::InvalidDate` if the result is out of range.
    pub fn checked_add_days(&self, days: i64) -> DateCalcResult<Self> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateCalcError::invalid_date(format!("{self} + {days} days")))
    }

    /// Adds calendar months, clamping to the last day of the target month.
    ///
    /// Jan 31 + 1 month is Feb 28 (Feb 29 in a leap year).
    ///
    /// # Errors
    ///
    /// Returns `DateCalcError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> DateCalcResult<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateCalcError::invalid_date(format!("{self} + {months} months")))
    }

    /// Adds calendar years, clamping Feb 29 to Feb 28 in non-leap years.
    ///
    /// # Errors
    ///
    /// Returns `DateCalcError::InvalidDate` if the result is out of range.
    pub fn add_years(&self, years: i32) -> DateCalcResult<Self> {
        years
            .checked_mul(12)
            .ok_or_else(|| DateCalcError::invalid_date(format!("{self} + {years} years")))
            .and_then(|months| self.add_months(months))
    }

    /// Signed number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// The first day of this date's month.
    #[must_use]
    pub fn first_of_month(&self) -> Self {
        self.add_days(1 - i64::from(self.day()))
    }

    /// The last day of this date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.add_days(i64::from(self.days_in_month() - self.day()))
    }

    /// True if this is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// True if both dates fall in the same month of the same year.
    #[must_use]
    pub fn same_month(&self, other: &Date) -> bool {
        self.month() == other.month() && self.year() == other.year()
    }

    /// Underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = DateCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}
