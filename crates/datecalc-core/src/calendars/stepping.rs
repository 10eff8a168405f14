//! Business-day stepping.

use super::NonWorkingDays;
use crate::error::{DateCalcError, DateCalcResult};
use crate::types::Date;

/// Moves `count` working days away from `start`.
///
/// A positive count moves forward, a negative count backward. Each calendar
/// day visited that is a working day uses up one unit of `count`; the walk
/// never backtracks, so the result is always a working day.
///
/// A zero count returns `start` unchanged, even when `start` is itself a
/// non-working day.
///
/// # Errors
///
/// Returns `DateCalcError::InvalidDate` if the walk would leave the
/// representable date range.
///
/// ```rust
/// use datecalc_core::calendars::{step_business_days, BusinessCalendar};
/// use datecalc_core::types::Date;
///
/// let cal = BusinessCalendar::weekends_only();
/// let friday = Date::from_ymd(2025, 1, 3).unwrap();
/// assert_eq!(step_business_days(friday, 1, &cal).unwrap(), Date::from_ymd(2025, 1, 6).unwrap());
/// ```
pub fn step_business_days<C: NonWorkingDays + ?Sized>(
    start: Date,
    count: i64,
    calendar: &C,
) -> DateCalcResult<Date> {
    let out_of_range = || {
        DateCalcError::invalid_date(format!("{start} moved {count} business days is out of range"))
    };

    // The result lies at least |count| calendar days away.
    start.checked_add_days(count).map_err(|_| out_of_range())?;

    let direction = count.signum();
    let mut remaining = count.unsigned_abs();
    let mut current = start;

    while remaining > 0 {
        current = current.checked_add_days(direction).map_err(|_| out_of_range())?;
        if calendar.is_working_day(current) {
            remaining -= 1;
        }
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{BusinessCalendar, HolidaySet};
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_zero_is_pass_through() {
        let cal = BusinessCalendar::weekends_only();
        let saturday = d(2025, 1, 4);
        assert_eq!(step_business_days(saturday, 0, &cal).unwrap(), saturday);
    }

    #[test]
    fn test_forward_over_weekend() {
        let cal = BusinessCalendar::weekends_only();
        let monday = d(2025, 1, 6);
        assert_eq!(step_business_days(monday, 1, &cal).unwrap(), d(2025, 1, 7));
        assert_eq!(step_business_days(monday, 5, &cal).unwrap(), d(2025, 1, 13));
    }

    #[test]
    fn test_backward_over_weekend() {
        let cal = BusinessCalendar::weekends_only();
        assert_eq!(step_business_days(d(2025, 1, 6), -1, &cal).unwrap(), d(2025, 1, 3));
        assert_eq!(step_business_days(d(2025, 1, 6), -6, &cal).unwrap(), d(2024, 12, 27));
    }

    #[test]
    fn test_skips_holidays() {
        let xmas = Arc::new(HolidaySet::new("GBP", [d(2024, 12, 25), d(2024, 12, 26)]));
        let cal = BusinessCalendar::new([xmas]);
        // Tue 24 Dec + 1 => Fri 27 Dec
        assert_eq!(step_business_days(d(2024, 12, 24), 1, &cal).unwrap(), d(2024, 12, 27));
        // Fri 27 Dec - 2 => Mon 23 Dec
        assert_eq!(step_business_days(d(2024, 12, 27), -2, &cal).unwrap(), d(2024, 12, 23));
    }

    #[test]
    fn test_from_non_working_start() {
        let cal = BusinessCalendar::weekends_only();
        // Sat + 1 => Mon, Sat - 1 => Fri
        assert_eq!(step_business_days(d(2025, 1, 4), 1, &cal).unwrap(), d(2025, 1, 6));
        assert_eq!(step_business_days(d(2025, 1, 4), -1, &cal).unwrap(), d(2025, 1, 3));
    }

    #[test]
    fn test_out_of_range_is_error() {
        let cal = BusinessCalendar::weekends_only();
        let start = d(2025, 1, 6);
        assert!(step_business_days(start, i64::MAX, &cal).is_err());
        assert!(step_business_days(start, -1_000_000_000, &cal).is_err());
    }
}
