//! Calendar periods added to a date, then adjusted.

use crate::calendars::{adjust_moving, BusinessDayConvention, NonWorkingDays};
use crate::error::{DateCalcError, DateCalcResult};
use crate::types::{Date, PeriodUnit};

/// Adds `amount` calendar periods to `start` and adjusts the result once.
///
/// Days and weeks are plain calendar-day arithmetic; no business days are
/// skipped during the raw add. Months and years clamp to the end of the
/// target month. The convention then moves the raw date to a working day,
/// directed by the sign of `amount`.
///
/// # Errors
///
/// Only fails when the raw date is outside the representable range.
///
/// ```rust
/// use datecalc_core::calendars::{BusinessCalendar, BusinessDayConvention};
/// use datecalc_core::periods::add_period;
/// use datecalc_core::types::{Date, PeriodUnit};
///
/// let cal = BusinessCalendar::weekends_only();
/// let start = Date::from_ymd(2024, 1, 31).unwrap();
/// let end = add_period(start, 1, PeriodUnit::Month, BusinessDayConvention::Forward, &cal).unwrap();
/// assert_eq!(end, Date::from_ymd(2024, 2, 29).unwrap());
/// ```
pub fn add_period<C: NonWorkingDays + ?Sized>(
    start: Date,
    amount: i32,
    unit: PeriodUnit,
    convention: BusinessDayConvention,
    calendar: &C,
) -> DateCalcResult<Date> {
    let raw = shift(start, amount, unit)?;
    Ok(adjust_moving(raw, convention, calendar, i64::from(amount)))
}

/// Raw calendar arithmetic for a period, without adjustment.
pub(crate) fn shift(start: Date, amount: i32, unit: PeriodUnit) -> DateCalcResult<Date> {
    match unit {
        PeriodUnit::Day => start.checked_add_days(i64::from(amount)),
        PeriodUnit::Week => start.checked_add_days(i64::from(amount) * 7),
        PeriodUnit::Month => start.add_months(amount),
        PeriodUnit::Year => start.add_years(amount),
    }
}

/// Converts an unsigned tenor count to a signed period amount.
pub(crate) fn signed_amount(units: u32) -> DateCalcResult<i32> {
    i32::try_from(units)
        .map_err(|_| DateCalcError::invalid_date(format!("period of {units} units is out of range")))
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
    fn test_month_end_clamp_leap_year() {
        let cal = BusinessCalendar::weekends_only();
        let end = add_period(
            d(2024, 1, 31),
            1,
            PeriodUnit::Month,
            BusinessDayConvention::Forward,
            &cal,
        )
        .unwrap();
        assert_eq!(end, d(2024, 2, 29));
    }

    #[test]
    fn test_days_and_weeks_are_calendar_days() {
        let cal = BusinessCalendar::weekends_only();
        let friday = d(2025, 1, 3);
        // +1 day is Saturday, adjusted forward to Monday
        assert_eq!(
            add_period(friday, 1, PeriodUnit::Day, BusinessDayConvention::Forward, &cal).unwrap(),
            d(2025, 1, 6)
        );
        assert_eq!(
            add_period(friday, 2, PeriodUnit::Week, BusinessDayConvention::Forward, &cal).unwrap(),
            d(2025, 1, 17)
        );
    }

    #[test]
    fn test_adjusts_once_after_add() {
        // 2024-08-31 + 3M = 2024-11-30 (Sat); MF stays in November
        let cal = BusinessCalendar::weekends_only();
        let end = add_period(
            d(2024, 8, 31),
            3,
            PeriodUnit::Month,
            BusinessDayConvention::ModifiedFollowing,
            &cal,
        )
        .unwrap();
        assert_eq!(end, d(2024, 11, 29));
    }

    #[test]
    fn test_year_with_holiday() {
        let set = Arc::new(HolidaySet::new("X", [d(2025, 3, 14)]));
        let cal = BusinessCalendar::new([set]);
        let end = add_period(
            d(2024, 3, 14),
            1,
            PeriodUnit::Year,
            BusinessDayConvention::Backward,
            &cal,
        )
        .unwrap();
        assert_eq!(end, d(2025, 3, 13));
    }

    #[test]
    fn test_negative_amount_with_forward_unless_moving_back() {
        let cal = BusinessCalendar::weekends_only();
        // 2025-01-13 - 9 days = 2025-01-04 (Sat), rolled back to Fri
        let end = add_period(
            d(2025, 1, 13),
            -9,
            PeriodUnit::Day,
            BusinessDayConvention::ForwardUnlessMovingBack,
            &cal,
        )
        .unwrap();
        assert_eq!(end, d(2025, 1, 3));
    }

    #[test]
    fn test_out_of_range_is_error_for_every_unit() {
        let cal = BusinessCalendar::weekends_only();
        for unit in [PeriodUnit::Day, PeriodUnit::Week, PeriodUnit::Month, PeriodUnit::Year] {
            for amount in [i32::MAX, i32::MIN] {
                let result = add_period(
                    d(2024, 1, 1),
                    amount,
                    unit,
                    BusinessDayConvention::Forward,
                    &cal,
                );
                assert!(
                    matches!(result, Err(DateCalcError::InvalidDate { .. })),
                    "{unit} x {amount}: {result:?}"
                );
            }
        }
    }
}
