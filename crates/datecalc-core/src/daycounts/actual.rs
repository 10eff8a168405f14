//! Actual-day period count bases.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365;

impl DayCount for Act365 {
    fn name(&self) -> &'static str {
        "ACT/365"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual (ISDA).
///
/// Days falling in each calendar year are divided by that year's length.
///
/// $$YF = \sum_{y} \frac{\text{days in } y}{\text{length of } y}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActAct;

impl DayCount for ActAct {
    fn name(&self) -> &'static str {
        "ACT/ACT"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if end < start {
            return -self.year_fraction(end, start);
        }

        if start.year() == end.year() {
            return Decimal::from(start.days_between(&end))
                / Decimal::from(start.days_in_year());
        }

        // Stub to the end of the first year, whole years, stub into the last.
        let next_year_start =
            start.add_days(i64::from(start.days_in_year() - start.day_of_year()) + 1);
        let last_year_start = end.add_days(1 - i64::from(end.day_of_year()));

        let head = Decimal::from(start.days_between(&next_year_start))
            / Decimal::from(start.days_in_year());
        let whole = Decimal::from(end.year() - start.year() - 1);
        let tail = Decimal::from(last_year_start.days_between(&end))
            / Decimal::from(end.days_in_year());

        head + whole + tail
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_act360() {
        let dc = Act360;
        assert_eq!(dc.day_count(d(2024, 1, 1), d(2024, 7, 19)), 200);
        assert_eq!(dc.year_fraction(d(2024, 1, 1), d(2024, 12, 26)), dec!(1));
    }

    #[test]
    fn test_act365() {
        let dc = Act365;
        assert_eq!(dc.year_fraction(d(2023, 1, 1), d(2024, 1, 1)), dec!(1));
        assert_eq!(dc.day_count(d(2024, 1, 1), d(2025, 1, 1)), 366);
    }

    #[test]
    fn test_actact_whole_years() {
        let dc = ActAct;
        assert_eq!(dc.year_fraction(d(2023, 1, 1), d(2024, 1, 1)), dec!(1));
        assert_eq!(dc.year_fraction(d(2024, 1, 1), d(2025, 1, 1)), dec!(1));
        assert_eq!(dc.year_fraction(d(2022, 1, 1), d(2025, 1, 1)), dec!(3));
    }

    #[test]
    fn test_actact_across_year_end() {
        let dc = ActAct;
        // 2023-12-01 .. 2024-01-01 = 31/365, 2024-01-01 .. 2024-02-01 = 31/366
        let expected = Decimal::from(31) / Decimal::from(365) + Decimal::from(31) / Decimal::from(366);
        assert_eq!(dc.year_fraction(d(2023, 12, 1), d(2024, 2, 1)), expected);
    }

    #[test]
    fn test_actact_negative() {
        let dc = ActAct;
        assert_eq!(dc.year_fraction(d(2025, 1, 1), d(2024, 1, 1)), dec!(-1));
    }
}
