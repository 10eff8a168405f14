//! 30/360 period count bases.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

#[inline]
fn thirty_360_days(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let y1 = i64::from(start.year());
    let y2 = i64::from(end.year());
    let m1 = i64::from(start.month());
    let m2 = i64::from(end.month());

    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

/// 30/360 (Bond Basis).
///
/// # Rules
///
/// 1. If D2 is 31 and D1 is 30 or 31, change D2 to 30
/// 2. If D1 is 31, change D1 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }
        if d1 == 31 {
            d1 = 30;
        }

        thirty_360_days(start, end, d1, d2)
    }
}

/// 30E/360 ISDA.
///
/// # Rules
///
/// 1. If D1 is the last day of its month, change D1 to 30
/// 2. If D2 is the last day of its month and the month is not February,
///    change D2 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360EIsda;

impl DayCount for Thirty360EIsda {
    fn name(&self) -> &'static str {
        "360E/ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = if start.is_end_of_month() {
            30
        } else {
            i64::from(start.day())
        };
        let d2 = if end.is_end_of_month() && end.month() != 2 {
            30
        } else {
            i64::from(end.day())
        };

        thirty_360_days(start, end, d1, d2)
    }
}

/// 30E/360 ISMA (Eurobond Basis).
///
/// Day 31 becomes 30 on either side; February is not special.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360EIsma;

impl DayCount for Thirty360EIsma {
    fn name(&self) -> &'static str {
        "360E/ISMA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));

        thirty_360_days(start, end, d1, d2)
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
    fn test_thirty360_whole_months() {
        let dc = Thirty360;
        assert_eq!(dc.day_count(d(2024, 1, 15), d(2024, 7, 15)), 180);
        assert_eq!(dc.year_fraction(d(2024, 1, 15), d(2025, 1, 15)), dec!(1));
    }

    #[test]
    fn test_thirty360_day_31_rules() {
        let dc = Thirty360;
        // D1 = 31 -> 30, D2 = 31 with D1 >= 30 -> 30
        assert_eq!(dc.day_count(d(2024, 1, 31), d(2024, 3, 31)), 60);
        // D2 = 31 kept when D1 < 30
        assert_eq!(dc.day_count(d(2024, 1, 15), d(2024, 3, 31)), 76);
    }

    #[test]
    fn test_isda_month_end() {
        let dc = Thirty360EIsda;
        // Feb 29 is end of month for D1
        assert_eq!(dc.day_count(d(2024, 2, 29), d(2024, 3, 31)), 30);
        // D2 at end of February is left alone
        assert_eq!(dc.day_count(d(2024, 1, 31), d(2024, 2, 29)), 29);
    }

    #[test]
    fn test_isma_caps_at_30() {
        let dc = Thirty360EIsma;
        assert_eq!(dc.day_count(d(2024, 1, 31), d(2024, 2, 29)), 29);
        assert_eq!(dc.day_count(d(2024, 1, 15), d(2024, 3, 31)), 75);
    }

    #[test]
    fn test_negative_direction() {
        let dc = Thirty360EIsma;
        assert_eq!(dc.day_count(d(2024, 7, 15), d(2024, 1, 15)), -180);
    }
}
