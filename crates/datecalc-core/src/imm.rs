//! IMM dates: the third Wednesday of March, June, September and December.
//!
//! # Example
//!
//! ```rust
//! use datecalc_core::imm::{is_imm_date, next_imm_date, previous_imm_date};
//! use datecalc_core::types::Date;
//!
//! let from = Date::from_ymd(2024, 1, 1).unwrap();
//! let next = next_imm_date(from);
//! assert_eq!(next, Date::from_ymd(2024, 3, 20).unwrap());
//! assert!(is_imm_date(next));
//! assert_eq!(previous_imm_date(from), Date::from_ymd(2023, 12, 20).unwrap());
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DateCalcError, DateCalcResult};
use crate::types::Date;

/// Which IMM months a sequence visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImmPeriod {
    /// March, June, September, December.
    #[default]
    Quarterly,
    /// June and December.
    BiAnnualJunDec,
    /// March and September.
    BiAnnualMarSep,
    /// One year ahead: four quarterly IMM dates at a time.
    Annually,
}

impl ImmPeriod {
    /// True if `month` (1-12) is an IMM month under this period.
    ///
    /// `Annually` accepts any quarterly month; it differs from `Quarterly`
    /// only in how far each step goes.
    #[must_use]
    pub fn contains_month(&self, month: u32) -> bool {
        match self {
            ImmPeriod::Quarterly | ImmPeriod::Annually => is_imm_month(month),
            ImmPeriod::BiAnnualJunDec => month == 6 || month == 12,
            ImmPeriod::BiAnnualMarSep => month == 3 || month == 9,
        }
    }

    /// All periods.
    #[must_use]
    pub fn all() -> &'static [ImmPeriod] {
        &[
            ImmPeriod::Quarterly,
            ImmPeriod::BiAnnualJunDec,
            ImmPeriod::BiAnnualMarSep,
            ImmPeriod::Annually,
        ]
    }
}

impl fmt::Display for ImmPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImmPeriod::Quarterly => "Quarterly",
            ImmPeriod::BiAnnualJunDec => "Bi-annual Jun/Dec",
            ImmPeriod::BiAnnualMarSep => "Bi-annual Mar/Sep",
            ImmPeriod::Annually => "Annually",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ImmPeriod {
    type Err = DateCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '/'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "quarterly" | "q" => Ok(ImmPeriod::Quarterly),
            "biannualjundec" | "jundec" => Ok(ImmPeriod::BiAnnualJunDec),
            "biannualmarsep" | "marsep" => Ok(ImmPeriod::BiAnnualMarSep),
            "annually" | "annual" | "a" => Ok(ImmPeriod::Annually),
            _ => Err(DateCalcError::UnsupportedImmPeriod {
                name: s.to_string(),
            }),
        }
    }
}

/// True for March, June, September and December.
#[inline]
#[must_use]
pub fn is_imm_month(month: u32) -> bool {
    matches!(month, 3 | 6 | 9 | 12)
}

/// Third Wednesday of the given month, for any month.
///
/// # Errors
///
/// Returns `DateCalcError::InvalidDate` for an invalid year/month.
pub fn third_wednesday(year: i32, month: u32) -> DateCalcResult<Date> {
    Date::from_ymd(year, month, 1).map(third_wednesday_of)
}

/// Third Wednesday of the month containing `date`.
fn third_wednesday_of(date: Date) -> Date {
    let first = date.first_of_month();
    let to_wednesday = (7 + Weekday::Wed.num_days_from_monday()
        - first.weekday().num_days_from_monday())
        % 7;
    first.add_days(i64::from(to_wednesday) + 14)
}

fn next_month(first: Date) -> Date {
    first.add_days(i64::from(first.days_in_month()))
}

fn previous_month(first: Date) -> Date {
    first.add_days(-1).first_of_month()
}

/// True if `date` is the third Wednesday of an IMM month.
#[must_use]
pub fn is_imm_date(date: Date) -> bool {
    is_imm_month(date.month()) && third_wednesday_of(date) == date
}

/// First quarterly IMM date strictly after `from`.
#[must_use]
pub fn next_imm_date(from: Date) -> Date {
    next_imm_date_in(from, ImmPeriod::Quarterly)
}

/// Last quarterly IMM date strictly before `from`.
#[must_use]
pub fn previous_imm_date(from: Date) -> Date {
    previous_imm_date_in(from, ImmPeriod::Quarterly)
}

/// Next IMM date strictly after `from` within `period`.
#[must_use]
pub fn next_imm_date_in(from: Date, period: ImmPeriod) -> Date {
    if period == ImmPeriod::Annually {
        return (0..4).fold(from, |date, _| next_imm_date(date));
    }

    let mut month = from.first_of_month();
    loop {
        if period.contains_month(month.month()) {
            let candidate = third_wednesday_of(month);
            if candidate > from {
                return candidate;
            }
        }
        month = next_month(month);
    }
}

/// Previous IMM date strictly before `from` within `period`.
#[must_use]
pub fn previous_imm_date_in(from: Date, period: ImmPeriod) -> Date {
    if period == ImmPeriod::Annually {
        return (0..4).fold(from, |date, _| previous_imm_date(date));
    }

    let mut month = from.first_of_month();
    loop {
        if period.contains_month(month.month()) {
            let candidate = third_wednesday_of(month);
            if candidate < from {
                return candidate;
            }
        }
        month = previous_month(month);
    }
}

/// IMM dates strictly after `start` and on or before `end`, in order.
#[must_use]
pub fn imm_dates(start: Date, end: Date, period: ImmPeriod) -> Vec<Date> {
    let mut dates = Vec::new();
    let mut current = next_imm_date_in(start, period);
    while current <= end {
        dates.push(current);
        current = next_imm_date_in(current, period);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_third_wednesday() {
        assert_eq!(third_wednesday(2000, 3).unwrap(), d(2000, 3, 15));
        assert_eq!(third_wednesday(2025, 3).unwrap(), d(2025, 3, 19));
        assert_eq!(third_wednesday(2024, 2).unwrap(), d(2024, 2, 21));
        // First of month is a Wednesday
        assert_eq!(third_wednesday(2025, 1).unwrap(), d(2025, 1, 15));
        assert!(third_wednesday(2025, 13).is_err());
    }

    #[test]
    fn test_next_imm_date() {
        assert_eq!(next_imm_date(d(2024, 1, 1)), d(2024, 3, 20));
        assert_eq!(next_imm_date(d(2024, 3, 19)), d(2024, 3, 20));
        assert_eq!(next_imm_date(d(2024, 3, 20)), d(2024, 6, 19));
        assert_eq!(next_imm_date(d(2024, 12, 18)), d(2025, 3, 19));
    }

    #[test]
    fn test_previous_imm_date() {
        assert_eq!(previous_imm_date(d(2024, 3, 20)), d(2023, 12, 20));
        assert_eq!(previous_imm_date(d(2024, 3, 21)), d(2024, 3, 20));
        assert_eq!(previous_imm_date(d(2024, 1, 1)), d(2023, 12, 20));
    }

    #[test]
    fn test_is_imm_date() {
        assert!(is_imm_date(d(2024, 3, 20)));
        assert!(!is_imm_date(d(2024, 3, 13)));
        // Third Wednesday of a non-IMM month
        assert!(!is_imm_date(d(2024, 2, 21)));
    }

    #[test]
    fn test_bi_annual_periods() {
        assert_eq!(
            next_imm_date_in(d(2024, 1, 1), ImmPeriod::BiAnnualJunDec),
            d(2024, 6, 19)
        );
        assert_eq!(
            next_imm_date_in(d(2024, 4, 1), ImmPeriod::BiAnnualMarSep),
            d(2024, 9, 18)
        );
        assert_eq!(
            previous_imm_date_in(d(2024, 4, 1), ImmPeriod::BiAnnualJunDec),
            d(2023, 12, 20)
        );
    }

    #[test]
    fn test_annually_is_four_quarters() {
        assert_eq!(
            next_imm_date_in(d(2024, 1, 1), ImmPeriod::Annually),
            d(2024, 12, 18)
        );
        assert_eq!(
            previous_imm_date_in(d(2024, 12, 18), ImmPeriod::Annually),
            d(2023, 12, 20)
        );
    }

    #[test]
    fn test_imm_dates_range() {
        let dates = imm_dates(d(2024, 1, 1), d(2024, 12, 31), ImmPeriod::Quarterly);
        assert_eq!(
            dates,
            vec![d(2024, 3, 20), d(2024, 6, 19), d(2024, 9, 18), d(2024, 12, 18)]
        );

        // start is excluded, end is included
        let dates = imm_dates(d(2024, 3, 20), d(2024, 9, 18), ImmPeriod::Quarterly);
        assert_eq!(dates, vec![d(2024, 6, 19), d(2024, 9, 18)]);

        assert!(imm_dates(d(2024, 4, 1), d(2024, 5, 1), ImmPeriod::Quarterly).is_empty());
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("quarterly".parse::<ImmPeriod>().unwrap(), ImmPeriod::Quarterly);
        assert_eq!(
            "BI_ANNUAL_JUN_DEC".parse::<ImmPeriod>().unwrap(),
            ImmPeriod::BiAnnualJunDec
        );
        assert!("monthly".parse::<ImmPeriod>().is_err());
    }
}
