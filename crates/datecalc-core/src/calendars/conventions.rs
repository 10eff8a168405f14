//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::NonWorkingDays;
use crate::error::DateCalcError;
use crate::types::Date;

/// Rules for moving a date that falls on a non-working day.
///
/// Every variant leaves a working day untouched. Identifiers used at the
/// configuration boundary are the camelCase serde names (`forward`,
/// `modifiedFollowing`, ...); see the `FromStr` impl for accepted aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BusinessDayConvention {
    /// Move to the first working day on or after the date.
    #[default]
    Forward,

    /// Move to the first working day on or before the date.
    Backward,

    /// Forward, unless that lands in another month, in which case Backward.
    ModifiedFollowing,

    /// Backward, unless that lands in another month, in which case Forward.
    ModifiedPreceding,

    /// Forward, except while the date is being moved backward
    /// (negative step), when it behaves as Backward.
    ForwardUnlessMovingBack,
}

impl BusinessDayConvention {
    /// Configuration identifier.
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        match self {
            BusinessDayConvention::Forward => "forward",
            BusinessDayConvention::Backward => "backward",
            BusinessDayConvention::ModifiedFollowing => "modifiedFollowing",
            BusinessDayConvention::ModifiedPreceding => "modifiedPreceding",
            BusinessDayConvention::ForwardUnlessMovingBack => "forwardUnlessMovingBack",
        }
    }

    /// All conventions.
    #[must_use]
    pub fn all() -> &'static [BusinessDayConvention] {
        &[
            BusinessDayConvention::Forward,
            BusinessDayConvention::Backward,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::ModifiedPreceding,
            BusinessDayConvention::ForwardUnlessMovingBack,
        ]
    }

    /// Whether business-day moves of sign `step` are meaningful under this
    /// convention.
    ///
    /// Forward-looking conventions reject backward moves and vice versa;
    /// ForwardUnlessMovingBack accepts both.
    #[must_use]
    pub fn allows_step(&self, step: i64) -> bool {
        match self {
            BusinessDayConvention::Forward | BusinessDayConvention::ModifiedFollowing => step >= 0,
            BusinessDayConvention::Backward | BusinessDayConvention::ModifiedPreceding => step <= 0,
            BusinessDayConvention::ForwardUnlessMovingBack => true,
        }
    }

    /// Adjusts `date` under this convention.
    pub fn adjust<C: NonWorkingDays + ?Sized>(&self, date: Date, calendar: &C) -> Date {
        adjust(date, *self, calendar)
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Forward => "Forward",
            BusinessDayConvention::Backward => "Backward",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::ForwardUnlessMovingBack => "Forward Unless Moving Back",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = DateCalcError;

    /// Parses a convention identifier.
    ///
    /// Case, `-`, `_` and spaces are ignored, so `modifiedFollowing`,
    /// `modified-following` and `MODIFIED_FOLLOWING` are equivalent. The
    /// market names `following`, `preceding` and `previous` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "forward" | "following" | "f" => Ok(BusinessDayConvention::Forward),
            "backward" | "preceding" | "previous" | "p" => Ok(BusinessDayConvention::Backward),
            "modifiedfollowing" | "mf" => Ok(BusinessDayConvention::ModifiedFollowing),
            "modifiedpreceding" | "modifiedprevious" | "mp" => {
                Ok(BusinessDayConvention::ModifiedPreceding)
            }
            "forwardunlessmovingback" | "forwardunlessnegative" => {
                Ok(BusinessDayConvention::ForwardUnlessMovingBack)
            }
            _ => Err(DateCalcError::unsupported_convention(s)),
        }
    }
}

/// Adjusts a date according to the given business day convention.
///
/// Equivalent to [`adjust_moving`] with a forward (positive) step, so with no
/// move involved ForwardUnlessMovingBack rolls forward like Forward.
pub fn adjust<C: NonWorkingDays + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    adjust_moving(date, convention, calendar, 1)
}

/// Adjusts a date that was reached by a move of sign `step`.
///
/// Only ForwardUnlessMovingBack looks at `step`: a negative step makes it
/// roll backward so that moving back never pushes a date past its origin.
///
/// Month comparison includes the year, so Dec 31 rolling to Jan 2 counts as
/// a month change.
pub fn adjust_moving<C: NonWorkingDays + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
    step: i64,
) -> Date {
    if calendar.is_working_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Forward => following(date, calendar),

        BusinessDayConvention::Backward => preceding(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.same_month(&date) {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.same_month(&date) {
                adjusted
            } else {
                following(date, calendar)
            }
        }

        BusinessDayConvention::ForwardUnlessMovingBack => {
            if step < 0 {
                preceding(date, calendar)
            } else {
                following(date, calendar)
            }
        }
    }
}

/// First working day on or after `date`.
fn following<C: NonWorkingDays + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while calendar.is_non_working_day(date) {
        date = date.add_days(1);
    }
    date
}

/// First working day on or before `date`.
fn preceding<C: NonWorkingDays + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while calendar.is_non_working_day(date) {
        date = date.add_days(-1);
    }
    date
}
