//! Working week definition (which weekdays are working days).

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The set of weekdays that are working days.
///
/// Stored as a 7-bit mask indexed by `Weekday::num_days_from_monday`.
/// The default is Monday to Friday, i.e. a Saturday/Sunday weekend.
///
/// Serializes as a list of weekday names, e.g. `["Mon","Tue","Wed","Thu","Fri"]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkingWeek {
    mask: u8,
}

impl Default for WorkingWeek {
    fn default() -> Self {
        Self { mask: 0b001_1111 }
    }
}

impl WorkingWeek {
    /// Monday to Friday.
    #[must_use]
    pub fn monday_to_friday() -> Self {
        Self::default()
    }

    /// Sunday to Thursday (Friday/Saturday weekend).
    #[must_use]
    pub fn arabic() -> Self {
        Self::monday_to_friday()
            .with_working_day(Weekday::Fri, false)
            .with_working_day(Weekday::Sun, true)
    }

    /// Every day is a working day.
    #[must_use]
    pub fn seven_days() -> Self {
        Self { mask: 0b111_1111 }
    }

    /// Builds a week from an explicit list of working days.
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter()
            .fold(Self { mask: 0 }, |week, day| week.with_working_day(day, true))
    }

    /// Returns a copy with `day` marked as working or non-working.
    #[must_use]
    pub fn with_working_day(self, day: Weekday, working: bool) -> Self {
        let bit = 1u8 << day.num_days_from_monday();
        let mask = if working {
            self.mask | bit
        } else {
            self.mask & !bit
        };
        Self { mask }
    }

    /// True if `day` is a working day.
    #[inline]
    #[must_use]
    pub fn is_working_day(&self, day: Weekday) -> bool {
        self.mask & (1u8 << day.num_days_from_monday()) != 0
    }

    /// True if `day` is part of the weekend.
    #[inline]
    #[must_use]
    pub fn is_weekend(&self, day: Weekday) -> bool {
        !self.is_working_day(day)
    }

    /// Working days in Monday-first order.
    pub fn working_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_DAYS.into_iter().filter(|day| self.is_working_day(*day))
    }

    /// True if no weekday is a working day.
    ///
    /// Adjusting against such a week with Forward or Backward never terminates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

impl fmt::Debug for WorkingWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.working_days()).finish()
    }
}

impl fmt::Display for WorkingWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.working_days().map(|d| d.to_string()).collect();
        write!(f, "{}", names.join(","))
    }
}

impl Serialize for WorkingWeek {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names: Vec<String> = self.working_days().map(|d| d.to_string()).collect();
        names.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WorkingWeek {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        let days = names
            .iter()
            .map(|name| {
                name.parse::<Weekday>().map_err(|_| {
                    serde::de::Error::custom(format!("Unknown weekday: {name}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_days(days))
    }
}
