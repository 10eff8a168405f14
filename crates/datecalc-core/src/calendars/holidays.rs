//! Named holiday sets.
//!
//! A holiday set is plain data supplied by the caller: a name, a set of
//! dates and, optionally, the range of dates for which the set is known to
//! be complete. Nothing here generates holidays.
//!
//! # Example
//!
//! ```
//! use datecalc_core::calendars::HolidaySet;
//! use datecalc_core::types::Date;
//!
//! let gbp = HolidaySet::new(
//!     "GBP",
//!     [Date::from_ymd(2024, 12, 25).unwrap(), Date::from_ymd(2024, 12, 26).unwrap()],
//! );
//! assert!(gbp.contains(Date::from_ymd(2024, 12, 26).unwrap()));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{DateCalcError, DateCalcResult};
use crate::types::Date;

/// An immutable, named set of holiday dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    name: String,
    dates: BTreeSet<Date>,
    early_boundary: Option<Date>,
    late_boundary: Option<Date>,
}

impl HolidaySet {
    /// Creates a holiday set without boundaries.
    pub fn new(name: impl Into<String>, dates: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            dates: dates.into_iter().collect(),
            early_boundary: None,
            late_boundary: None,
        }
    }

    /// An empty set; only the weekend applies.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, std::iter::empty())
    }

    /// Restricts the range of dates this set can answer for.
    ///
    /// Either bound may be open (`None`).
    #[must_use]
    pub fn with_boundaries(mut self, early: Option<Date>, late: Option<Date>) -> Self {
        self.early_boundary = early;
        self.late_boundary = late;
        self
    }

    /// Name (identity) of the set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if `date` is a holiday in this set.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }

    /// Number of holidays.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True if the set holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Date> + '_ {
        self.dates.iter().copied()
    }

    /// Earliest date the set is valid for, if bounded.
    pub fn early_boundary(&self) -> Option<Date> {
        self.early_boundary
    }

    /// Latest date the set is valid for, if bounded.
    pub fn late_boundary(&self) -> Option<Date> {
        self.late_boundary
    }

    /// True if `date` lies within the boundaries (always true when unbounded).
    pub fn covers(&self, date: Date) -> bool {
        self.early_boundary.map_or(true, |early| date >= early)
            && self.late_boundary.map_or(true, |late| date <= late)
    }

    /// Fails with `OutsideCalendarBoundary` if `date` is not covered.
    pub fn check_boundary(&self, date: Date) -> DateCalcResult<()> {
        if self.covers(date) {
            return Ok(());
        }
        let show = |d: Option<Date>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
        Err(DateCalcError::OutsideCalendarBoundary {
            date,
            calendar: self.name.clone(),
            early: show(self.early_boundary),
            late: show(self.late_boundary),
        })
    }

    /// Union of two sets, named `A/B`.
    ///
    /// The result is bounded by the intersection of both ranges.
    #[must_use]
    pub fn union(&self, other: &HolidaySet) -> HolidaySet {
        HolidaySet {
            name: format!("{}/{}", self.name, other.name),
            dates: self.dates.union(&other.dates).copied().collect(),
            early_boundary: tighter(self.early_boundary, other.early_boundary, std::cmp::max),
            late_boundary: tighter(self.late_boundary, other.late_boundary, std::cmp::min),
        }
    }

    /// Loads a set from JSON text (see [`HolidaySetData`]).
    pub fn from_json(json: &str) -> DateCalcResult<Self> {
        let data: HolidaySetData = serde_json::from_str(json)
            .map_err(|e| DateCalcError::calendar_error(format!("Failed to parse JSON: {e}")))?;
        data.build()
    }

    /// Loads a set from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DateCalcResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DateCalcError::calendar_error(format!("Failed to read file: {e}")))?;
        Self::from_json(&content)
    }

    /// Exports to the serializable form.
    pub fn to_data(&self) -> HolidaySetData {
        HolidaySetData {
            name: self.name.clone(),
            holidays: self.dates.iter().map(ToString::to_string).collect(),
            early_boundary: self.early_boundary.map(|d| d.to_string()),
            late_boundary: self.late_boundary.map(|d| d.to_string()),
        }
    }

    /// Exports to pretty-printed JSON.
    pub fn to_json(&self) -> DateCalcResult<String> {
        serde_json::to_string_pretty(&self.to_data())
            .map_err(|e| DateCalcError::calendar_error(format!("Failed to serialize: {e}")))
    }
}

fn tighter(a: Option<Date>, b: Option<Date>, pick: fn(Date, Date) -> Date) -> Option<Date> {
    match (a, b) {
        (Some(x), Some(y)) => Some(pick(x, y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Serializable form of a [`HolidaySet`].
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "EUR",
///   "holidays": ["2024-12-25", "2024-12-26"],
///   "early_boundary": "2024-01-01",
///   "late_boundary": "2024-12-31"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySetData {
    /// Name of the set (usually a currency or market code).
    pub name: String,

    /// Holiday dates in YYYY-MM-DD format.
    #[serde(default)]
    pub holidays: Vec<String>,

    /// Earliest covered date, YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_boundary: Option<String>,

    /// Latest covered date, YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_boundary: Option<String>,
}

impl HolidaySetData {
    /// Creates empty data for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: Vec::new(),
            early_boundary: None,
            late_boundary: None,
        }
    }

    /// Adds a holiday date string.
    #[must_use]
    pub fn with_holiday(mut self, date: &str) -> Self {
        self.holidays.push(date.to_string());
        self
    }

    /// Sets the covered range.
    #[must_use]
    pub fn with_boundaries(mut self, early: Option<&str>, late: Option<&str>) -> Self {
        self.early_boundary = early.map(str::to_string);
        self.late_boundary = late.map(str::to_string);
        self
    }

    /// Parses all dates and builds the set.
    pub fn build(self) -> DateCalcResult<HolidaySet> {
        let parse = |s: &str| {
            Date::parse(s).map_err(|_| {
                DateCalcError::calendar_error(format!("Invalid date '{s}' in '{}'", self.name))
            })
        };
        let dates = self
            .holidays
            .iter()
            .map(|s| parse(s.as_str()))
            .collect::<DateCalcResult<Vec<_>>>()?;
        let early = self.early_boundary.as_deref().map(parse).transpose()?;
        let late = self.late_boundary.as_deref().map(parse).transpose()?;

        if let (Some(e), Some(l)) = (early, late) {
            if e > l {
                return Err(DateCalcError::calendar_error(format!(
                    "Early boundary {e} is after late boundary {l} in '{}'",
                    self.name
                )));
            }
        }

        Ok(HolidaySet::new(self.name, dates).with_boundaries(early, late))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_contains_and_len() {
        let set = HolidaySet::new("EUR", [d(2024, 12, 25), d(2024, 12, 26), d(2024, 12, 25)]);
        assert_eq!(set.name(), "EUR");
        assert_eq!(set.len(), 2);
        assert!(set.contains(d(2024, 12, 25)));
        assert!(!set.contains(d(2024, 12, 24)));
        assert!(HolidaySet::empty("XXX").is_empty());
    }

    #[test]
    fn test_boundaries() {
        let set = HolidaySet::new("GBP", [d(2024, 12, 25)])
            .with_boundaries(Some(d(2024, 1, 1)), Some(d(2024, 12, 31)));
        assert!(set.covers(d(2024, 6, 1)));
        assert!(!set.covers(d(2025, 1, 1)));
        assert!(set.check_boundary(d(2024, 1, 1)).is_ok());
        assert!(matches!(
            set.check_boundary(d(2023, 12, 31)),
            Err(DateCalcError::OutsideCalendarBoundary { .. })
        ));

        let open_late = HolidaySet::empty("X").with_boundaries(Some(d(2024, 1, 1)), None);
        assert!(open_late.covers(d(2999, 1, 1)));
    }

    #[test]
    fn test_union() {
        let eur = HolidaySet::new("EUR", [d(2024, 5, 1)])
            .with_boundaries(Some(d(2020, 1, 1)), Some(d(2030, 12, 31)));
        let gbp = HolidaySet::new("GBP", [d(2024, 5, 6)])
            .with_boundaries(Some(d(2022, 1, 1)), None);
        let both = eur.union(&gbp);
        assert_eq!(both.name(), "EUR/GBP");
        assert_eq!(both.len(), 2);
        assert_eq!(both.early_boundary(), Some(d(2022, 1, 1)));
        assert_eq!(both.late_boundary(), Some(d(2030, 12, 31)));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "name": "USD",
            "holidays": ["2024-07-04", "2024-12-25"],
            "late_boundary": "2024-12-31"
        }"#;
        let set = HolidaySet::from_json(json).unwrap();
        assert_eq!(set.name(), "USD");
        assert!(set.contains(d(2024, 7, 4)));
        assert_eq!(set.early_boundary(), None);
        assert_eq!(set.late_boundary(), Some(d(2024, 12, 31)));
    }

    #[test]
    fn test_from_json_rejects_bad_dates() {
        let json = r#"{"name": "USD", "holidays": ["2024-13-01"]}"#;
        assert!(matches!(
            HolidaySet::from_json(json),
            Err(DateCalcError::CalendarError { .. })
        ));

        let inverted = HolidaySetData::new("X").with_boundaries(Some("2025-01-01"), Some("2024-01-01"));
        assert!(inverted.build().is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let set = HolidaySet::new("JPY", [d(2025, 1, 1), d(2025, 1, 2)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jpy.json");
        std::fs::write(&path, set.to_json().unwrap()).unwrap();

        let loaded = HolidaySet::from_json_file(&path).unwrap();
        assert_eq!(loaded, set);
    }
}
