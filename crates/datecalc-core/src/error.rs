//! Error types for the datecalc library.
//!
//! The core algorithms (conventions, stepping, IMM) are total; errors only
//! surface at the boundary: parsing identifiers, loading holiday data, or
//! asking a calculator to work outside the range its holidays cover.

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for datecalc operations.
pub type DateCalcResult<T> = Result<T, DateCalcError>;

/// The main error type for datecalc operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateCalcError {
    /// Error in date construction or arithmetic out of range.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Unrecognized business day convention identifier.
    #[error("Unsupported business day convention: {name}")]
    UnsupportedConvention {
        /// The identifier that was not recognized.
        name: String,
    },

    /// Unrecognized period count basis identifier.
    #[error("Unsupported period count basis: {name}")]
    UnsupportedBasis {
        /// The identifier that was not recognized.
        name: String,
    },

    /// Unrecognized IMM period identifier.
    #[error("Unsupported IMM period: {name}")]
    UnsupportedImmPeriod {
        /// The identifier that was not recognized.
        name: String,
    },

    /// A tenor string could not be parsed.
    #[error("Invalid tenor '{tenor}': {reason}")]
    InvalidTenor {
        /// The offending tenor text.
        tenor: String,
        /// Reason for rejection.
        reason: String,
    },

    /// A date fell outside the range covered by a holiday set.
    #[error("{date} is outside the boundary of calendar '{calendar}' [{early}, {late}]")]
    OutsideCalendarBoundary {
        /// The date that was checked.
        date: Date,
        /// Name of the holiday set that rejected it.
        calendar: String,
        /// Earliest supported date (or "-" when open).
        early: String,
        /// Latest supported date (or "-" when open).
        late: String,
    },

    /// A business-day move in a direction the convention does not allow.
    #[error("{convention} does not allow {direction} business day moves (requested {step})")]
    IncompatibleDirection {
        /// Convention name.
        convention: String,
        /// "positive" or "negative".
        direction: &'static str,
        /// The requested step count.
        step: i64,
    },

    /// Two calculators cannot be combined.
    #[error("Cannot combine calendars: {reason}")]
    IncompatibleCalendars {
        /// Why the combination was refused.
        reason: String,
    },

    /// A configuration failed validation.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// All validation problems, joined.
        message: String,
    },

    /// Holiday data could not be loaded or saved.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl DateCalcError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unsupported convention error.
    #[must_use]
    pub fn unsupported_convention(name: impl Into<String>) -> Self {
        Self::UnsupportedConvention { name: name.into() }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(tenor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            tenor: tenor.into(),
            reason: reason.into(),
        }
    }

    /// Creates a calendar (load/save) error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DateCalcError::invalid_date("2024-02-30");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_unsupported_convention_display() {
        let err = DateCalcError::unsupported_convention("sideways");
        assert_eq!(
            err.to_string(),
            "Unsupported business day convention: sideways"
        );
    }

    #[test]
    fn test_boundary_display() {
        let err = DateCalcError::OutsideCalendarBoundary {
            date: Date::from_ymd(2031, 1, 2).unwrap(),
            calendar: "GBP".into(),
            early: "2020-01-01".into(),
            late: "2030-12-31".into(),
        };
        assert!(err.to_string().contains("2031-01-02"));
        assert!(err.to_string().contains("GBP"));
    }
}
