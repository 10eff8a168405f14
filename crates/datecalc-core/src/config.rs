//! Registry configuration.
//!
//! A [`RegistryConfig`] is the JSON document a [`HolidayRegistry`] is built
//! from: the settlement currency, the working week, defaults for new
//! calculators and the holiday sets themselves.
//!
//! ```json
//! {
//!   "settlement_currency": "USD",
//!   "working_week": ["Mon", "Tue", "Wed", "Thu", "Fri"],
//!   "default_convention": "modifiedFollowing",
//!   "spot_lag": 2,
//!   "holiday_sets": [
//!     { "name": "EUR", "holidays": ["2025-01-01", "2025-12-25"] }
//!   ]
//! }
//! ```
//!
//! [`HolidayRegistry`]: crate::registry::HolidayRegistry

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::calculator::DEFAULT_SPOT_LAG;
use crate::calendars::{BusinessDayConvention, HolidaySetData, WorkingWeek};
use crate::error::{DateCalcError, DateCalcResult};

/// Settlement currency observed by currency-pair calculators unless configured.
pub const DEFAULT_SETTLEMENT_CURRENCY: &str = "USD";

/// Largest spot lag accepted by validation.
pub const MAX_SPOT_LAG: u32 = 5;

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            Some(rule) => write!(f, "{}: {} (rule: {})", self.field, self.message, rule),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns every problem found, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and folds all problems into one error.
    fn validate_or_error(&self) -> DateCalcResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(DateCalcError::InvalidConfig { message })
    }
}

fn default_settlement_currency() -> String {
    DEFAULT_SETTLEMENT_CURRENCY.to_string()
}

fn default_spot_lag() -> u32 {
    DEFAULT_SPOT_LAG
}

/// Configuration for a holiday registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Currency whose holidays every currency pair also observes.
    #[serde(default = "default_settlement_currency")]
    pub settlement_currency: String,

    /// Working days applied to every calendar the registry builds.
    #[serde(default)]
    pub working_week: WorkingWeek,

    /// Convention used when a caller does not name one.
    #[serde(default)]
    pub default_convention: BusinessDayConvention,

    /// Business days from trade date to spot.
    #[serde(default = "default_spot_lag")]
    pub spot_lag: u32,

    /// Holiday data, one entry per calendar name.
    #[serde(default)]
    pub holiday_sets: Vec<HolidaySetData>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            settlement_currency: default_settlement_currency(),
            working_week: WorkingWeek::default(),
            default_convention: BusinessDayConvention::default(),
            spot_lag: DEFAULT_SPOT_LAG,
            holiday_sets: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(json: &str) -> DateCalcResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DateCalcError::calendar_error(format!("Failed to parse config: {e}")))
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DateCalcResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DateCalcError::calendar_error(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> DateCalcResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DateCalcError::calendar_error(format!("Failed to serialize config: {e}")))
    }

    /// Adds a holiday set.
    #[must_use]
    pub fn with_holiday_set(mut self, data: HolidaySetData) -> Self {
        self.holiday_sets.push(data);
        self
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.settlement_currency.len() != 3
            || !self
                .settlement_currency
                .chars()
                .all(|c| c.is_ascii_uppercase())
        {
            errors.push(ValidationError::with_rule(
                "settlement_currency",
                format!(
                    "'{}' is not a three-letter currency code",
                    self.settlement_currency
                ),
                "currency_code",
            ));
        }

        if self.working_week.is_empty() {
            errors.push(ValidationError::with_rule(
                "working_week",
                "At least one weekday must be a working day",
                "non_empty_week",
            ));
        }

        if self.spot_lag > MAX_SPOT_LAG {
            errors.push(ValidationError::with_rule(
                "spot_lag",
                format!("Spot lag cannot exceed {MAX_SPOT_LAG} business days"),
                "max_spot_lag",
            ));
        }

        let mut seen = HashSet::new();
        for (i, data) in self.holiday_sets.iter().enumerate() {
            if data.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("holiday_sets[{i}].name"),
                    "Name cannot be empty",
                ));
            } else if !seen.insert(data.name.as_str()) {
                errors.push(ValidationError::with_rule(
                    format!("holiday_sets[{i}].name"),
                    format!("Duplicate holiday set '{}'", data.name),
                    "unique_name",
                ));
            }

            if let Err(e) = data.clone().build() {
                errors.push(ValidationError::new(
                    format!("holiday_sets[{i}]"),
                    e.to_string(),
                ));
            }
        }

        errors
    }
}
