//! Holiday registry: named holiday sets and the calculators built on them.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::calculator::{CurrencyDateCalculator, DateCalculator};
use crate::calendars::{combined_calendar, BusinessCalendar, BusinessDayConvention, HolidaySet, WorkingWeek};
use crate::config::{RegistryConfig, Validate, DEFAULT_SETTLEMENT_CURRENCY};
use crate::error::DateCalcResult;

/// Named holiday sets owned by the caller.
///
/// Lookups by an unknown name do not fail: they yield an empty holiday set,
/// so the resulting calendar only has weekends. Register every set you rely
/// on before asking for calculators.
///
/// # Example
///
/// ```rust
/// use datecalc_core::calendars::HolidaySet;
/// use datecalc_core::registry::HolidayRegistry;
/// use datecalc_core::types::Date;
///
/// let mut registry = HolidayRegistry::new();
/// registry.register(HolidaySet::new("GBP", [Date::from_ymd(2025, 12, 25).unwrap()]));
///
/// let calc = registry.date_calculator("GBP", "modifiedFollowing").unwrap();
/// assert!(calc.is_non_working_day(Date::from_ymd(2025, 12, 25).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct HolidayRegistry {
    sets: HashMap<String, Arc<HolidaySet>>,
    working_week: WorkingWeek,
    settlement_currency: String,
}

impl Default for HolidayRegistry {
    fn default() -> Self {
        Self {
            sets: HashMap::new(),
            working_week: WorkingWeek::default(),
            settlement_currency: DEFAULT_SETTLEMENT_CURRENCY.to_string(),
        }
    }
}

impl HolidayRegistry {
    /// Empty registry with a Saturday/Sunday weekend and USD settlement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a validated configuration.
    pub fn from_config(config: &RegistryConfig) -> DateCalcResult<Self> {
        config.validate_or_error()?;

        let mut registry = Self::new()
            .with_working_week(config.working_week)
            .with_settlement_currency(config.settlement_currency.clone());
        for data in &config.holiday_sets {
            registry.register(data.clone().build()?);
        }

        debug!(
            sets = registry.len(),
            settlement = %registry.settlement_currency,
            "holiday registry loaded"
        );
        Ok(registry)
    }

    /// Replaces the working week used by every calendar built from now on.
    #[must_use]
    pub fn with_working_week(mut self, week: WorkingWeek) -> Self {
        self.working_week = week;
        self
    }

    /// Replaces the settlement currency for currency pairs.
    #[must_use]
    pub fn with_settlement_currency(mut self, ccy: impl Into<String>) -> Self {
        self.settlement_currency = ccy.into();
        self
    }

    /// Adds a set under its own name, returning any set it replaced.
    pub fn register(&mut self, set: HolidaySet) -> Option<Arc<HolidaySet>> {
        self.sets.insert(set.name().to_string(), Arc::new(set))
    }

    /// True if a set is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The working week in force.
    pub fn working_week(&self) -> WorkingWeek {
        self.working_week
    }

    /// Settlement currency for currency pairs.
    pub fn settlement_currency(&self) -> &str {
        &self.settlement_currency
    }

    /// The set registered under `name`, or an empty set if there is none.
    pub fn holiday_set(&self, name: &str) -> Arc<HolidaySet> {
        match self.sets.get(name) {
            Some(set) => Arc::clone(set),
            None => {
                debug!(calendar = name, "unknown holiday set, using weekends only");
                Arc::new(HolidaySet::empty(name))
            }
        }
    }

    /// Calendar for `name` under the registry's working week.
    pub fn calendar(&self, name: &str) -> BusinessCalendar {
        BusinessCalendar::new([self.holiday_set(name)]).with_working_week(self.working_week)
    }

    /// Calculator for `name` with the given convention.
    pub fn calculator(&self, name: &str, convention: BusinessDayConvention) -> DateCalculator {
        DateCalculator::new(name, self.calendar(name), convention)
    }

    /// Calculator for `name` with a convention given by identifier.
    ///
    /// # Errors
    ///
    /// `UnsupportedConvention` if `convention_id` is not recognized.
    pub fn date_calculator(&self, name: &str, convention_id: &str) -> DateCalcResult<DateCalculator> {
        let convention: BusinessDayConvention = convention_id.parse()?;
        Ok(self.calculator(name, convention))
    }

    /// Settlement calculator for `ccy1/ccy2`.
    ///
    /// Observes the holidays of both currencies and of the settlement
    /// currency; a currency that appears twice is only consulted once.
    pub fn currency_calculator(&self, ccy1: &str, ccy2: &str) -> CurrencyDateCalculator {
        let mut names: Vec<&str> = Vec::with_capacity(3);
        for name in [ccy1, ccy2, self.settlement_currency.as_str()] {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let sets: Vec<Arc<HolidaySet>> = names.iter().map(|name| self.holiday_set(name)).collect();
        let calendar = combined_calendar(&sets).with_working_week(self.working_week);
        CurrencyDateCalculator::new(ccy1, ccy2, self.settlement_currency.clone(), calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::HolidaySetData;
    use crate::error::DateCalcError;
    use crate::types::Date;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn registry() -> HolidayRegistry {
        let mut registry = HolidayRegistry::new();
        registry.register(HolidaySet::new("EUR", [d(2025, 5, 1)]));
        registry.register(HolidaySet::new("GBP", [d(2025, 5, 5)]));
        registry.register(HolidaySet::new("USD", [d(2025, 5, 26)]));
        registry
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), vec!["EUR", "GBP", "USD"]);
        assert!(registry.holiday_set("EUR").contains(d(2025, 5, 1)));

        let replaced = registry.register(HolidaySet::empty("EUR"));
        assert!(replaced.is_some());
        assert!(registry.holiday_set("EUR").is_empty());
    }

    #[test]
    fn test_unknown_name_is_weekends_only() {
        let registry = registry();
        let set = registry.holiday_set("XXX");
        assert!(set.is_empty());
        assert_eq!(set.name(), "XXX");

        let calc = registry.calculator("XXX", BusinessDayConvention::Forward);
        assert!(calc.is_working_day(d(2025, 5, 1)));
        assert!(calc.is_non_working_day(d(2025, 5, 3)));
    }

    #[test]
    fn test_date_calculator_by_identifier() {
        let registry = registry();
        let calc = registry.date_calculator("GBP", "modifiedPreceding").unwrap();
        assert_eq!(calc.convention(), BusinessDayConvention::ModifiedPreceding);
        assert_eq!(calc.name(), "GBP");

        assert!(matches!(
            registry.date_calculator("GBP", "sideways"),
            Err(DateCalcError::UnsupportedConvention { .. })
        ));
    }

    #[test]
    fn test_currency_calculator_includes_settlement() {
        let registry = registry();
        let calc = registry.currency_calculator("EUR", "GBP");
        assert!(calc.is_non_working_day(d(2025, 5, 1)));
        assert!(calc.is_non_working_day(d(2025, 5, 5)));
        assert!(calc.is_non_working_day(d(2025, 5, 26)));
        assert_eq!(calc.calendar().holiday_sets().len(), 3);

        let usd_pair = registry.currency_calculator("EUR", "USD");
        assert_eq!(usd_pair.calendar().holiday_sets().len(), 2);
    }

    #[test]
    fn test_settlement_currency_configurable() {
        let registry = registry().with_settlement_currency("GBP");
        let calc = registry.currency_calculator("EUR", "USD");
        assert_eq!(calc.settlement_currency(), "GBP");
        assert!(calc.is_non_working_day(d(2025, 5, 5)));
    }

    #[test]
    fn test_from_config() {
        let config = RegistryConfig {
            working_week: WorkingWeek::arabic(),
            ..RegistryConfig::default()
        }
        .with_holiday_set(HolidaySetData::new("AED").with_holiday("2025-03-31"));

        let registry = HolidayRegistry::from_config(&config).unwrap();
        assert!(registry.contains("AED"));
        let calc = registry.calculator("AED", BusinessDayConvention::Forward);
        // Friday is a weekend day, Sunday a working day
        assert!(calc.is_non_working_day(d(2025, 3, 28)));
        assert!(calc.is_working_day(d(2025, 3, 30)));
        assert!(calc.is_non_working_day(d(2025, 3, 31)));
    }

    #[test]
    fn test_from_invalid_config() {
        let config = RegistryConfig {
            spot_lag: 30,
            ..RegistryConfig::default()
        };
        assert!(matches!(
            HolidayRegistry::from_config(&config),
            Err(DateCalcError::InvalidConfig { .. })
        ));
    }
}
