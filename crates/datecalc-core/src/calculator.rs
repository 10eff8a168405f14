//! Date calculators: a named calendar bound to a business day convention.
//!
//! Calculators are immutable. Every operation takes the date to work on as
//! an argument and returns a new date, so one calculator can be shared
//! freely across threads.

use std::fmt;

use tracing::debug;

use crate::calendars::{
    adjust_moving, step_business_days, BusinessCalendar, BusinessDayConvention, NonWorkingDays,
};
use crate::error::{DateCalcError, DateCalcResult};
use crate::periods::{add_period, signed_amount};
use crate::types::{Date, PeriodUnit, Tenor, TenorCode};

/// Spot lag used by FX and most money markets (T+2).
pub const DEFAULT_SPOT_LAG: u32 = 2;

/// A business calendar plus the convention used to adjust dates against it.
///
/// # Example
///
/// ```rust
/// use datecalc_core::calculator::DateCalculator;
/// use datecalc_core::calendars::{BusinessCalendar, BusinessDayConvention};
/// use datecalc_core::types::Date;
///
/// let calc = DateCalculator::new(
///     "WEEKEND",
///     BusinessCalendar::weekends_only(),
///     BusinessDayConvention::Forward,
/// );
/// let saturday = Date::from_ymd(2025, 1, 4).unwrap();
/// assert_eq!(calc.adjust(saturday).unwrap(), Date::from_ymd(2025, 1, 6).unwrap());
/// ```
#[derive(Clone)]
pub struct DateCalculator {
    name: String,
    calendar: BusinessCalendar,
    convention: BusinessDayConvention,
}

impl DateCalculator {
    /// Creates a calculator.
    pub fn new(
        name: impl Into<String>,
        calendar: BusinessCalendar,
        convention: BusinessDayConvention,
    ) -> Self {
        Self {
            name: name.into(),
            calendar,
            convention,
        }
    }

    /// Calendar name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying calendar.
    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// The convention applied by this calculator.
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Same calendar, different convention.
    #[must_use]
    pub fn with_convention(&self, convention: BusinessDayConvention) -> Self {
        Self {
            convention,
            ..self.clone()
        }
    }

    /// True for weekends and holidays.
    pub fn is_non_working_day(&self, date: Date) -> bool {
        self.calendar.is_non_working_day(date)
    }

    /// True for business days.
    pub fn is_working_day(&self, date: Date) -> bool {
        self.calendar.is_working_day(date)
    }

    /// Adjusts `date` to a working day under the calculator's convention.
    pub fn adjust(&self, date: Date) -> DateCalcResult<Date> {
        self.checked(date, |d| Ok(adjust_moving(d, self.convention, &self.calendar, 1)))
    }

    /// Moves `days` calendar days, then adjusts in the direction of the move.
    ///
    /// # Errors
    ///
    /// `InvalidDate` if the move leaves the representable date range.
    pub fn move_by_days(&self, date: Date, days: i64) -> DateCalcResult<Date> {
        self.checked(date, |d| {
            let raw = d.checked_add_days(days)?;
            Ok(adjust_moving(raw, self.convention, &self.calendar, days))
        })
    }

    /// Moves `days` business days.
    ///
    /// # Errors
    ///
    /// `IncompatibleDirection` if the convention only looks the other way
    /// (e.g. a negative move under Forward). ForwardUnlessMovingBack accepts
    /// both directions.
    pub fn move_by_business_days(&self, date: Date, days: i64) -> DateCalcResult<Date> {
        if !self.convention.allows_step(days) {
            return Err(DateCalcError::IncompatibleDirection {
                convention: self.convention.to_string(),
                direction: if days < 0 { "negative" } else { "positive" },
                step: days,
            });
        }
        self.checked(date, |d| step_business_days(d, days, &self.calendar))
    }

    /// Adds a calendar period, then adjusts.
    pub fn move_by_period(&self, date: Date, amount: i32, unit: PeriodUnit) -> DateCalcResult<Date> {
        self.calendar.check_boundary(date)?;
        let result = add_period(date, amount, unit, self.convention, &self.calendar)?;
        self.calendar.check_boundary(result)?;
        Ok(result)
    }

    /// Spot date: the adjusted trade date moved forward `spot_lag` business days.
    pub fn spot_date(&self, trade_date: Date, spot_lag: u32) -> DateCalcResult<Date> {
        let start = self.adjust(trade_date)?;
        self.checked(start, |d| {
            step_business_days(d, i64::from(spot_lag), &self.calendar)
        })
    }

    /// Value date of `tenor` traded on `trade_date`.
    ///
    /// ON and TN count business days from the (adjusted) trade date. Every
    /// other tenor is measured from spot: SP is spot itself, SN one business
    /// day after spot, and D/W/M/Y add a calendar period to spot and adjust.
    pub fn move_by_tenor(&self, trade_date: Date, tenor: Tenor, spot_lag: u32) -> DateCalcResult<Date> {
        let start = self.adjust(trade_date)?;

        let result = match tenor.code() {
            TenorCode::Overnight => step_business_days(start, 1, &self.calendar)?,
            TenorCode::TomorrowNext => step_business_days(start, 2, &self.calendar)?,
            _ => {
                let spot = self.spot_date(start, spot_lag)?;
                match (tenor.code(), tenor.period()) {
                    (TenorCode::SpotNext, _) => step_business_days(spot, 1, &self.calendar)?,
                    (_, Some((units, unit))) => {
                        add_period(spot, signed_amount(units)?, unit, self.convention, &self.calendar)?
                    }
                    _ => spot,
                }
            }
        };

        self.calendar.check_boundary(result)?;
        Ok(result)
    }

    /// Value dates for each tenor, in the order given.
    pub fn calculate_tenor_dates(
        &self,
        trade_date: Date,
        tenors: &[Tenor],
        spot_lag: u32,
    ) -> DateCalcResult<Vec<Date>> {
        tenors
            .iter()
            .map(|tenor| self.move_by_tenor(trade_date, *tenor, spot_lag))
            .collect()
    }

    /// Calculator over both calendars' holidays, named `A/B`.
    ///
    /// # Errors
    ///
    /// `IncompatibleCalendars` if the two calculators use different
    /// conventions.
    pub fn combine(&self, other: &DateCalculator) -> DateCalcResult<DateCalculator> {
        if self.name == other.name {
            return Ok(self.clone());
        }
        if self.convention != other.convention {
            return Err(DateCalcError::IncompatibleCalendars {
                reason: format!(
                    "'{}' uses {} but '{}' uses {}",
                    self.name, self.convention, other.name, other.convention
                ),
            });
        }

        let name = format!("{}/{}", self.name, other.name);
        debug!(calendar = %name, convention = %self.convention, "combined calculators");
        Ok(DateCalculator {
            name,
            calendar: self.calendar.union(&other.calendar),
            convention: self.convention,
        })
    }

    fn checked(
        &self,
        date: Date,
        op: impl FnOnce(Date) -> DateCalcResult<Date>,
    ) -> DateCalcResult<Date> {
        self.calendar.check_boundary(date)?;
        let result = op(date)?;
        self.calendar.check_boundary(result)?;
        Ok(result)
    }
}

impl fmt::Debug for DateCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateCalculator")
            .field("name", &self.name)
            .field("convention", &self.convention)
            .field("calendar", &self.calendar)
            .finish()
    }
}

/// Settlement calculator for a currency pair.
///
/// Holidays of both currencies and of the settlement currency all count as
/// non-working days, and adjustment is always Forward.
#[derive(Debug, Clone)]
pub struct CurrencyDateCalculator {
    ccy1: String,
    ccy2: String,
    settlement: String,
    inner: DateCalculator,
}

impl CurrencyDateCalculator {
    /// Creates a calculator over an already combined calendar.
    pub fn new(
        ccy1: impl Into<String>,
        ccy2: impl Into<String>,
        settlement: impl Into<String>,
        calendar: BusinessCalendar,
    ) -> Self {
        let ccy1 = ccy1.into();
        let ccy2 = ccy2.into();
        let name = format!("{ccy1}/{ccy2}");
        Self {
            ccy1,
            ccy2,
            settlement: settlement.into(),
            inner: DateCalculator::new(name, calendar, BusinessDayConvention::Forward),
        }
    }

    /// First currency of the pair.
    pub fn ccy1(&self) -> &str {
        &self.ccy1
    }

    /// Second currency of the pair.
    pub fn ccy2(&self) -> &str {
        &self.ccy2
    }

    /// Settlement currency whose holidays are also observed.
    pub fn settlement_currency(&self) -> &str {
        &self.settlement
    }

    /// Pair name, `CCY1/CCY2`.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// The combined calendar.
    pub fn calendar(&self) -> &BusinessCalendar {
        self.inner.calendar()
    }

    /// True if any of the three calendars treats `date` as non-working.
    pub fn is_non_working_day(&self, date: Date) -> bool {
        self.inner.is_non_working_day(date)
    }

    /// Forward adjustment over the combined calendar.
    pub fn adjust(&self, date: Date) -> DateCalcResult<Date> {
        self.inner.adjust(date)
    }

    /// Spot date for a trade on `trade_date`.
    pub fn spot_date(&self, trade_date: Date, spot_lag: u32) -> DateCalcResult<Date> {
        self.inner.spot_date(trade_date, spot_lag)
    }

    /// Value date of `tenor`.
    pub fn move_by_tenor(&self, trade_date: Date, tenor: Tenor, spot_lag: u32) -> DateCalcResult<Date> {
        self.inner.move_by_tenor(trade_date, tenor, spot_lag)
    }

    /// Value dates for each tenor.
    pub fn calculate_tenor_dates(
        &self,
        trade_date: Date,
        tenors: &[Tenor],
        spot_lag: u32,
    ) -> DateCalcResult<Vec<Date>> {
        self.inner.calculate_tenor_dates(trade_date, tenors, spot_lag)
    }

    /// The general calculator backing this pair.
    pub fn as_date_calculator(&self) -> &DateCalculator {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{combined_calendar, HolidaySet};
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn calc(holidays: &[Date], convention: BusinessDayConvention) -> DateCalculator {
        let set = Arc::new(HolidaySet::new("TEST", holidays.iter().copied()));
        DateCalculator::new("TEST", BusinessCalendar::new([set]), convention)
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DateCalculator>();
        assert_send_sync::<CurrencyDateCalculator>();
    }

    #[test]
    fn test_move_by_days_adjusts_in_move_direction() {
        let c = calc(&[], BusinessDayConvention::ForwardUnlessMovingBack);
        let monday = d(2025, 1, 6);
        // -2 days = Saturday, moving back -> Friday
        assert_eq!(c.move_by_days(monday, -2).unwrap(), d(2025, 1, 3));
        // +5 days = Saturday, moving forward -> Monday
        assert_eq!(c.move_by_days(monday, 5).unwrap(), d(2025, 1, 13));
    }

    #[test]
    fn test_move_by_business_days() {
        let c = calc(&[d(2024, 12, 25), d(2024, 12, 26)], BusinessDayConvention::Forward);
        assert_eq!(
            c.move_by_business_days(d(2024, 12, 24), 1).unwrap(),
            d(2024, 12, 27)
        );
        assert_eq!(
            c.move_by_business_days(d(2024, 12, 24), 0).unwrap(),
            d(2024, 12, 24)
        );
    }

    #[test]
    fn test_move_by_business_days_rejects_wrong_direction() {
        let forward = calc(&[], BusinessDayConvention::ModifiedFollowing);
        assert!(matches!(
            forward.move_by_business_days(d(2025, 1, 6), -1),
            Err(DateCalcError::IncompatibleDirection { step: -1, .. })
        ));

        let backward = calc(&[], BusinessDayConvention::Backward);
        assert!(backward.move_by_business_days(d(2025, 1, 6), 1).is_err());
        assert_eq!(
            backward.move_by_business_days(d(2025, 1, 6), -1).unwrap(),
            d(2025, 1, 3)
        );

        let either = calc(&[], BusinessDayConvention::ForwardUnlessMovingBack);
        assert!(either.move_by_business_days(d(2025, 1, 6), -3).is_ok());
        assert!(either.move_by_business_days(d(2025, 1, 6), 3).is_ok());
    }

    #[test]
    fn test_move_by_period() {
        let c = calc(&[], BusinessDayConvention::ModifiedFollowing);
        assert_eq!(
            c.move_by_period(d(2024, 8, 31), 3, PeriodUnit::Month).unwrap(),
            d(2024, 11, 29)
        );
    }

    #[test]
    fn test_tenors_from_trade_date() {
        let c = calc(&[], BusinessDayConvention::ModifiedFollowing);
        // Thursday 2 Jan 2025, spot T+2 = Monday 6 Jan
        let trade = d(2025, 1, 2);
        let tenor = |s: &str| s.parse::<Tenor>().unwrap();

        assert_eq!(c.move_by_tenor(trade, tenor("ON"), 2).unwrap(), d(2025, 1, 3));
        assert_eq!(c.move_by_tenor(trade, tenor("TN"), 2).unwrap(), d(2025, 1, 6));
        assert_eq!(c.move_by_tenor(trade, tenor("SP"), 2).unwrap(), d(2025, 1, 6));
        assert_eq!(c.move_by_tenor(trade, tenor("SN"), 2).unwrap(), d(2025, 1, 7));
        assert_eq!(c.move_by_tenor(trade, tenor("1W"), 2).unwrap(), d(2025, 1, 13));
        assert_eq!(c.move_by_tenor(trade, tenor("1M"), 2).unwrap(), d(2025, 2, 6));
        // 6 Jul 2025 is a Sunday
        assert_eq!(c.move_by_tenor(trade, tenor("6M"), 2).unwrap(), d(2025, 7, 7));
    }

    #[test]
    fn test_calculate_tenor_dates_keeps_order() {
        let c = calc(&[], BusinessDayConvention::Forward);
        let tenors: Vec<Tenor> = ["1M", "SP", "ON"].iter().map(|s| s.parse().unwrap()).collect();
        let dates = c.calculate_tenor_dates(d(2025, 1, 2), &tenors, 2).unwrap();
        assert_eq!(dates, vec![d(2025, 2, 6), d(2025, 1, 6), d(2025, 1, 3)]);
    }

    #[test]
    fn test_spot_from_weekend_trade_date() {
        let c = calc(&[], BusinessDayConvention::Forward);
        // Saturday -> Monday, then +2
        assert_eq!(c.spot_date(d(2025, 1, 4), 2).unwrap(), d(2025, 1, 8));
        assert_eq!(c.spot_date(d(2025, 1, 4), 0).unwrap(), d(2025, 1, 6));
    }

    #[test]
    fn test_moves_out_of_range_are_errors() {
        let c = calc(&[], BusinessDayConvention::ForwardUnlessMovingBack);
        let start = d(2024, 1, 1);
        assert!(matches!(
            c.move_by_days(start, 1_000_000_000),
            Err(DateCalcError::InvalidDate { .. })
        ));
        assert!(matches!(
            c.move_by_days(start, i64::MIN),
            Err(DateCalcError::InvalidDate { .. })
        ));
        assert!(matches!(
            c.move_by_business_days(start, -1_000_000_000),
            Err(DateCalcError::InvalidDate { .. })
        ));
        assert!(matches!(
            c.move_by_period(start, i32::MAX, PeriodUnit::Week),
            Err(DateCalcError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_boundary_enforced() {
        let set = Arc::new(
            HolidaySet::new("GBP", [d(2024, 12, 25)])
                .with_boundaries(Some(d(2024, 1, 1)), Some(d(2024, 12, 31))),
        );
        let c = DateCalculator::new("GBP", BusinessCalendar::new([set]), BusinessDayConvention::Forward);

        assert!(c.adjust(d(2024, 6, 1)).is_ok());
        assert!(matches!(
            c.adjust(d(2025, 1, 4)),
            Err(DateCalcError::OutsideCalendarBoundary { .. })
        ));
        // input inside, result outside
        assert!(c.move_by_days(d(2024, 12, 30), 5).is_err());
    }

    #[test]
    fn test_combine() {
        let eur = calc(&[d(2024, 5, 1)], BusinessDayConvention::Forward);
        let gbp = DateCalculator::new(
            "GBP",
            BusinessCalendar::new([Arc::new(HolidaySet::new("GBP", [d(2024, 5, 6)]))]),
            BusinessDayConvention::Forward,
        );
        let both = eur.combine(&gbp).unwrap();
        assert_eq!(both.name(), "TEST/GBP");
        assert!(both.is_non_working_day(d(2024, 5, 1)));
        assert!(both.is_non_working_day(d(2024, 5, 6)));

        let backward = gbp.with_convention(BusinessDayConvention::Backward);
        assert!(matches!(
            eur.combine(&backward),
            Err(DateCalcError::IncompatibleCalendars { .. })
        ));

        // same name combines to itself
        assert_eq!(eur.combine(&eur).unwrap().name(), "TEST");
    }

    #[test]
    fn test_currency_calculator_uses_all_three_calendars() {
        let eur = Arc::new(HolidaySet::new("EUR", [d(2025, 1, 6)]));
        let gbp = Arc::new(HolidaySet::new("GBP", [d(2025, 1, 7)]));
        let usd = Arc::new(HolidaySet::new("USD", [d(2025, 1, 8)]));
        let cal = combined_calendar(&[eur, gbp, usd]);
        let calc = CurrencyDateCalculator::new("EUR", "GBP", "USD", cal);

        assert_eq!(calc.name(), "EUR/GBP");
        assert_eq!(calc.settlement_currency(), "USD");
        assert_eq!(
            calc.as_date_calculator().convention(),
            BusinessDayConvention::Forward
        );
        // Fri 3 Jan + 2 business days skipping Mon, Tue, Wed holidays -> Fri 10 Jan
        assert_eq!(calc.spot_date(d(2025, 1, 3), 2).unwrap(), d(2025, 1, 10));
    }
}
