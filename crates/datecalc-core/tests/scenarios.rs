//! End-to-end scenarios through the registry, as a caller would use it.

use datecalc_core::prelude::*;
use datecalc_core::calendars::HolidaySetData;
use datecalc_core::daycounts::{day_diff, year_diff};
use datecalc_core::imm::imm_dates;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

const CONFIG: &str = r#"{
    "settlement_currency": "USD",
    "default_convention": "modifiedFollowing",
    "holiday_sets": [
        {
            "name": "GBP",
            "holidays": ["2024-12-25", "2024-12-26", "2025-01-01", "2025-04-18", "2025-04-21"],
            "early_boundary": "2024-01-01",
            "late_boundary": "2025-12-31"
        },
        {
            "name": "EUR",
            "holidays": ["2024-12-25", "2024-12-26", "2025-01-01", "2025-04-18", "2025-04-21", "2025-05-01"]
        },
        {
            "name": "USD",
            "holidays": ["2024-11-28", "2024-12-25", "2025-01-01", "2025-01-20", "2025-05-26", "2025-07-04"]
        }
    ]
}"#;

fn registry() -> HolidayRegistry {
    let config = RegistryConfig::from_json(CONFIG).unwrap();
    HolidayRegistry::from_config(&config).unwrap()
}

#[test]
fn saturday_forward_is_monday() {
    let calc = registry().calculator("NONE", BusinessDayConvention::Forward);
    assert_eq!(calc.adjust(d(2024, 6, 8)).unwrap(), d(2024, 6, 10));
}

#[test]
fn christmas_modified_following() {
    let calc = registry()
        .date_calculator("GBP", "modifiedFollowing")
        .unwrap();
    assert_eq!(calc.adjust(d(2024, 12, 25)).unwrap(), d(2024, 12, 27));
    assert_eq!(calc.adjust(d(2024, 12, 24)).unwrap(), d(2024, 12, 24));
}

#[test]
fn month_end_falls_back() {
    let mut registry = registry();
    registry.register(HolidaySet::new("XMAS", [d(2024, 11, 29)]));
    let calc = registry.calculator("XMAS", BusinessDayConvention::ModifiedFollowing);
    assert_eq!(calc.adjust(d(2024, 11, 29)).unwrap(), d(2024, 11, 28));
}

#[test]
fn one_month_from_january_31() {
    let calc = registry().calculator("NONE", BusinessDayConvention::Forward);
    assert_eq!(
        calc.move_by_period(d(2024, 1, 31), 1, PeriodUnit::Month).unwrap(),
        d(2024, 2, 29)
    );
}

#[test]
fn gbp_boundary_rejects_dates_outside_data() {
    let calc = registry().calculator("GBP", BusinessDayConvention::Forward);
    assert!(calc.adjust(d(2025, 12, 31)).is_ok());
    assert!(matches!(
        calc.adjust(d(2026, 1, 2)),
        Err(DateCalcError::OutsideCalendarBoundary { .. })
    ));
}

#[test]
fn eur_gbp_spot_over_easter() {
    let calc = registry().currency_calculator("EUR", "GBP");
    // Thu 17 Apr 2025: Good Friday and Easter Monday are closed
    assert_eq!(calc.spot_date(d(2025, 4, 17), 2).unwrap(), d(2025, 4, 23));
}

#[test]
fn eur_gbp_observes_usd_holidays() {
    let calc = registry().currency_calculator("EUR", "GBP");
    // Mon 20 Jan 2025 is a USD holiday
    assert_eq!(calc.spot_date(d(2025, 1, 16), 2).unwrap(), d(2025, 1, 21));
    assert_eq!(calc.spot_date(d(2025, 1, 17), 2).unwrap(), d(2025, 1, 22));
}

#[test]
fn tenor_strip() {
    let calc = registry().currency_calculator("EUR", "USD");
    let tenors: Vec<Tenor> = ["ON", "TN", "SP", "SN", "1W", "1M", "3M"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    // Mon 26 May 2025 is a USD holiday, trade on Thu 22 May
    let dates = calc.calculate_tenor_dates(d(2025, 5, 22), &tenors, 2).unwrap();
    assert_eq!(
        dates,
        vec![
            d(2025, 5, 23),
            d(2025, 5, 27),
            d(2025, 5, 27),
            d(2025, 5, 28),
            d(2025, 6, 3),
            d(2025, 6, 27),
            d(2025, 8, 27),
        ]
    );
}

#[test]
fn combine_requires_same_convention() {
    let registry = registry();
    let gbp = registry.calculator("GBP", BusinessDayConvention::Forward);
    let usd = registry.calculator("USD", BusinessDayConvention::Forward);
    let both = gbp.combine(&usd).unwrap();
    assert!(both.is_non_working_day(d(2024, 11, 28)));
    assert!(both.is_non_working_day(d(2024, 12, 26)));

    let usd_mf = usd.with_convention(BusinessDayConvention::ModifiedFollowing);
    assert!(gbp.combine(&usd_mf).is_err());
}

#[test]
fn imm_strip_for_2025() {
    let dates = imm_dates(d(2024, 12, 31), d(2025, 12, 31), ImmPeriod::Quarterly);
    assert_eq!(
        dates,
        vec![d(2025, 3, 19), d(2025, 6, 18), d(2025, 9, 17), d(2025, 12, 17)]
    );
    assert!(dates.iter().all(|date| is_imm_date(*date)));
}

#[test]
fn period_counts() {
    let start = d(2025, 1, 15);
    let end = d(2025, 7, 15);
    assert_eq!(day_diff(start, end, PeriodCountBasis::Conv30_360), 180);
    assert_eq!(day_diff(start, end, PeriodCountBasis::Act360), 181);
    assert_eq!(year_diff(start, end, PeriodCountBasis::Conv360E_Isma), dec!(0.5));
}

#[test]
fn holiday_set_file_feeds_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jpy.json");
    let data = HolidaySetData::new("JPY")
        .with_holiday("2025-01-01")
        .with_holiday("2025-01-13");
    std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

    let mut registry = HolidayRegistry::new();
    registry.register(HolidaySet::from_json_file(&path).unwrap());
    let calc = registry.calculator("JPY", BusinessDayConvention::Backward);
    assert_eq!(calc.adjust(d(2025, 1, 13)).unwrap(), d(2025, 1, 10));
}
