//! Daycount command implementation.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use datecalc_core::daycounts::PeriodCountBasis;

use crate::cli::OutputFormat;
use crate::commands::config::{setting, ConfigKey};
use crate::commands::parse_date;
use crate::output::{print_header, print_output};

/// Decimal places shown for month and year differences.
const PRECISION: u32 = 10;

/// Arguments for the daycount command.
#[derive(Args, Debug)]
pub struct DaycountArgs {
    /// Start date (YYYY-MM-DD or 'today')
    pub start: String,

    /// End date (YYYY-MM-DD or 'today')
    pub end: String,

    /// Period count basis (30/360, 360E/ISDA, 360E/ISMA, ACT/360, ACT/365,
    /// ACT/ACT); every basis when omitted
    #[arg(short, long)]
    pub basis: Option<String>,
}

/// Differences under one basis.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DaycountRow {
    #[tabled(rename = "Basis")]
    pub basis: String,
    #[tabled(rename = "Days")]
    pub days: i64,
    #[tabled(rename = "Months")]
    pub months: Decimal,
    #[tabled(rename = "Years")]
    pub years: Decimal,
}

/// Execute the daycount command.
pub fn execute(args: DaycountArgs, format: OutputFormat) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;

    let requested = match args.basis {
        Some(basis) => Some(basis),
        None => setting(ConfigKey::DefaultBasis)?,
    };
    let bases: Vec<PeriodCountBasis> = match requested {
        Some(basis) => vec![basis.parse()?],
        None => PeriodCountBasis::all().to_vec(),
    };

    let rows: Vec<DaycountRow> = bases
        .iter()
        .map(|basis| DaycountRow {
            basis: basis.name().to_string(),
            days: basis.day_diff(start, end),
            months: basis.month_diff(start, end).round_dp(PRECISION).normalize(),
            years: basis.year_diff(start, end).round_dp(PRECISION).normalize(),
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("Period counts from {start} to {end}"));
    }
    print_output(&rows, format)
}
