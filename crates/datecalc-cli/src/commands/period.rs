//! Period command implementation.

use anyhow::Result;
use clap::Args;

use datecalc_core::types::PeriodUnit;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, CalendarArgs};
use crate::output::{print_result, KeyValue};

/// Arguments for the period command.
#[derive(Args, Debug)]
pub struct PeriodArgs {
    /// Start date (YYYY-MM-DD or 'today')
    pub date: String,

    /// Number of units; negative moves backward
    #[arg(allow_negative_numbers = true)]
    pub amount: i32,

    /// Unit (d, w, m, y or day, week, month, year)
    pub unit: String,

    #[command(flatten)]
    pub calendar: CalendarArgs,
}

/// Execute the period command.
pub fn execute(args: PeriodArgs, format: OutputFormat) -> Result<()> {
    let date = parse_date(&args.date)?;
    let unit: PeriodUnit = args.unit.parse()?;
    let (calc, _) = args.calendar.calculator()?;

    let result = calc.move_by_period(date, args.amount, unit)?;

    let details = vec![
        KeyValue::new("Start", date),
        KeyValue::new("Period", format!("{}{}", args.amount, unit.code())),
        KeyValue::new("Calendar", calc.name()),
        KeyValue::new("Convention", calc.convention()),
        KeyValue::new("Result", result),
    ];

    print_result("Period Addition", &result.to_string(), &details, format)
}
