//! Step command implementation.
//!
//! Moves a date by business days, or by calendar days followed by an
//! adjustment when `--calendar-days` is given.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, CalendarArgs};
use crate::output::{print_result, KeyValue};

/// Arguments for the step command.
#[derive(Args, Debug)]
pub struct StepArgs {
    /// Start date (YYYY-MM-DD or 'today')
    pub date: String,

    /// Number of days to move; negative moves backward
    #[arg(allow_negative_numbers = true)]
    pub days: i64,

    /// Count calendar days, then adjust the landing date
    #[arg(long)]
    pub calendar_days: bool,

    #[command(flatten)]
    pub calendar: CalendarArgs,
}

/// Execute the step command.
pub fn execute(args: StepArgs, format: OutputFormat) -> Result<()> {
    let date = parse_date(&args.date)?;
    let (calc, _) = args.calendar.calculator()?;

    let (result, mode) = if args.calendar_days {
        (calc.move_by_days(date, args.days)?, "calendar days")
    } else {
        (calc.move_by_business_days(date, args.days)?, "business days")
    };

    let details = vec![
        KeyValue::new("Start", date),
        KeyValue::new("Days", format!("{} {mode}", args.days)),
        KeyValue::new("Calendar", calc.name()),
        KeyValue::new("Convention", calc.convention()),
        KeyValue::new("Result", result),
        KeyValue::new("Weekday", result.weekday()),
    ];

    print_result("Date Step", &result.to_string(), &details, format)
}
