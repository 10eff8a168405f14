//! Adjust command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, yes_no, CalendarArgs};
use crate::output::{print_result, KeyValue};

/// Arguments for the adjust command.
#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Date to adjust (YYYY-MM-DD or 'today')
    pub date: String,

    #[command(flatten)]
    pub calendar: CalendarArgs,
}

/// Execute the adjust command.
pub fn execute(args: AdjustArgs, format: OutputFormat) -> Result<()> {
    let date = parse_date(&args.date)?;
    let (calc, _) = args.calendar.calculator()?;

    let adjusted = calc.adjust(date)?;

    let details = vec![
        KeyValue::new("Date", date),
        KeyValue::new("Weekday", date.weekday()),
        KeyValue::new("Calendar", calc.name()),
        KeyValue::new("Convention", calc.convention()),
        KeyValue::new("Non-working day", yes_no(calc.is_non_working_day(date))),
        KeyValue::new("Adjusted", adjusted),
    ];

    print_result("Business Day Adjustment", &adjusted.to_string(), &details, format)
}
