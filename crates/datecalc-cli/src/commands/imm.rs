//! IMM command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use datecalc_core::imm::{
    imm_dates, is_imm_date, next_imm_date_in, previous_imm_date_in, ImmPeriod,
};
use datecalc_core::types::Date;

use crate::cli::OutputFormat;
use crate::commands::config::{setting, ConfigKey};
use crate::commands::{parse_date, yes_no};
use crate::output::{print_header, print_output, print_result, KeyValue};

/// Arguments for the imm command.
#[derive(Args, Debug)]
pub struct ImmArgs {
    #[command(subcommand)]
    pub command: ImmCommand,
}

/// IMM subcommands.
#[derive(Subcommand, Debug)]
pub enum ImmCommand {
    /// IMM dates strictly after a date
    Next(NextArgs),

    /// IMM date strictly before a date
    Previous(PreviousArgs),

    /// IMM dates in a range
    List(ListArgs),

    /// Whether a date is an IMM date
    Check(CheckArgs),
}

/// IMM month selection.
#[derive(Args, Debug)]
pub struct PeriodArg {
    /// IMM months (quarterly, biAnnualJunDec, biAnnualMarSep, annually)
    #[arg(short, long)]
    pub period: Option<String>,
}

/// Arguments for next subcommand.
#[derive(Args, Debug)]
pub struct NextArgs {
    /// Start date (YYYY-MM-DD or 'today')
    #[arg(long, default_value = "today")]
    pub from: String,

    /// How many dates to produce
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    #[command(flatten)]
    pub period: PeriodArg,
}

/// Arguments for previous subcommand.
#[derive(Args, Debug)]
pub struct PreviousArgs {
    /// Start date (YYYY-MM-DD or 'today')
    #[arg(long, default_value = "today")]
    pub from: String,

    #[command(flatten)]
    pub period: PeriodArg,
}

/// Arguments for list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Range start, exclusive
    #[arg(long)]
    pub from: String,

    /// Range end, inclusive
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub period: PeriodArg,
}

/// Arguments for check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Date to check (YYYY-MM-DD or 'today')
    pub date: String,
}

/// One IMM date.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ImmRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Month")]
    pub month: String,
    #[tabled(rename = "IMM Date")]
    pub date: Date,
}

impl PeriodArg {
    fn resolve(&self) -> Result<ImmPeriod> {
        let configured = match &self.period {
            Some(period) => Some(period.clone()),
            None => setting(ConfigKey::ImmPeriod)?,
        };
        Ok(match configured {
            Some(period) => period.parse()?,
            None => ImmPeriod::default(),
        })
    }
}

/// Execute the imm command.
pub fn execute(args: ImmArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ImmCommand::Next(next) => execute_next(next, format),
        ImmCommand::Previous(previous) => execute_previous(previous, format),
        ImmCommand::List(list) => execute_list(list, format),
        ImmCommand::Check(check) => execute_check(check, format),
    }
}

fn rows(dates: impl IntoIterator<Item = Date>) -> Vec<ImmRow> {
    dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| ImmRow {
            index: i + 1,
            month: date.as_naive_date().format("%b %Y").to_string(),
            date,
        })
        .collect()
}

fn execute_next(args: NextArgs, format: OutputFormat) -> Result<()> {
    let from = parse_date(&args.from)?;
    let period = args.period.resolve()?;

    let dates = std::iter::successors(Some(next_imm_date_in(from, period)), |d| {
        Some(next_imm_date_in(*d, period))
    })
    .take(args.count);

    if format == OutputFormat::Table {
        print_header(&format!("Next {period} IMM dates after {from}"));
    }
    print_output(&rows(dates), format)
}

fn execute_previous(args: PreviousArgs, format: OutputFormat) -> Result<()> {
    let from = parse_date(&args.from)?;
    let period = args.period.resolve()?;
    let previous = previous_imm_date_in(from, period);

    let details = vec![
        KeyValue::new("From", from),
        KeyValue::new("Period", period),
        KeyValue::new("Previous IMM date", previous),
    ];
    print_result("Previous IMM Date", &previous.to_string(), &details, format)
}

fn execute_list(args: ListArgs, format: OutputFormat) -> Result<()> {
    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;
    let period = args.period.resolve()?;

    if format == OutputFormat::Table {
        print_header(&format!("{period} IMM dates in ({from}, {to}]"));
    }
    print_output(&rows(imm_dates(from, to, period)), format)
}

fn execute_check(args: CheckArgs, format: OutputFormat) -> Result<()> {
    let date = parse_date(&args.date)?;
    let answer = yes_no(is_imm_date(date));

    let details = vec![
        KeyValue::new("Date", date),
        KeyValue::new("Weekday", date.weekday()),
        KeyValue::new("IMM date", answer),
    ];
    print_result("IMM Check", answer, &details, format)
}
