//! Calendars command implementation.
//!
//! Lists, shows and validates the holiday calendars in a holiday file.

use anyhow::Result;
use std::path::PathBuf;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use datecalc_core::config::{RegistryConfig, Validate};
use datecalc_core::types::Date;

use crate::cli::OutputFormat;
use crate::commands::config::{setting, ConfigKey};
use crate::commands::{parse_date, yes_no, CalendarArgs, HolidaysArgs};
use crate::error::CliError;
use crate::output::{print_header, print_output, print_result, print_success, KeyValue};

/// Arguments for the calendars command.
#[derive(Args, Debug)]
pub struct CalendarsArgs {
    #[command(subcommand)]
    pub command: CalendarsCommand,
}

/// Calendars subcommands.
#[derive(Subcommand, Debug)]
pub enum CalendarsCommand {
    /// List the calendars in the holiday file
    List(HolidaysArgs),

    /// Show the holidays of one calendar
    Show(ShowArgs),

    /// Whether a date is a working day
    Check(CheckArgs),

    /// Validate a holiday file without loading it
    Validate(HolidaysArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Calendar name
    pub name: String,

    /// Only holidays in this year
    #[arg(long)]
    pub year: Option<i32>,

    #[command(flatten)]
    pub source: HolidaysArgs,
}

/// Arguments for check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Date to check (YYYY-MM-DD or 'today')
    pub date: String,

    #[command(flatten)]
    pub calendar: CalendarArgs,
}

/// Summary of one calendar.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CalendarRow {
    #[tabled(rename = "Calendar")]
    pub name: String,
    #[tabled(rename = "Holidays")]
    pub holidays: usize,
    #[tabled(rename = "Early Boundary")]
    pub early_boundary: String,
    #[tabled(rename = "Late Boundary")]
    pub late_boundary: String,
}

/// One holiday.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct HolidayRow {
    #[tabled(rename = "Weekday")]
    pub weekday: String,
    #[tabled(rename = "Date")]
    pub date: Date,
}

/// One validation problem.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ProblemRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Rule")]
    pub rule: String,
    #[tabled(rename = "Problem")]
    pub message: String,
}

/// Execute the calendars command.
pub fn execute(args: CalendarsArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        CalendarsCommand::List(source) => execute_list(source, format),
        CalendarsCommand::Show(show) => execute_show(show, format),
        CalendarsCommand::Check(check) => execute_check(check, format),
        CalendarsCommand::Validate(source) => execute_validate(source, format),
    }
}

fn boundary(date: Option<Date>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

fn execute_list(source: HolidaysArgs, format: OutputFormat) -> Result<()> {
    let calendars = source.load()?;
    let registry = &calendars.registry;

    let rows: Vec<CalendarRow> = registry
        .names()
        .into_iter()
        .map(|name| {
            let set = registry.holiday_set(name);
            CalendarRow {
                name: name.to_string(),
                holidays: set.len(),
                early_boundary: boundary(set.early_boundary()),
                late_boundary: boundary(set.late_boundary()),
            }
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!(
            "Calendars (settlement currency {})",
            registry.settlement_currency()
        ));
    }
    print_output(&rows, format)
}

fn execute_show(args: ShowArgs, format: OutputFormat) -> Result<()> {
    let calendars = args.source.load()?;
    if !calendars.registry.contains(&args.name) {
        return Err(CliError::Config(format!("no calendar named '{}'", args.name)).into());
    }

    let set = calendars.registry.holiday_set(&args.name);
    let rows: Vec<HolidayRow> = set
        .iter()
        .filter(|date| args.year.map_or(true, |year| date.year() == year))
        .map(|date| HolidayRow {
            weekday: date.weekday().to_string(),
            date,
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("{} holidays", set.name()));
    }
    print_output(&rows, format)
}

fn execute_check(args: CheckArgs, format: OutputFormat) -> Result<()> {
    let date = parse_date(&args.date)?;
    let (calc, _) = args.calendar.calculator()?;
    calc.calendar().check_boundary(date)?;

    let working = calc.is_working_day(date);
    let answer = yes_no(working);

    let details = vec![
        KeyValue::new("Date", date),
        KeyValue::new("Weekday", date.weekday()),
        KeyValue::new("Calendar", calc.name()),
        KeyValue::new("Holiday", yes_no(calc.calendar().is_holiday(date))),
        KeyValue::new("Working day", answer),
    ];
    print_result("Working Day Check", answer, &details, format)
}

fn execute_validate(source: HolidaysArgs, format: OutputFormat) -> Result<()> {
    let path = match source.holidays {
        Some(path) => path,
        None => setting(ConfigKey::HolidaysFile)?
            .map(PathBuf::from)
            .ok_or_else(|| CliError::MissingArgument("--holidays".into()))?,
    };

    let config = RegistryConfig::from_json_file(&path)?;
    let problems = config.validate();
    if problems.is_empty() {
        print_success(&format!(
            "{} is valid ({} calendars)",
            path.display(),
            config.holiday_sets.len()
        ));
        return Ok(());
    }

    let rows: Vec<ProblemRow> = problems
        .iter()
        .map(|p| ProblemRow {
            field: p.field.clone(),
            rule: p.rule.clone().unwrap_or_default(),
            message: p.message.clone(),
        })
        .collect();
    if format == OutputFormat::Table {
        print_header(&format!("Problems in {}", path.display()));
    }
    print_output(&rows, format)?;

    Err(CliError::Config(format!("{} problem(s) in {}", problems.len(), path.display())).into())
}
