//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    AdjustArgs, CalendarsArgs, ConfigArgs, DaycountArgs, ImmArgs, PeriodArgs, SpotArgs, StepArgs,
    TenorArgs,
};

/// Datecalc - business day adjustment, tenors and IMM dates
#[derive(Parser)]
#[command(name = "datecalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Adjust a date to a business day
    Adjust(AdjustArgs),

    /// Move a number of business days
    Step(StepArgs),

    /// Add a calendar period, then adjust
    Period(PeriodArgs),

    /// Value dates for market tenors (ON, TN, SP, SN, 1W, 3M, ...)
    Tenor(TenorArgs),

    /// Spot date for a currency pair
    Spot(SpotArgs),

    /// IMM dates (third Wednesday of Mar/Jun/Sep/Dec)
    Imm(ImmArgs),

    /// Day, month and year differences under a period count basis
    Daycount(DaycountArgs),

    /// Inspect holiday calendars
    Calendars(CalendarsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
