//! Tenor command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use datecalc_core::types::{Date, Tenor};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_pair, CalendarArgs};
use crate::output::{print_header, print_output, print_warning};

/// Arguments for the tenor command.
#[derive(Args, Debug)]
pub struct TenorArgs {
    /// Trade date (YYYY-MM-DD or 'today')
    pub date: String,

    /// Tenors, comma-separated (ON, TN, SP, SN, 1D, 1W, 1M, 1Y, ...)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "ON,TN,SP,SN,1W,1M,3M,6M,1Y"
    )]
    pub tenors: Vec<String>,

    /// Currency pair (e.g. EUR/USD); uses both currencies plus the
    /// settlement currency instead of --calendar
    #[arg(short, long)]
    pub pair: Option<String>,

    /// Business days from trade date to spot
    #[arg(long)]
    pub spot_lag: Option<u32>,

    #[command(flatten)]
    pub calendar: CalendarArgs,
}

/// One tenor's value date.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TenorRow {
    #[tabled(rename = "Tenor")]
    pub tenor: String,
    #[tabled(rename = "Days")]
    pub days: i64,
    #[tabled(rename = "Value Date")]
    pub date: Date,
}

/// Execute the tenor command.
pub fn execute(args: TenorArgs, format: OutputFormat) -> Result<()> {
    let trade_date = parse_date(&args.date)?;
    let tenors = args
        .tenors
        .iter()
        .map(|t| t.parse::<Tenor>())
        .collect::<Result<Vec<_>, _>>()?;

    let (name, dates, spot_lag) = match &args.pair {
        Some(pair) => {
            if args.calendar.convention.is_some() {
                print_warning("Currency pairs always use the forward convention; --convention ignored");
            }
            let (ccy1, ccy2) = parse_pair(pair)?;
            let calendars = args.calendar.source.load()?;
            let spot_lag = args.spot_lag.unwrap_or(calendars.config.spot_lag);
            let calc = calendars.registry.currency_calculator(&ccy1, &ccy2);
            let dates = calc.calculate_tenor_dates(trade_date, &tenors, spot_lag)?;
            (calc.name().to_string(), dates, spot_lag)
        }
        None => {
            let (calc, calendars) = args.calendar.calculator()?;
            let spot_lag = args.spot_lag.unwrap_or(calendars.config.spot_lag);
            let dates = calc.calculate_tenor_dates(trade_date, &tenors, spot_lag)?;
            (calc.name().to_string(), dates, spot_lag)
        }
    };

    let rows: Vec<TenorRow> = tenors
        .iter()
        .zip(dates)
        .map(|(tenor, date)| TenorRow {
            tenor: tenor.to_string(),
            days: trade_date.days_between(&date),
            date,
        })
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("{name} tenors from {trade_date} (spot lag {spot_lag})"));
    }
    print_output(&rows, format)
}
