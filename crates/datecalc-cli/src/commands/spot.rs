//! Spot command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_pair, HolidaysArgs};
use crate::output::{print_result, KeyValue};

/// Arguments for the spot command.
#[derive(Args, Debug)]
pub struct SpotArgs {
    /// Trade date (YYYY-MM-DD or 'today')
    pub date: String,

    /// Currency pair (e.g. EUR/USD)
    #[arg(short, long)]
    pub pair: String,

    /// Business days from trade date to spot
    #[arg(long)]
    pub spot_lag: Option<u32>,

    #[command(flatten)]
    pub source: HolidaysArgs,
}

/// Execute the spot command.
pub fn execute(args: SpotArgs, format: OutputFormat) -> Result<()> {
    let trade_date = parse_date(&args.date)?;
    let (ccy1, ccy2) = parse_pair(&args.pair)?;
    let calendars = args.source.load()?;
    let spot_lag = args.spot_lag.unwrap_or(calendars.config.spot_lag);

    let calc = calendars.registry.currency_calculator(&ccy1, &ccy2);
    let spot = calc.spot_date(trade_date, spot_lag)?;

    let details = vec![
        KeyValue::new("Pair", calc.name()),
        KeyValue::new("Settlement currency", calc.settlement_currency()),
        KeyValue::new("Trade date", trade_date),
        KeyValue::new("Spot lag", spot_lag),
        KeyValue::new("Spot date", spot),
    ];

    print_result("Spot Date", &spot.to_string(), &details, format)
}
