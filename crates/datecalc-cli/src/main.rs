//! Datecalc CLI - business day, tenor and IMM date calculations.
//!
//! # Usage
//!
//! ```bash
//! # Adjust a date against the GBP calendar
//! datecalc adjust 2024-12-25 --holidays holidays.json --calendar GBP --convention modifiedFollowing
//!
//! # Move five business days
//! datecalc step 2024-12-20 5 --holidays holidays.json --calendar GBP,USD
//!
//! # Tenor dates for a currency pair
//! datecalc tenor 2025-05-22 --pair EUR/USD --tenors ON,TN,SP,1M,3M
//!
//! # Next IMM dates
//! datecalc imm list --from 2025-01-01 --to 2025-12-31
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let format = cli.format;

    match cli.command {
        Commands::Adjust(args) => commands::adjust::execute(args, format)?,
        Commands::Step(args) => commands::step::execute(args, format)?,
        Commands::Period(args) => commands::period::execute(args, format)?,
        Commands::Tenor(args) => commands::tenor::execute(args, format)?,
        Commands::Spot(args) => commands::spot::execute(args, format)?,
        Commands::Imm(args) => commands::imm::execute(args, format)?,
        Commands::Daycount(args) => commands::daycount::execute(args, format)?,
        Commands::Calendars(args) => commands::calendars::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format, cli.quiet)?,
    }

    Ok(())
}

/// Logs go to stderr so that command output stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("datecalc_core=debug,datecalc_cli=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
