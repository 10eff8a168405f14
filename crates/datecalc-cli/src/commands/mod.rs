//! CLI command implementations.

pub mod adjust;
pub mod calendars;
pub mod config;
pub mod daycount;
pub mod imm;
pub mod period;
pub mod spot;
pub mod step;
pub mod tenor;

pub use adjust::AdjustArgs;
pub use calendars::CalendarsArgs;
pub use config::ConfigArgs;
pub use daycount::DaycountArgs;
pub use imm::ImmArgs;
pub use period::PeriodArgs;
pub use spot::SpotArgs;
pub use step::StepArgs;
pub use tenor::TenorArgs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use datecalc_core::calculator::DateCalculator;
use datecalc_core::calendars::BusinessDayConvention;
use datecalc_core::config::RegistryConfig;
use datecalc_core::registry::HolidayRegistry;
use datecalc_core::types::Date;

use crate::commands::config::{setting, ConfigKey};
use crate::error::{CliError, CliResult};

/// Where holiday data comes from.
#[derive(Args, Debug, Clone)]
pub struct HolidaysArgs {
    /// Holiday configuration file (JSON). Defaults to the `holidays_file` setting.
    #[arg(long, env = "DATECALC_HOLIDAYS")]
    pub holidays: Option<PathBuf>,
}

/// Calendar selection shared by the date commands.
#[derive(Args, Debug, Clone)]
pub struct CalendarArgs {
    #[command(flatten)]
    pub source: HolidaysArgs,

    /// Calendar name; several names separated by commas are combined
    #[arg(short, long, default_value = "WEEKEND")]
    pub calendar: String,

    /// Business day convention (forward, backward, modifiedFollowing,
    /// modifiedPreceding, forwardUnlessMovingBack)
    #[arg(long)]
    pub convention: Option<String>,
}

/// Holiday registry together with the configuration it was built from.
pub struct Calendars {
    pub registry: HolidayRegistry,
    pub config: RegistryConfig,
}

impl HolidaysArgs {
    /// Loads the registry.
    ///
    /// Precedence: command-line flags, then `datecalc config` settings, then
    /// the holiday file, then built-in defaults.
    pub fn load(&self) -> Result<Calendars> {
        let path = match &self.holidays {
            Some(path) => Some(path.clone()),
            None => setting(ConfigKey::HolidaysFile)?.map(PathBuf::from),
        };

        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading holiday file");
                RegistryConfig::from_json_file(&path)?
            }
            None => RegistryConfig::default(),
        };

        if let Some(ccy) = setting(ConfigKey::SettlementCurrency)? {
            config.settlement_currency = ccy;
        }
        if let Some(convention) = setting(ConfigKey::DefaultConvention)? {
            config.default_convention = convention.parse()?;
        }
        if let Some(lag) = setting(ConfigKey::SpotLag)? {
            config.spot_lag = lag
                .parse()
                .map_err(|_| CliError::Config(format!("spot_lag '{lag}' is not a number")))?;
        }

        let registry = HolidayRegistry::from_config(&config)?;
        Ok(Calendars { registry, config })
    }
}

impl CalendarArgs {
    /// Builds the calculator for the selected calendar(s) and convention.
    pub fn calculator(&self) -> Result<(DateCalculator, Calendars)> {
        let calendars = self.source.load()?;
        let convention = match &self.convention {
            Some(id) => id.parse::<BusinessDayConvention>()?,
            None => calendars.config.default_convention,
        };

        let mut names = self
            .calendar
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let first = names
            .next()
            .ok_or_else(|| CliError::MissingArgument("calendar".into()))?;

        let mut calc = calendars.registry.calculator(first, convention);
        for name in names {
            calc = calc.combine(&calendars.registry.calculator(name, convention))?;
        }

        debug!(calendar = calc.name(), %convention, "calculator ready");
        Ok((calc, calendars))
    }
}

/// Parses a date in YYYY-MM-DD format, or `today`.
pub fn parse_date(s: &str) -> CliResult<Date> {
    if s.eq_ignore_ascii_case("today") {
        return Ok(Date::today());
    }
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Splits `CCY1/CCY2` into its two currency codes (uppercased).
pub fn parse_pair(s: &str) -> CliResult<(String, String)> {
    let (ccy1, ccy2) = s
        .split_once('/')
        .ok_or_else(|| CliError::InvalidPair(s.to_string()))?;
    let ccy1 = ccy1.trim().to_ascii_uppercase();
    let ccy2 = ccy2.trim().to_ascii_uppercase();
    if ccy1.is_empty() || ccy2.is_empty() {
        return Err(CliError::InvalidPair(s.to_string()));
    }
    Ok((ccy1, ccy2))
}

/// "yes" / "no" for table output.
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
