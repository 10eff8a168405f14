//! Config command implementation.
//!
//! Manages persistent CLI settings: the holiday file to load and the
//! defaults applied when a command does not override them.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use datecalc_core::calendars::BusinessDayConvention;
use datecalc_core::config::MAX_SPOT_LAG;
use datecalc_core::daycounts::PeriodCountBasis;
use datecalc_core::imm::ImmPeriod;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Overrides the settings file location.
pub const CONFIG_PATH_ENV: &str = "DATECALC_CONFIG";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Holiday file loaded when `--holidays` is absent
    HolidaysFile,
    /// Business day convention used when `--convention` is absent
    DefaultConvention,
    /// Business days from trade date to spot
    SpotLag,
    /// Currency every pair also observes
    SettlementCurrency,
    /// IMM month set for the imm command
    ImmPeriod,
    /// Period count basis for the daycount command
    DefaultBasis,
}

impl ConfigKey {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "holidays_file" | "holidays" => Some(Self::HolidaysFile),
            "default_convention" | "convention" => Some(Self::DefaultConvention),
            "spot_lag" | "lag" => Some(Self::SpotLag),
            "settlement_currency" | "settlement" => Some(Self::SettlementCurrency),
            "imm_period" | "imm" => Some(Self::ImmPeriod),
            "default_basis" | "basis" => Some(Self::DefaultBasis),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::HolidaysFile => "holidays_file",
            Self::DefaultConvention => "default_convention",
            Self::SpotLag => "spot_lag",
            Self::SettlementCurrency => "settlement_currency",
            Self::ImmPeriod => "imm_period",
            Self::DefaultBasis => "default_basis",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::HolidaysFile => "Holiday configuration file (JSON)",
            Self::DefaultConvention => {
                "Business day convention (forward, backward, modifiedFollowing, modifiedPreceding, forwardUnlessMovingBack)"
            }
            Self::SpotLag => "Business days from trade date to spot (0-5)",
            Self::SettlementCurrency => "Settlement currency for pairs (USD, EUR, etc.)",
            Self::ImmPeriod => "IMM months (quarterly, biAnnualJunDec, biAnnualMarSep, annually)",
            Self::DefaultBasis => "Period count basis (30/360, 360E/ISDA, 360E/ISMA, ACT/360, ACT/365, ACT/ACT)",
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            Self::HolidaysFile => "(none)",
            Self::DefaultConvention => "forward",
            Self::SpotLag => "2",
            Self::SettlementCurrency => "USD",
            Self::ImmPeriod => "quarterly",
            Self::DefaultBasis => "(all)",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::HolidaysFile,
            Self::DefaultConvention,
            Self::SpotLag,
            Self::SettlementCurrency,
            Self::ImmPeriod,
            Self::DefaultBasis,
        ]
    }
}

/// Simple config storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Config {
    fn load() -> CliResult<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> CliResult<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Get the config file path.
fn config_path() -> CliResult<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
    Ok(home.join("datecalc").join("config.json"))
}

/// A value explicitly set with `datecalc config set`, if any.
pub fn setting(key: ConfigKey) -> CliResult<Option<String>> {
    Ok(Config::load()?.get(key.as_str()).cloned())
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format),
        ConfigCommand::Get(get_args) => execute_get(get_args, format),
        ConfigCommand::Set(set_args) => execute_set(set_args, quiet),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, quiet),
        ConfigCommand::Path => execute_path(format),
    }
}

fn unknown_key(key: &str) -> CliError {
    CliError::Config(format!("unknown configuration key: {key}"))
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            let value = config
                .get(key.as_str())
                .map(|s| s.as_str())
                .unwrap_or(key.default_value());
            KeyValue::new(key.as_str(), value)
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: HashMap<&str, &str> = results
                .iter()
                .map(|kv| (kv.key.as_str(), kv.value.as_str()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for kv in &results {
                println!("{}={}", kv.key, kv.value);
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    let key = ConfigKey::from_str(&args.key).ok_or_else(|| unknown_key(&args.key))?;

    let value = config
        .get(key.as_str())
        .map(|s| s.as_str())
        .unwrap_or(key.default_value());

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, quiet: bool) -> Result<()> {
    let key = ConfigKey::from_str(&args.key).ok_or_else(|| unknown_key(&args.key))?;

    let value = validate_config_value(key, &args.value)?;

    let mut config = Config::load()?;
    config.set(key.as_str().to_string(), value.clone());
    config.save()?;

    if !quiet {
        print_success(&format!("Set {} = {}", key.as_str(), value));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    if args.all {
        config.clear();
        config.save()?;
        if !quiet {
            print_success("Reset all configuration to defaults");
        }
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::from_str(&key_str).ok_or_else(|| unknown_key(&key_str))?;
        config.remove(key.as_str());
        config.save()?;
        if !quiet {
            print_success(&format!(
                "Reset {} to default ({})",
                key.as_str(),
                key.default_value()
            ));
        }
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(format: OutputFormat) -> Result<()> {
    let path = config_path()?;
    if format == OutputFormat::Minimal {
        println!("{}", path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Validates a value and returns the form to store.
fn validate_config_value(key: ConfigKey, value: &str) -> CliResult<String> {
    let value = value.trim();
    match key {
        ConfigKey::HolidaysFile => {
            let path = PathBuf::from(value);
            if !path.is_file() {
                print_warning(&format!("{} does not exist yet", path.display()));
            }
            Ok(value.to_string())
        }
        ConfigKey::DefaultConvention => {
            let convention: BusinessDayConvention = value.parse()?;
            Ok(convention.identifier().to_string())
        }
        ConfigKey::SpotLag => match value.parse::<u32>() {
            Ok(lag) if lag <= MAX_SPOT_LAG => Ok(lag.to_string()),
            _ => Err(CliError::Config(format!(
                "invalid spot lag: {value}. Use a whole number from 0 to {MAX_SPOT_LAG}."
            ))),
        },
        ConfigKey::SettlementCurrency => {
            let ccy = value.to_ascii_uppercase();
            if ccy.len() == 3 && ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(ccy)
            } else {
                Err(CliError::Config(format!(
                    "invalid currency: {value}. Use a three-letter code such as USD."
                )))
            }
        }
        ConfigKey::ImmPeriod => {
            value.parse::<ImmPeriod>()?;
            Ok(value.to_string())
        }
        ConfigKey::DefaultBasis => {
            let basis: PeriodCountBasis = value.parse()?;
            Ok(basis.name().to_string())
        }
    }
}
