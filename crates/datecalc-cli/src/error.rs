//! CLI error types.

use datecalc_core::error::DateCalcError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD or 'today'.")]
    InvalidDate(String),

    /// Currency pair not written as CCY1/CCY2.
    #[error("Invalid currency pair: {0}. Use CCY1/CCY2, e.g. EUR/USD.")]
    InvalidPair(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Calculation error from the date library.
    #[error(transparent)]
    Calculation(#[from] DateCalcError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
