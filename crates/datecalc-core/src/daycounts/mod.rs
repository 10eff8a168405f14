//! Period count bases: day, month and year differences between two dates.
//!
//! # Supported Bases
//!
//! - [`Thirty360`]: 30/360 (Bond Basis)
//! - [`Thirty360EIsda`]: 30E/360 ISDA
//! - [`Thirty360EIsma`]: 30E/360 ISMA (Eurobond Basis)
//! - [`Act360`]: Actual/360
//! - [`Act365`]: Actual/365 Fixed
//! - [`ActAct`]: Actual/Actual (ISDA)
//!
//! # Usage
//!
//! ```rust
//! use datecalc_core::daycounts::{day_diff, year_diff, PeriodCountBasis};
//! use datecalc_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! assert_eq!(day_diff(start, end, PeriodCountBasis::Conv30_360), 180);
//! assert_eq!(year_diff(start, end, PeriodCountBasis::Conv30_360), dec!(0.5));
//! ```

mod actual;
mod thirty360;

pub use actual::{Act360, Act365, ActAct};
pub use thirty360::{Thirty360, Thirty360EIsda, Thirty360EIsma};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DateCalcError;
use crate::types::Date;

/// A period count basis.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Market name of the basis (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates; negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates under this basis.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Runtime selector over the supported bases.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodCountBasis {
    /// 30/360 Bond Basis.
    Conv30_360,
    /// 30E/360 ISDA.
    Conv360E_Isda,
    /// 30E/360 ISMA.
    Conv360E_Isma,
    /// Actual/360.
    Act360,
    /// Actual/365 Fixed.
    Act365,
    /// Actual/Actual ISDA.
    ActAct,
}

impl PeriodCountBasis {
    /// Creates a boxed implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            PeriodCountBasis::Conv30_360 => Box::new(Thirty360),
            PeriodCountBasis::Conv360E_Isda => Box::new(Thirty360EIsda),
            PeriodCountBasis::Conv360E_Isma => Box::new(Thirty360EIsma),
            PeriodCountBasis::Act360 => Box::new(Act360),
            PeriodCountBasis::Act365 => Box::new(Act365),
            PeriodCountBasis::ActAct => Box::new(ActAct),
        }
    }

    /// Market name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PeriodCountBasis::Conv30_360 => "30/360",
            PeriodCountBasis::Conv360E_Isda => "360E/ISDA",
            PeriodCountBasis::Conv360E_Isma => "360E/ISMA",
            PeriodCountBasis::Act360 => "ACT/360",
            PeriodCountBasis::Act365 => "ACT/365",
            PeriodCountBasis::ActAct => "ACT/ACT",
        }
    }

    /// All supported bases.
    #[must_use]
    pub fn all() -> &'static [PeriodCountBasis] {
        &[
            PeriodCountBasis::Conv30_360,
            PeriodCountBasis::Conv360E_Isda,
            PeriodCountBasis::Conv360E_Isma,
            PeriodCountBasis::Act360,
            PeriodCountBasis::Act365,
            PeriodCountBasis::ActAct,
        ]
    }

    /// Day count between two dates.
    #[must_use]
    pub fn day_diff(&self, start: Date, end: Date) -> i64 {
        self.to_day_count().day_count(start, end)
    }

    /// Year fraction between two dates.
    #[must_use]
    pub fn year_diff(&self, start: Date, end: Date) -> Decimal {
        self.to_day_count().year_fraction(start, end)
    }

    /// Month fraction between two dates (year fraction times twelve).
    #[must_use]
    pub fn month_diff(&self, start: Date, end: Date) -> Decimal {
        self.year_diff(start, end) * Decimal::from(12)
    }
}

impl fmt::Display for PeriodCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PeriodCountBasis {
    type Err = DateCalcError;

    /// Parses a basis from its market name or a common alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "30/360" | "30/360 US" | "BOND" | "CONV_30_360" => Ok(PeriodCountBasis::Conv30_360),
            "360E/ISDA" | "30E/360 ISDA" | "CONV_360E_ISDA" => Ok(PeriodCountBasis::Conv360E_Isda),
            "360E/ISMA" | "30E/360" | "30E/360 ISMA" | "EUROBOND" | "CONV_360E_ISMA" => {
                Ok(PeriodCountBasis::Conv360E_Isma)
            }
            "ACT/360" | "ACTUAL/360" => Ok(PeriodCountBasis::Act360),
            "ACT/365" | "ACT/365F" | "ACTUAL/365" => Ok(PeriodCountBasis::Act365),
            "ACT/ACT" | "ACTUAL/ACTUAL" | "ACT/ACT ISDA" => Ok(PeriodCountBasis::ActAct),
            _ => Err(DateCalcError::UnsupportedBasis {
                name: s.to_string(),
            }),
        }
    }
}

/// Day count between `start` and `end` under `basis`.
#[must_use]
pub fn day_diff(start: Date, end: Date, basis: PeriodCountBasis) -> i64 {
    basis.day_diff(start, end)
}

/// Year fraction between `start` and `end` under `basis`.
#[must_use]
pub fn year_diff(start: Date, end: Date, basis: PeriodCountBasis) -> Decimal {
    basis.year_diff(start, end)
}

/// Month fraction between `start` and `end` under `basis`.
#[must_use]
pub fn month_diff(start: Date, end: Date, basis: PeriodCountBasis) -> Decimal {
    basis.month_diff(start, end)
}
