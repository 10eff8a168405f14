//! Period units and market tenors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DateCalcError, DateCalcResult};

/// Calendar unit of a period added to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodUnit {
    /// Calendar days.
    Day,
    /// Weeks of seven calendar days.
    Week,
    /// Calendar months (end-of-month clamped).
    Month,
    /// Calendar years (Feb 29 clamped).
    Year,
}

impl PeriodUnit {
    /// Single-letter market code.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            PeriodUnit::Day => 'D',
            PeriodUnit::Week => 'W',
            PeriodUnit::Month => 'M',
            PeriodUnit::Year => 'Y',
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeriodUnit::Day => "Day",
            PeriodUnit::Week => "Week",
            PeriodUnit::Month => "Month",
            PeriodUnit::Year => "Year",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PeriodUnit {
    type Err = DateCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "days" => Ok(PeriodUnit::Day),
            "w" | "week" | "weeks" => Ok(PeriodUnit::Week),
            "m" | "month" | "months" => Ok(PeriodUnit::Month),
            "y" | "year" | "years" => Ok(PeriodUnit::Year),
            _ => Err(DateCalcError::invalid_tenor(s, "unknown period unit")),
        }
    }
}

/// Tenor kinds quoted in money and FX markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorCode {
    /// Overnight: trade date to the next business day.
    Overnight,
    /// Tomorrow-next: one business day further than overnight.
    TomorrowNext,
    /// Spot-next: the business day after spot.
    SpotNext,
    /// Spot date itself.
    Spot,
    /// A number of days after spot.
    Day,
    /// A number of weeks after spot.
    Week,
    /// A number of months after spot.
    Month,
    /// A number of years after spot.
    Year,
}

impl TenorCode {
    /// Market code for the tenor kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TenorCode::Overnight => "ON",
            TenorCode::TomorrowNext => "TN",
            TenorCode::SpotNext => "SN",
            TenorCode::Spot => "SP",
            TenorCode::Day => "D",
            TenorCode::Week => "W",
            TenorCode::Month => "M",
            TenorCode::Year => "Y",
        }
    }

    /// True for kinds that carry a unit count (D, W, M, Y).
    #[must_use]
    pub fn has_units(&self) -> bool {
        matches!(
            self,
            TenorCode::Day | TenorCode::Week | TenorCode::Month | TenorCode::Year
        )
    }

    /// True for kinds measured from spot rather than from the trade date.
    #[must_use]
    pub fn is_spot_based(&self) -> bool {
        !matches!(self, TenorCode::Overnight | TenorCode::TomorrowNext)
    }
}

/// A market tenor such as `ON`, `SP`, `2W`, `3M` or `1Y`.
///
/// # Example
///
/// ```rust
/// use datecalc_core::types::{Tenor, TenorCode};
///
/// let tenor: Tenor = "3M".parse().unwrap();
/// assert_eq!(tenor.units(), 3);
/// assert_eq!(tenor.code(), TenorCode::Month);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenor {
    units: u32,
    code: TenorCode,
}

impl Tenor {
    /// Creates a tenor. Unit counts are ignored (set to 0) for ON/TN/SN/SP.
    #[must_use]
    pub fn new(units: u32, code: TenorCode) -> Self {
        let units = if code.has_units() { units } else { 0 };
        Self { units, code }
    }

    /// Overnight.
    #[must_use]
    pub fn overnight() -> Self {
        Self::new(0, TenorCode::Overnight)
    }

    /// Spot.
    #[must_use]
    pub fn spot() -> Self {
        Self::new(0, TenorCode::Spot)
    }

    /// Number of units (0 for ON/TN/SN/SP).
    #[must_use]
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Tenor kind.
    #[must_use]
    pub fn code(&self) -> TenorCode {
        self.code
    }

    /// The calendar period this tenor adds after spot, if any.
    #[must_use]
    pub fn period(&self) -> Option<(u32, PeriodUnit)> {
        match self.code {
            TenorCode::Day => Some((self.units, PeriodUnit::Day)),
            TenorCode::Week => Some((self.units, PeriodUnit::Week)),
            TenorCode::Month => Some((self.units, PeriodUnit::Month)),
            TenorCode::Year => Some((self.units, PeriodUnit::Year)),
            _ => None,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.has_units() {
            write!(f, "{}{}", self.units, self.code.code())
        } else {
            write!(f, "{}", self.code.code())
        }
    }
}

impl FromStr for Tenor {
    type Err = DateCalcError;

    fn from_str(s: &str) -> DateCalcResult<Self> {
        let text = s.trim().to_ascii_uppercase();
        match text.as_str() {
            "ON" => return Ok(Self::new(0, TenorCode::Overnight)),
            "TN" => return Ok(Self::new(0, TenorCode::TomorrowNext)),
            "SN" => return Ok(Self::new(0, TenorCode::SpotNext)),
            "SP" | "SPOT" => return Ok(Self::new(0, TenorCode::Spot)),
            "" => return Err(DateCalcError::invalid_tenor(s, "empty tenor")),
            _ => {}
        }

        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| DateCalcError::invalid_tenor(s, "missing unit"))?;
        let (digits, unit) = text.split_at(split);
        if digits.is_empty() {
            return Err(DateCalcError::invalid_tenor(s, "missing unit count"));
        }
        let units: u32 = digits
            .parse()
            .map_err(|_| DateCalcError::invalid_tenor(s, "unit count out of range"))?;

        let code = match unit {
            "D" => TenorCode::Day,
            "W" => TenorCode::Week,
            "M" => TenorCode::Month,
            "Y" => TenorCode::Year,
            _ => return Err(DateCalcError::invalid_tenor(s, "unknown unit")),
        };
        Ok(Self::new(units, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_tenors() {
        let t: Tenor = "3M".parse().unwrap();
        assert_eq!(t.units(), 3);
        assert_eq!(t.code(), TenorCode::Month);
        assert_eq!(t.period(), Some((3, PeriodUnit::Month)));

        let t: Tenor = "10y".parse().unwrap();
        assert_eq!(t.period(), Some((10, PeriodUnit::Year)));
        assert_eq!(t.to_string(), "10Y");
    }

    #[test]
    fn test_parse_special_tenors() {
        assert_eq!("ON".parse::<Tenor>().unwrap().code(), TenorCode::Overnight);
        assert_eq!("tn".parse::<Tenor>().unwrap().code(), TenorCode::TomorrowNext);
        assert_eq!("SN".parse::<Tenor>().unwrap().code(), TenorCode::SpotNext);
        assert_eq!("SP".parse::<Tenor>().unwrap(), Tenor::spot());
        assert_eq!(Tenor::overnight().period(), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Tenor>().is_err());
        assert!("M".parse::<Tenor>().is_err());
        assert!("3".parse::<Tenor>().is_err());
        assert!("3Q".parse::<Tenor>().is_err());
        assert!("3MM".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_special_tenors_drop_units() {
        let t = Tenor::new(5, TenorCode::Spot);
        assert_eq!(t.units(), 0);
        assert_eq!(t.to_string(), "SP");
    }

    #[test]
    fn test_period_unit_parse() {
        assert_eq!("months".parse::<PeriodUnit>().unwrap(), PeriodUnit::Month);
        assert_eq!("W".parse::<PeriodUnit>().unwrap(), PeriodUnit::Week);
        assert!("fortnight".parse::<PeriodUnit>().is_err());
    }

    #[test]
    fn test_spot_based() {
        assert!(!TenorCode::Overnight.is_spot_based());
        assert!(!TenorCode::TomorrowNext.is_spot_based());
        assert!(TenorCode::SpotNext.is_spot_based());
        assert!(TenorCode::Month.is_spot_based());
    }
}
