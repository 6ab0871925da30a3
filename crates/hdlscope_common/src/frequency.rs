//! Clock frequency values with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clock frequency stored in megahertz.
///
/// Estimation works in MHz throughout, so a bare number such as `"250"`
/// parses as 250 MHz. Suffixed forms (`"1.2GHz"`, `"100MHz"`, `"500kHz"`,
/// `"48000Hz"`) are converted. Only finite, strictly positive values parse.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Frequency(f64);

impl Frequency {
    /// Creates a frequency from a value in megahertz.
    pub fn from_mhz(mhz: f64) -> Self {
        Self(mhz)
    }

    /// Creates a frequency from a value in hertz.
    pub fn from_hz(hz: f64) -> Self {
        Self(hz / 1_000_000.0)
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> f64 {
        self.0
    }

    /// Returns the frequency in hertz.
    pub fn hz(&self) -> f64 {
        self.0 * 1_000_000.0
    }

    /// Returns the clock period in nanoseconds.
    pub fn period_ns(&self) -> f64 {
        1_000.0 / self.0
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mhz = self.0;
        if mhz >= 1_000.0 {
            write!(f, "{}GHz", mhz / 1_000.0)
        } else if mhz >= 1.0 {
            write!(f, "{mhz}MHz")
        } else {
            write!(f, "{}kHz", mhz * 1_000.0)
        }
    }
}

/// Error type for parsing frequency strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };
        let number = |text: &str| -> Result<f64, ParseFrequencyError> {
            let val: f64 = text.trim().parse().map_err(|_| err())?;
            if val.is_finite() && val > 0.0 {
                Ok(val)
            } else {
                Err(err())
            }
        };

        let lower = s.to_ascii_lowercase();
        if let Some(num) = lower.strip_suffix("ghz") {
            return Ok(Frequency(number(num)? * 1_000.0));
        }
        if let Some(num) = lower.strip_suffix("mhz") {
            return Ok(Frequency(number(num)?));
        }
        if let Some(num) = lower.strip_suffix("khz") {
            return Ok(Frequency(number(num)? / 1_000.0));
        }
        if let Some(num) = lower.strip_suffix("hz") {
            return Ok(Frequency::from_hz(number(num)?));
        }

        Ok(Frequency(number(&lower)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ghz() {
        let f: Frequency = "1.2GHz".parse().unwrap();
        assert_eq!(f.mhz(), 1_200.0);
    }

    #[test]
    fn parse_mhz() {
        let f: Frequency = "100MHz".parse().unwrap();
        assert_eq!(f.mhz(), 100.0);
    }

    #[test]
    fn parse_khz_and_hz() {
        let f: Frequency = "500kHz".parse().unwrap();
        assert_eq!(f.mhz(), 0.5);
        let f: Frequency = "25000000Hz".parse().unwrap();
        assert_eq!(f.mhz(), 25.0);
    }

    #[test]
    fn bare_number_is_mhz() {
        let f: Frequency = "250".parse().unwrap();
        assert_eq!(f.mhz(), 250.0);
    }

    #[test]
    fn parse_case_insensitive_with_spaces() {
        let f: Frequency = " 50 mhz ".parse().unwrap();
        assert_eq!(f.mhz(), 50.0);
    }

    #[test]
    fn rejects_non_positive_and_garbage() {
        assert!("0MHz".parse::<Frequency>().is_err());
        assert!("-5".parse::<Frequency>().is_err());
        assert!("fast".parse::<Frequency>().is_err());
    }

    #[test]
    fn period_of_100mhz_is_10ns() {
        assert_eq!(Frequency::from_mhz(100.0).period_ns(), 10.0);
    }

    #[test]
    fn display_selects_best_unit() {
        assert_eq!(format!("{}", Frequency::from_mhz(1_500.0)), "1.5GHz");
        assert_eq!(format!("{}", Frequency::from_mhz(100.0)), "100MHz");
        assert_eq!(format!("{}", Frequency::from_mhz(0.5)), "500kHz");
    }
}
