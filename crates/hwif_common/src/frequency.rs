//! Clock frequencies with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clock frequency stored in whole Hertz.
///
/// A frequency of 0 Hz means "unspecified". Parses strings like "50MHz",
/// "100KHz", "1GHz", "48000Hz", and bare integers (interpreted as Hz).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency(u64);

impl Frequency {
    /// The unspecified frequency (0 Hz).
    pub const UNSPECIFIED: Frequency = Frequency(0);

    /// Creates a new frequency from a value in Hertz.
    pub fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> u64 {
        self.0
    }

    /// Returns `true` if no rate was given.
    pub fn is_unspecified(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        if hz >= 1_000_000_000 && hz % 1_000_000 == 0 {
            write!(f, "{}GHz", hz as f64 / 1e9)
        } else if hz >= 1_000_000 && hz % 1_000 == 0 {
            write!(f, "{}MHz", hz as f64 / 1e6)
        } else if hz >= 1_000 {
            write!(f, "{}KHz", hz as f64 / 1e3)
        } else {
            write!(f, "{hz}Hz")
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

        let lower = s.to_ascii_lowercase();
        let (num, scale) = if let Some(num) = lower.strip_suffix("ghz") {
            (num, 1e9)
        } else if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1e6)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, 1e3)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let val: f64 = num.trim().parse().map_err(|_| err())?;
        if !val.is_finite() || val < 0.0 {
            return Err(err());
        }
        Ok(Frequency((val * scale).round() as u64))
    }
}
