//! Playback options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default element length in milliseconds
pub const DEFAULT_UNIT_MS: u32 = 80;

/// Default tone pitch in Hz
pub const DEFAULT_FREQUENCY: u32 = 700;

/// Errors from building [`PlayOptions`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Unit length must be at least 1 ms")]
    ZeroUnit,

    #[error("Frequency must be at least 1 Hz")]
    ZeroFrequency,
}

/// How the player treats a symbol that is neither `.` nor `-`
///
/// Such symbols come from characters the codec could not map and passed
/// through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedSymbol {
    /// No tone and no time
    #[default]
    Skip,
    /// Silent rest as long as a dash
    Rest,
}

impl UnmappedSymbol {
    pub fn all() -> &'static [UnmappedSymbol] {
        &[UnmappedSymbol::Skip, UnmappedSymbol::Rest]
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnmappedSymbol::Skip => "skip",
            UnmappedSymbol::Rest => "rest",
        }
    }
}

impl fmt::Display for UnmappedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnmappedSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown policy '{}' (expected skip or rest)", s))
    }
}

/// Timing and pitch for one playback
///
/// Unit and frequency are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOptions {
    unit_ms: u32,
    frequency: u32,
    unmapped: UnmappedSymbol,
}

impl PlayOptions {
    pub fn new(unit_ms: u32, frequency: u32) -> Result<Self, OptionsError> {
        if unit_ms == 0 {
            return Err(OptionsError::ZeroUnit);
        }
        if frequency == 0 {
            return Err(OptionsError::ZeroFrequency);
        }
        Ok(Self {
            unit_ms,
            frequency,
            unmapped: UnmappedSymbol::default(),
        })
    }

    /// Set the unmapped-symbol policy
    pub fn unmapped(mut self, policy: UnmappedSymbol) -> Self {
        self.unmapped = policy;
        self
    }

    pub fn unit_ms(&self) -> u32 {
        self.unit_ms
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn unmapped_policy(&self) -> UnmappedSymbol {
        self.unmapped
    }

    /// `n` units as a duration
    pub fn units(&self, n: u32) -> Duration {
        Duration::from_millis(self.unit_ms as u64 * n as u64)
    }
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            unit_ms: DEFAULT_UNIT_MS,
            frequency: DEFAULT_FREQUENCY,
            unmapped: UnmappedSymbol::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero() {
        assert_eq!(PlayOptions::new(0, 700), Err(OptionsError::ZeroUnit));
        assert_eq!(PlayOptions::new(80, 0), Err(OptionsError::ZeroFrequency));
    }

    #[test]
    fn test_units() {
        let options = PlayOptions::new(60, 600).unwrap();
        assert_eq!(options.units(7), Duration::from_millis(420));
        assert_eq!(options.unmapped_policy(), UnmappedSymbol::Skip);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("skip".parse::<UnmappedSymbol>(), Ok(UnmappedSymbol::Skip));
        assert_eq!("REST".parse::<UnmappedSymbol>(), Ok(UnmappedSymbol::Rest));
        assert!("pause".parse::<UnmappedSymbol>().is_err());
    }
}
