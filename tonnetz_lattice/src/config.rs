// Data-driven lattice configuration.
//
// All tunable parameters live in `LatticeConfig`, loadable from JSON at
// startup. The engine never uses magic numbers — grid generation,
// tessellation, and chord derivation all read from the config, so a host
// can resize the lattice or move the base octave without recompiling.
//
// `validate()` catches configurations that would violate construction
// invariants downstream (zero-sized grids, non-positive triangle size,
// chords escaping the MIDI range, thirds that don't stack to the fifth).
// Validation failures are ordinary errors; they happen before any lattice
// state exists.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::PitchClass;

/// All lattice tunables. `Default` gives the standard playable lattice:
/// 12 cells of fifths across, 8 cells of thirds down, triads voiced in
/// the middle-C octave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Tessellation cells across (columns of fifths).
    pub grid_width: u32,
    /// Tessellation cells down (rows of thirds).
    pub grid_height: u32,
    /// Side length of each triangle in world units.
    pub triangle_size: f64,
    /// Semitones stepped per column. 7 = perfect fifth.
    pub fifth_interval: i64,
    /// Semitones stepped per row. 4 = major third.
    pub major_third_interval: i64,
    /// Semitones from a minor triad's root to its third. 3 = minor third.
    /// Must stack with the major third to the fifth (mod 12).
    pub minor_third_interval: i64,
    /// MIDI note of pitch class 0. 60 puts every triad in 60..=71.
    pub base_octave: u8,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            grid_width: 12,
            grid_height: 8,
            triangle_size: 3.0,
            fifth_interval: 7,
            major_third_interval: 4,
            minor_third_interval: 3,
            base_octave: 60,
        }
    }
}

impl LatticeConfig {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config can produce a well-formed lattice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be at least 1x1"));
        }
        if !self.triangle_size.is_finite() || self.triangle_size <= 0.0 {
            return Err(ConfigError::Invalid("triangle size must be positive"));
        }
        if self.base_octave > 115 {
            // Highest pitch class is 11; 115 + 11 = 126 still fits in MIDI's 0..=127.
            return Err(ConfigError::Invalid("base octave pushes chords past MIDI range"));
        }
        let stacked = PitchClass::normalize(self.major_third_interval + self.minor_third_interval);
        if stacked != PitchClass::normalize(self.fifth_interval) {
            return Err(ConfigError::Invalid(
                "major and minor thirds must stack to the fifth (mod 12)",
            ));
        }
        Ok(())
    }
}

/// Errors from loading or validating a `LatticeConfig`.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LatticeConfig::default().validate().is_ok());
    }

    #[test]
    fn json_roundtrip() {
        let config = LatticeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored = LatticeConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = LatticeConfig::from_json(r#"{ "grid_width": 4 }"#).unwrap();
        assert_eq!(config.grid_width, 4);
        assert_eq!(config.grid_height, 8);
        assert_eq!(config.base_octave, 60);
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let config = LatticeConfig { grid_width: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_triangle_size_is_rejected() {
        let config = LatticeConfig { triangle_size: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = LatticeConfig { triangle_size: f64::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn runaway_base_octave_is_rejected() {
        let config = LatticeConfig { base_octave: 120, ..Default::default() };
        assert!(config.validate().is_err());
        let config = LatticeConfig { base_octave: 115, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mismatched_thirds_are_rejected() {
        // 4 + 4 = 8 ≠ 7: the two triangle shapes would disagree about the
        // shared fifth vertex.
        let config = LatticeConfig { minor_third_interval: 4, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
