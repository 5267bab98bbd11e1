use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::{PlayOptions, UnmappedSymbol, DEFAULT_FREQUENCY, DEFAULT_UNIT_MS};

/// Errors from explicit settings I/O
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Returns the path to the settings file: `~/.config/morse-rs/settings.json`
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("morse-rs");
    path.push("settings.json");
    path
}

/// Persisted player settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Element length in milliseconds
    pub unit_ms: u32,
    /// Tone pitch in Hz
    pub frequency: u32,
    /// What to do with symbols that are neither dot nor dash
    pub unmapped_symbol: UnmappedSymbol,
    /// Master output volume (0.0 to 1.0)
    pub volume: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            unit_ms: DEFAULT_UNIT_MS,
            frequency: DEFAULT_FREQUENCY,
            unmapped_symbol: UnmappedSymbol::Skip,
            volume: 1.0,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and sanitize settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = settings_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        if self.unit_ms == 0 {
            log::warn!("Unit length 0 in settings, using {} ms", DEFAULT_UNIT_MS);
            self.unit_ms = DEFAULT_UNIT_MS;
        }
        if self.frequency == 0 {
            log::warn!("Frequency 0 in settings, using {} Hz", DEFAULT_FREQUENCY);
            self.frequency = DEFAULT_FREQUENCY;
        }
        if !self.volume.is_finite() {
            self.volume = 1.0;
        }
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }

    /// Playback options described by these settings
    pub fn play_options(&self) -> PlayOptions {
        PlayOptions::new(self.unit_ms, self.frequency)
            .unwrap_or_default()
            .unmapped(self.unmapped_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_player_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.play_options(), PlayOptions::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = AppSettings {
            unit_ms: 60,
            frequency: 550,
            unmapped_symbol: UnmappedSymbol::Rest,
            volume: 0.5,
        };
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.play_options().unmapped_policy(), UnmappedSymbol::Rest);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "frequency": 600 }"#).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.frequency, 600);
        assert_eq!(loaded.unit_ms, DEFAULT_UNIT_MS);
        assert_eq!(loaded.unmapped_symbol, UnmappedSymbol::Skip);
    }

    #[test]
    fn test_zero_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "unit_ms": 0, "frequency": 0, "volume": 3.0 }"#).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded.unit_ms, DEFAULT_UNIT_MS);
        assert_eq!(loaded.frequency, DEFAULT_FREQUENCY);
        assert_eq!(loaded.volume, 1.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            AppSettings::load_from(&path),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            AppSettings::load_from(&dir.path().join("missing.json")),
            Err(SettingsError::Io(_))
        ));
    }
}
