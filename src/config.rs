//! Configuration for the resonance tracker.

use crate::core::constants::NATURAL_DECAY_RATE;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "ocean-resonance";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fractional score loss per hour without contact
    pub decay_rate: f64,

    /// Directory holding the persisted session
    pub data_path: PathBuf,

    /// IANA time zone used when printing timestamps
    pub timezone: String,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            decay_rate: NATURAL_DECAY_RATE,
            data_path: data_dir,
            timezone: "UTC".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config =
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Set the decay rate. Must be finite and non-negative.
    pub fn set_decay_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidDecayRate(rate));
        }
        self.decay_rate = rate;
        Ok(())
    }

    /// Set the display time zone. Must be a known IANA name.
    pub fn set_timezone(&mut self, name: &str) -> Result<(), ConfigError> {
        name.parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))?;
        self.timezone = name.to_string();
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.json")
    }

    /// Path of the persisted session file.
    pub fn session_path(&self) -> PathBuf {
        self.data_path.join("session.json")
    }

    /// Configured time zone, UTC if the name is not recognised.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %self.timezone, "unknown time zone, using UTC");
            Tz::UTC
        })
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
    #[error("decay rate {0} must be finite and non-negative")]
    InvalidDecayRate(f64),
    #[error("unknown time zone: {0}")]
    UnknownTimezone(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.decay_rate, 0.08);
        assert_eq!(config.timezone, "UTC");
        assert!(config.session_path().ends_with("ocean-resonance/session.json"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"decay_rate": 0.12}"#).unwrap();
        assert_eq!(config.decay_rate, 0.12);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_timezone_parsing() {
        let mut config = Config::default();
        config.timezone = "Europe/Berlin".to_string();
        assert_eq!(config.tz(), chrono_tz::Europe::Berlin);

        config.timezone = "Not/AZone".to_string();
        assert_eq!(config.tz(), Tz::UTC);
    }

    #[test]
    fn test_setters_validate() {
        let mut config = Config::default();

        config.set_decay_rate(0.12).unwrap();
        assert_eq!(config.decay_rate, 0.12);
        assert!(matches!(
            config.set_decay_rate(-0.1),
            Err(ConfigError::InvalidDecayRate(_))
        ));
        assert!(config.set_decay_rate(f64::NAN).is_err());
        assert_eq!(config.decay_rate, 0.12);

        config.set_timezone("Asia/Tokyo").unwrap();
        assert_eq!(config.tz(), chrono_tz::Asia::Tokyo);
        assert!(matches!(
            config.set_timezone("Mars/Olympus"),
            Err(ConfigError::UnknownTimezone(_))
        ));
        assert_eq!(config.timezone, "Asia/Tokyo");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir()
            .join(format!("ocean-resonance-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("config.json");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.set_decay_rate(0.2).unwrap();
        config.set_timezone("Europe/Berlin").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
