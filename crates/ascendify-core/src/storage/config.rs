//! TOML-based preferences.
//!
//! Stores the defaults a new session starts from:
//! - Wake and sleep times
//! - Reminder frequency
//! - Countdown display
//!
//! Exercises and rep counts are never written here. Configuration is stored at
//! `~/.config/ascendify/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::schedule::{AwakeWindow, Cadence};

/// Default awake window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_wake")]
    pub wake: String,
    #[serde(default = "default_sleep")]
    pub sleep: String,
}

/// Default reminder frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    /// `30`, `60`, `120`, `1` or `custom`.
    #[serde(default = "default_cadence")]
    pub cadence: String,
    /// Used when `cadence` is `custom`.
    #[serde(default = "default_custom_minutes")]
    pub custom_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_countdown: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ascendify/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_wake() -> String {
    "07:00".into()
}
fn default_sleep() -> String {
    "23:00".into()
}
fn default_cadence() -> String {
    "60".into()
}
fn default_custom_minutes() -> u32 {
    45
}
fn default_true() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            wake: default_wake(),
            sleep: default_sleep(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            cadence: default_cadence(),
            custom_minutes: default_custom_minutes(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_countdown: true,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf key".into()))
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value in memory by dot-separated key.
    ///
    /// The change is rejected if it would leave an unusable window or
    /// cadence behind.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate().map_err(|message| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        })?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    pub fn window(&self) -> Result<AwakeWindow, ConfigError> {
        AwakeWindow::parse(&self.schedule.wake, &self.schedule.sleep).map_err(|e| {
            ConfigError::InvalidValue {
                key: "schedule".into(),
                message: e.to_string(),
            }
        })
    }

    pub fn cadence(&self) -> Result<Cadence, ConfigError> {
        let custom = self.reminders.custom_minutes.to_string();
        Cadence::parse(&self.reminders.cadence, Some(&custom)).map_err(|e| {
            ConfigError::InvalidValue {
                key: "reminders".into(),
                message: e.to_string(),
            }
        })
    }

    fn validate(&self) -> Result<(), String> {
        self.window().map_err(|e| e.to_string())?;
        self.cadence().map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.schedule.wake, "07:00");
        assert_eq!(parsed.reminders.cadence, "60");
        assert!(parsed.display.show_countdown);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg = Config::from_toml_str("[schedule]\nwake = \"06:30\"\n").unwrap();
        assert_eq!(cfg.schedule.wake, "06:30");
        assert_eq!(cfg.schedule.sleep, "23:00");
        assert_eq!(cfg.reminders.custom_minutes, 45);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml_str("schedule = ["),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn defaults_resolve_to_window_and_cadence() {
        let cfg = Config::default();
        assert_eq!(cfg.window().unwrap().awake_hours(), 16.0);
        assert_eq!(cfg.cadence().unwrap(), Cadence::Hourly);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("schedule.wake").as_deref(), Some("07:00"));
        assert_eq!(cfg.get("reminders.custom_minutes").as_deref(), Some("45"));
        assert_eq!(cfg.get("display.show_countdown").as_deref(), Some("true"));
        assert!(cfg.get("display.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_value_updates_typed_fields() {
        let mut cfg = Config::default();
        cfg.set_value("reminders.cadence", "custom").unwrap();
        cfg.set_value("reminders.custom_minutes", "20").unwrap();
        cfg.set_value("display.show_countdown", "false").unwrap();
        assert_eq!(cfg.cadence().unwrap(), Cadence::Custom(20));
        assert!(!cfg.display.show_countdown);
    }

    #[test]
    fn set_value_rejects_unknown_keys_and_bad_types() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("ui.theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set_value("display.show_countdown", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set_value("schedule", "x"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn set_value_rejects_unusable_schedule() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("schedule.wake", "7am").is_err());
        assert!(cfg.set_value("schedule.wake", "23:00").is_err());
        assert!(cfg.set_value("reminders.cadence", "weekly").is_err());
        assert_eq!(cfg.schedule.wake, "07:00");
        assert_eq!(cfg.reminders.cadence, "60");
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.schedule.sleep, "23:00");

        let mut cfg = cfg;
        cfg.set_value("schedule.sleep", "22:30").unwrap();
        cfg.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.schedule.sleep, "22:30");
    }

    #[test]
    fn load_from_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reminders\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn load_from_keeps_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let content = b"[schedule]\nwake = \"06:00\"\n# caf\xe9\n";
        std::fs::write(&path, content).unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), content);
    }
}
