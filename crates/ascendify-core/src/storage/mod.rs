mod config;

pub use config::{Config, DisplayConfig, RemindersConfig, ScheduleConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/ascendify[-dev]/` based on ASCENDIFY_ENV.
///
/// Set ASCENDIFY_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ASCENDIFY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ascendify-dev")
    } else {
        base_dir.join("ascendify")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
