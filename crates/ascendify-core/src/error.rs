//! Core error types for ascendify-core.
//!
//! Validation errors never leave a [`Session`](crate::Session): they are turned
//! into status events. [`CoreError`] covers configuration, JSON output and the
//! async runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ascendify-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session task has shut down and no longer accepts commands.
    #[error("Session is no longer running")]
    ChannelClosed,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Input validation errors.
///
/// Format errors (`InvalidTime`, `NotANumber`) come from text that cannot be
/// parsed at all; the rest are domain errors on well-formed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Time-of-day text is not strict 24-hour `HH:MM`.
    #[error("'{input}' is not a valid HH:MM time")]
    InvalidTime { input: String },

    /// Text where an integer was expected.
    #[error("'{input}' is not a whole number for {field}")]
    NotANumber { field: &'static str, input: String },

    /// Integer that must be strictly positive.
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    /// Exercise name is blank.
    #[error("exercise name must not be empty")]
    EmptyName,

    /// Wake and sleep times are identical.
    #[error("wake and sleep times must differ")]
    EmptyWindow,

    /// Cadence choice is not one of the presets or `custom`.
    #[error("unknown reminder frequency '{0}'")]
    UnknownCadence(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
