//! Core error types for weekplan-core.
//!
//! Scheduling operations themselves never fail: rejected edits and
//! allocation fallbacks are reported as outcome values. These errors cover
//! the edges of the library (configuration, parsing user input, catalog
//! lookups).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for weekplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange { start: f64, end: f64 },

    /// Day index outside 0..=6
    #[error("Invalid day index {0}: expected 0 (Sunday) through 6 (Saturday)")]
    InvalidDay(i64),

    /// Clock string that is not HH:MM
    #[error("Invalid clock time '{0}': expected HH:MM")]
    InvalidClock(String),

    /// Non-positive activity duration
    #[error("Invalid duration {0} minutes: must be greater than zero")]
    InvalidDuration(u32),

    /// Template id not present in the catalog
    #[error("Unknown habit template: {0}")]
    UnknownTemplate(String),

    /// Habit id not present in the tracker
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_into_core_error() {
        let err: CoreError = ValidationError::InvalidDay(9).into();
        assert!(matches!(err, CoreError::Validation(ValidationError::InvalidDay(9))));
        assert!(err.to_string().contains("Invalid day index 9"));
    }

    #[test]
    fn config_parse_error_converts_from_toml() {
        let parse = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }
}
