//! TOML-based application configuration.
//!
//! Stores the planner's tunables:
//! - Grid geometry for the layout projector
//! - Allocator search step
//! - Store overlap policy
//! - Day selected when a session starts
//!
//! Configuration is stored at `~/.config/weekplan/config.toml`. Only
//! settings live here; schedules are never written to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::layout::LayoutConfig;
use crate::schedule::DayOfWeek;
use crate::scheduler::AllocatorConfig;
use crate::store::OverlapPolicy;

/// Layout projector geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSection {
    #[serde(default = "default_track_height")]
    pub track_height: f64,
    #[serde(default = "default_top_margin")]
    pub top_margin: f64,
}

/// Slot allocator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorSection {
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
}

/// Schedule store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Day index (0 = Sunday) selected at session start
    #[serde(default = "default_day")]
    pub default_day: u8,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/weekplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutSection,
    #[serde(default)]
    pub allocator: AllocatorSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub planner: PlannerSection,
}

// Default functions
fn default_track_height() -> f64 {
    200.0
}
fn default_top_margin() -> f64 {
    20.0
}
fn default_step_minutes() -> u32 {
    15
}
fn default_day() -> u8 {
    1
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            track_height: default_track_height(),
            top_margin: default_top_margin(),
        }
    }
}

impl Default for AllocatorSection {
    fn default() -> Self {
        Self {
            step_minutes: default_step_minutes(),
        }
    }
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            default_day: default_day(),
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
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
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

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. On error the config is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let track_height = self.layout.track_height;
        if !track_height.is_finite() || track_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.track_height".into(),
                message: "must be a finite number greater than zero".into(),
            });
        }
        let top_margin = self.layout.top_margin;
        if !top_margin.is_finite() || top_margin < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.top_margin".into(),
                message: "must be a finite number, zero or more".into(),
            });
        }
        if !(1..=60).contains(&self.allocator.step_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "allocator.step_minutes".into(),
                message: "must be between 1 and 60".into(),
            });
        }
        if DayOfWeek::from_index(i64::from(self.planner.default_day)).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "planner.default_day".into(),
                message: "must be a day index from 0 (Sunday) to 6 (Saturday)".into(),
            });
        }
        Ok(())
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            track_height: self.layout.track_height,
            top_margin: self.layout.top_margin,
        }
    }

    pub fn allocator_config(&self) -> AllocatorConfig {
        AllocatorConfig {
            step_minutes: self.allocator.step_minutes,
        }
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.store.overlap_policy
    }

    /// The configured start day, Monday if the stored index is out of range.
    pub fn default_day(&self) -> DayOfWeek {
        DayOfWeek::from_index(i64::from(self.planner.default_day)).unwrap_or(DayOfWeek::MONDAY)
    }
}
