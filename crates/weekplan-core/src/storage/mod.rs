mod config;

pub use config::{AllocatorSection, Config, LayoutSection, PlannerSection, StoreSection};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns the configuration directory.
///
/// `WEEKPLAN_CONFIG_DIR` wins when set. Otherwise `~/.config/weekplan/`, or
/// `~/.config/weekplan-dev/` when `WEEKPLAN_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let dir = match std::env::var_os("WEEKPLAN_CONFIG_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("WEEKPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("weekplan-dev")
            } else {
                base_dir.join("weekplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
