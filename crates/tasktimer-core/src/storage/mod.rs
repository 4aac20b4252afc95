mod config;
pub mod tasks;

pub use config::{Config, NotificationsConfig, TimerConfig, UiConfig};
pub use tasks::{JsonFileRepository, MemoryRepository, TaskRepository};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `TASKTIMER_HOME` wins when set. Otherwise `~/.config/tasktimer[-dev]/`,
/// with `TASKTIMER_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if no home directory can be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TASKTIMER_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");
            let env = std::env::var("TASKTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("tasktimer-dev")
            } else {
                base_dir.join("tasktimer")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
