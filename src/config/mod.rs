use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::constants::{DEFAULT_MAX_HISTORY_SIZE, DEFAULT_SMOOTHING_WINDOW};

/// History configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of commands kept before the oldest is evicted
    pub max_history_size: usize,

    /// Optional cap on the memory held by history snapshots, in bytes
    pub max_memory_bytes: Option<usize>,

    /// Window used by smoothing when the caller does not pick one
    pub default_smoothing_window: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            max_memory_bytes: None,
            default_smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

impl HistoryConfig {
    /// Clamp values that would make history unusable. Returns true if anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if self.max_history_size == 0 {
            warn!("max_history_size of 0 is not allowed, using 1");
            self.max_history_size = 1;
            changed = true;
        }
        if self.default_smoothing_window == 0 {
            warn!(
                "default_smoothing_window of 0 is not allowed, using {}",
                DEFAULT_SMOOTHING_WINDOW
            );
            self.default_smoothing_window = DEFAULT_SMOOTHING_WINDOW;
            changed = true;
        }
        changed
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not write config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of loading config from disk
#[derive(Debug)]
pub struct LoadConfigResult {
    pub config: HistoryConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Get the path to the config file (platform-appropriate location)
pub fn default_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Load configuration from `path`, falling back to defaults
pub fn load_config(path: &Path) -> LoadConfigResult {
    let (mut config, reset_reason): (HistoryConfig, Option<String>) = if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    info!("Loaded history config from {:?}", path);
                    (config, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        HistoryConfig::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    HistoryConfig::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (HistoryConfig::default(), None)
    };

    config.sanitize();
    LoadConfigResult {
        config,
        reset_reason,
    }
}

/// Save configuration to `path`, creating parent directories as needed
pub fn save_config(config: &HistoryConfig, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    info!("Config saved to {:?}", path);
    Ok(())
}
