//! Centralized constants used across the crate.
//!
//! This module contains default values that are used in multiple places or
//! would benefit from being named constants.

/// Maximum number of commands to keep in history
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Default smoothing window (points on each side = window / 2)
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Version byte written at the start of every compressed snapshot
pub const SNAPSHOT_FORMAT_VERSION: u8 = 1;

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "curve-history";

/// File name of the persisted history configuration
pub const CONFIG_FILE_NAME: &str = "history.json";

/// File name of the session log
pub const LOG_FILE_NAME: &str = "curve-history.log";
