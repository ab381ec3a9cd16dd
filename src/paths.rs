//! Where the history core keeps its config file and logs.
//!
//! Builds launched through cargo, and debug builds, resolve everything
//! against the working directory. Installed builds use the platform roots
//! from `dirs` with a `curve-history/` subdirectory:
//! - Linux: config under `~/.config`, logs under `~/.local/share`
//! - Windows and macOS: both under the data root (`%APPDATA%`,
//!   `~/Library/Application Support`)

use std::path::PathBuf;

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME};

const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    Config,
    Data,
}

/// True under `cargo run`/`cargo test` or in a debug build.
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

fn app_dir(root: Root) -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }
    let platform_root = match root {
        Root::Config if cfg!(target_os = "linux") => dirs::config_dir(),
        Root::Config | Root::Data => dirs::data_dir(),
    };
    platform_root.map(|p| p.join(APP_DIR_NAME))
}

/// The history config file, `history.json`.
///
/// Falls back to the bare file name when the platform has no config root.
pub fn config_file() -> PathBuf {
    app_dir(Root::Config)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Directory handed to [`crate::logging::setup_logging`] by default.
pub fn logs_dir() -> PathBuf {
    app_dir(Root::Data)
        .map(|dir| dir.join(LOGS_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(LOGS_DIR_NAME))
}

/// Create the config and logs directories of an installed build.
///
/// Dev mode writes next to the working directory, which always exists.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }
    if let Some(parent) = config_file().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::create_dir_all(logs_dir())
}
