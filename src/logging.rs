//! Log setup for applications embedding the history core.
//!
//! Logs go to stdout with colors and to `<logs_dir>/curve-history.log`
//! without. Control levels with `RUST_LOG`; the default is
//! `info,curve_history=debug`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use crate::constants::LOG_FILE_NAME;
use crate::paths;

/// [`setup_logging`] into [`paths::logs_dir`], creating the app directories first.
pub fn setup_default_logging() -> Option<WorkerGuard> {
    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create app directories: {}", e);
    }
    setup_logging(&paths::logs_dir())
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// for the duration of the program. Returns `None` if the logs directory
/// cannot be created or a subscriber is already installed.
pub fn setup_logging(logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        eprintln!("Failed to create logs directory {:?}: {}", logs_dir, e);
        return None;
    }

    let log_file_path = logs_dir.join(LOG_FILE_NAME);
    append_session_separator(&log_file_path);

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Configure file layer (no ANSI colors for file output)
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,curve_history=debug"));

    match tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(e) => {
            eprintln!("Logging already initialized: {}", e);
            None
        }
    }
}

/// Append a session separator to an existing log file
pub fn append_session_separator(log_file_path: &Path) -> bool {
    let Ok(mut file) = OpenOptions::new().append(true).open(log_file_path) else {
        return false;
    };
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let separator = "=".repeat(80);
    writeln!(
        file,
        "\n\n{}\n=== New Session Started at {} ===\n{}\n",
        separator, timestamp, separator
    )
    .is_ok()
}
