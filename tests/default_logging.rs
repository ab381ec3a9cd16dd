//! Default log location. Kept in its own binary because it installs the
//! global subscriber and changes the working directory.

use curve_history::constants::LOG_FILE_NAME;
use curve_history::{logging, paths};

#[test]
fn test_default_logging_writes_under_logs_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let guard = logging::setup_default_logging();
    assert!(guard.is_some());
    tracing::info!("default logging initialized");
    drop(guard);

    let logs = dir.path().join(paths::logs_dir());
    assert!(logs.is_dir());
    assert!(logs.join(LOG_FILE_NAME).exists());
}
