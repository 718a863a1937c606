//! Tracing subscriber setup.
//!
//! The terminal belongs to the TUI, so log lines go to a plain-text file in
//! the system temp directory instead of stderr.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "livescroll-articles.log";

/// Where log output is written.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Install the global subscriber with the given `EnvFilter` directive.
///
/// Returns the log file path so it can be shown to the user.  Safe to call
/// more than once; only the first call takes effect.
pub fn init(filter: &str) -> Result<PathBuf> {
    let path = log_path();
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter {filter:?}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(path)
}
