// Rust guideline compliant 2026-10-14

//! Tracing setup for the `ldm` binary.
//!
//! Events go to stderr as human-readable lines, or to a file as JSON lines
//! when a log file is given.

use anyhow::{bail, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Level used when neither the command line nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parses a log level name.
///
/// # Errors
///
/// Returns an error for names other than error, warn, info, debug, trace.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => bail!("Invalid log level: {}", other),
    }
}

/// Installs the global tracing subscriber.
///
/// # Arguments
///
/// * `level` - Maximum level to record
/// * `log_file` - Append JSON lines here instead of writing to stderr
///
/// # Returns
///
/// A guard that flushes the file writer when dropped; keep it alive until
/// the process exits.
///
/// # Errors
///
/// Returns an error if the level is invalid or the file cannot be opened.
pub fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = parse_log_level(level)?;

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(guard));
    }

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(None)
}
