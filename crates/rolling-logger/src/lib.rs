//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes to a size-rotated file
//! in the app log directory and to stderr, and keeps the most recent lines in
//! memory. `log` records from dependencies are forwarded into the same
//! subscriber.

mod writer;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use writer::{RollingConfig, RollingHandle, RollingLogger};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Local wall-clock timestamps, millisecond precision
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize logging with default limits
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, RollingConfig::default())
}

/// Initialize logging. Fails if called twice in one process.
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: RollingConfig,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let logger = RollingLogger::new(log_dir, app_name, config)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_writer(logger.clone())
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    let path = logger.log_path();
    LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(app = app_name, path = %path.display(), "logger initialized");
    Ok(())
}

fn installed() -> Result<&'static RollingLogger, LoggerError> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    installed()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    installed()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    installed()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Recent lines from the installed logger (empty before initialization)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingLogger::recent_lines).unwrap_or_default()
}

/// Current log file, once initialized
pub fn log_path() -> Option<PathBuf> {
    LOGGER.get().map(RollingLogger::log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt;

    #[test]
    fn test_events_reach_file_and_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RollingLogger::new(dir.path(), "crm", RollingConfig::default()).unwrap();

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_timer(LocalTime)
                .with_writer(logger.clone())
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(board = "leads", "board loaded");
            tracing::warn!("move rejected");
        });

        let lines = logger.recent_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO") && lines[0].contains("board loaded"));
        assert!(lines[0].contains("leads"));
        assert!(lines[1].contains("WARN") && lines[1].contains("move rejected"));

        let file = std::fs::read_to_string(logger.log_path()).unwrap();
        assert!(file.contains("board loaded"));
    }

    #[test]
    fn test_helpers_require_init() {
        // The global logger is never installed in unit tests
        assert!(matches!(info("hello"), Err(LoggerError::NotInitialized)));
        assert!(recent_lines().is_empty());
        assert!(log_path().is_none());
    }
}
