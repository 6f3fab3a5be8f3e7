//! Logging setup for hosts embedding the crate.
//!
//! The library only emits `tracing` events. Hosts that have no subscriber of
//! their own can install one here:
//! - console output through a `tracing-subscriber` fmt layer
//! - optional copy to a log file, cleared on start
//! - `RUST_LOG` overrides the filter passed in

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the caller set one.
pub const DEFAULT_FILTER: &str = "geomap=info";

/// Errors from [`init_logging`].
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    /// The log file could not be prepared.
    #[error("Cannot prepare log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where log output goes.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `geomap=debug`.
    pub filter: Option<String>,
    /// Directory and file name of an additional log file.
    pub file: Option<(PathBuf, String)>,
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_file(mut self, dir: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        self.file = Some((dir.into(), file.into()));
        self
    }

    /// The filter in effect: `RUST_LOG`, then the configured one, then
    /// [`DEFAULT_FILTER`].
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.filter.as_deref().unwrap_or(DEFAULT_FILTER))
        })
    }
}

/// Keeps the file writer alive; dropping it flushes the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// Fails with [`LoggingError::AlreadyInitialized`] if any global subscriber
/// is already set, including one installed by an earlier call.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(true);

    let (file_layer, file_guard) = match &config.file {
        Some((dir, file)) => {
            prepare_log_file(dir, file)?;
            let appender = tracing_appender::rolling::never(dir, file);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Creates the directory and truncates the file.
fn prepare_log_file(dir: &Path, file: &str) -> Result<(), LoggingError> {
    let path = dir.join(file);
    fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, ""))
        .map_err(|source| LoggingError::LogFile { path, source })
}
