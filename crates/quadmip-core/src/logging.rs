//! Structured logging setup.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Failures while installing the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// Level string is not a valid `EnvFilter` directive.
    InvalidFilter(String),
    /// `QUADMIP_LOG_FORMAT` is neither `json` nor `pretty`.
    InvalidFormat(String),
    /// `QUADMIP_LOG_FILE` could not be opened for appending.
    LogFile(String),
    /// Subscriber installation failed.
    Init(String),
}

impl LoggingError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOGGING_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOGGING_INVALID_FORMAT",
            LoggingError::LogFile(_) => "LOGGING_FILE",
            LoggingError::Init(_) => "LOGGING_INIT",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), msg)
            }
            LoggingError::InvalidFormat(format) => write!(
                f,
                "[{}] Invalid QUADMIP_LOG_FORMAT {:?} (expected 'json' or 'pretty')",
                self.code(),
                format
            ),
            LoggingError::LogFile(msg) => {
                write!(f, "[{}] Failed to open log file: {}", self.code(), msg)
            }
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggingError::LogFile(err.to_string()))
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Build the level filter from an explicit level, falling back to `QUADMIP_TRACE`.
///
/// An unset level means `off`.
pub fn level_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("QUADMIP_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());

    if level_value.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(&level_value).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

/// Install a global `tracing` subscriber.
///
/// Output goes to stderr, formatted per `QUADMIP_LOG_FORMAT` (`pretty` by
/// default, or `json`), and is mirrored to `QUADMIP_LOG_FILE` when set.
/// Returns `Ok(false)` when a subscriber is already installed.
pub fn init_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = level_filter(level)?;
    let format = env::var("QUADMIP_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let log_file = env::var("QUADMIP_LOG_FILE").ok();
    let use_json = format.eq_ignore_ascii_case("json");

    if !use_json && !format.eq_ignore_ascii_case("pretty") {
        return Err(LoggingError::InvalidFormat(format));
    }

    if use_json {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .json();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .pretty();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    }

    tracing::debug!(
        component = "logging",
        operation = "init",
        status = "success",
        format = %format,
        "Initialized structured logging"
    );
    Ok(true)
}
