#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for mimelaunch binaries.
//!
//! Library crates only emit `tracing` events; this crate installs the global
//! subscriber once, at the program boundary.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that can occur while installing the log subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level / filter directive did not parse
    #[error("invalid log filter `{directive}`: {source}")]
    Filter {
        /// Directive that failed to parse
        directive: String,
        /// Parser error
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// The log file could not be opened for appending
    #[error("failed to open log file {path}: {source}")]
    File {
        /// Log file path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Pick the filter directive: a non-blank `RUST_LOG` wins over `level`.
pub fn select_directive<'a>(rust_log: Option<&'a str>, level: &'a str) -> &'a str {
    rust_log.filter(|value| !value.trim().is_empty()).unwrap_or(level)
}

/// Build the event filter from [`select_directive`].
pub fn build_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = select_directive(rust_log, level);
    EnvFilter::try_new(directive)
        .map_err(|source| LoggingError::Filter { directive: directive.to_string(), source })
}

/// Install the global fmt subscriber at `level`, writing to `file` or stderr.
///
/// Calling this again after a subscriber is installed is a no-op.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // `try_init` only fails when a global subscriber already exists.
    let _ = match file {
        Some(path) => {
            let log_file = open_log_file(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(log_file)).try_init()
        }
        None => builder.without_time().with_writer(std::io::stderr).try_init(),
    };
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::File { path: path.display().to_string(), source })
}
