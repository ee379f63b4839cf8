#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! External collaborator adapters
//!
//! The preference store only deals in MIME type strings and program names.
//! This crate supplies the two outside services around it:
//! - [`MimeSniffer`]: turn a file path into a MIME type
//! - [`Launcher`]: start the chosen program on the file
//!
//! Each is a trait so the CLI can be driven by fakes in tests.

use std::path::PathBuf;

use thiserror::Error;

pub mod mime_sniffer;
pub mod process_launcher;

pub use mime_sniffer::{FileCommandSniffer, MimeSniffer, StaticSniffer};
pub use process_launcher::{Launcher, ProcessLauncher};

#[derive(Debug, Error)]
/// Errors raised by the sniffer and launcher adapters
pub enum AdapterError {
    /// The MIME type of a file could not be determined
    #[error("could not determine the MIME type of {path}: {reason}")]
    MimeDetectionFailed {
        /// File being inspected
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
    /// The program is not an executable on `PATH` (or an executable path)
    #[error("program `{program}` not found")]
    ProgramNotFound {
        /// Program as configured
        program: String,
    },
    /// The program was found but could not be started
    #[error("failed to launch `{program}`: {source}")]
    LaunchFailed {
        /// Program as configured
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// An attached program ran and exited unsuccessfully
    #[error("`{program}` exited with {}", describe_exit(.code))]
    ProgramExited {
        /// Program as configured
        program: String,
        /// Exit status, `None` when killed by a signal
        code: Option<i32>,
    },
}

/// Result alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
