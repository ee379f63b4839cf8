//! MIME type detection.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::{AdapterError, AdapterResult};

/// Anything that can tell the MIME type of a file.
pub trait MimeSniffer {
    /// Return the MIME type of the file at `path`, e.g. `text/plain`.
    fn detect(&self, path: &Path) -> AdapterResult<String>;
}

/// Sniffer backed by the `file(1)` utility (`file --brief --mime-type`).
#[derive(Debug, Clone)]
pub struct FileCommandSniffer {
    command: PathBuf,
}

impl FileCommandSniffer {
    /// Use the `file` command found on `PATH`.
    pub fn new() -> Self { Self::with_command("file") }

    /// Use a specific `file`-compatible executable.
    pub fn with_command(command: impl Into<PathBuf>) -> Self { Self { command: command.into() } }
}

impl Default for FileCommandSniffer {
    fn default() -> Self { Self::new() }
}

impl MimeSniffer for FileCommandSniffer {
    fn detect(&self, path: &Path) -> AdapterResult<String> {
        let failed = |reason: String| AdapterError::MimeDetectionFailed {
            path: path.to_path_buf(),
            reason,
        };

        // `file` reports unreadable paths on stdout with a zero exit status.
        std::fs::metadata(path).map_err(|e| failed(e.to_string()))?;

        let command = which::which(&self.command)
            .map_err(|e| failed(format!("`{}` is unavailable: {}", self.command.display(), e)))?;
        let output = Command::new(&command)
            .args(["--brief", "--mime-type", "--"])
            .arg(path)
            .output()
            .map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            return Err(failed(String::from_utf8_lossy(&output.stderr).trim().to_string()));
        }

        let mime_type = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !is_mime_type(&mime_type) {
            return Err(failed(format!("unexpected output `{}`", mime_type)));
        }
        debug!(path = %path.display(), mime_type = %mime_type, "detected MIME type");
        Ok(mime_type)
    }
}

/// Sniffer that always answers with the same type (used for `--mime`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSniffer(pub String);

impl MimeSniffer for StaticSniffer {
    fn detect(&self, _path: &Path) -> AdapterResult<String> { Ok(self.0.clone()) }
}

fn is_mime_type(candidate: &str) -> bool {
    match candidate.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty()
                && !subtype.is_empty()
                && !candidate.chars().any(|c| c.is_whitespace() || c == '=')
        }
        None => false,
    }
}
