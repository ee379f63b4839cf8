// SPDX-License-Identifier: CC0-1.0

//! Config directory lookup, creation and file opening.
//!
//! The directory is `$XDG_CONFIG_HOME/<app>` or, when that is unset or empty,
//! `$HOME/.config/<app>`. Environment variables are read in exactly one place,
//! [`ConfigEnv::from_process`]; everything else takes the snapshot as an
//! argument.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while locating or opening config files
#[derive(Debug, Error)]
pub enum PathError {
    /// `HOME` is unset and no `XDG_CONFIG_HOME` was given.
    #[error("HOME is not set; cannot locate the config directory")]
    MissingHomeDirectory,
    /// The config directory could not be created.
    #[error("failed to create config directory {path}: {source}")]
    ConfigDirCreationFailed {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A config file could not be opened or created.
    #[error("failed to open config file {path}: {source}")]
    ConfigFileOpenFailed {
        /// File that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result alias for path operations
pub type PathResult<T> = std::result::Result<T, PathError>;

/// The environment variables that decide where config lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEnv {
    /// Value of `HOME`.
    pub home: Option<PathBuf>,
    /// Value of `XDG_CONFIG_HOME`.
    pub xdg_config_home: Option<PathBuf>,
}

impl ConfigEnv {
    /// Snapshot `HOME` and `XDG_CONFIG_HOME` from the running process.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::var_os("HOME"), std::env::var_os("XDG_CONFIG_HOME"))
    }

    /// Build a snapshot from raw values; empty values count as unset.
    pub fn from_vars(home: Option<OsString>, xdg_config_home: Option<OsString>) -> Self {
        let non_empty =
            |value: Option<OsString>| value.filter(|v| !v.is_empty()).map(PathBuf::from);
        Self { home: non_empty(home), xdg_config_home: non_empty(xdg_config_home) }
    }

    /// Base config directory: `XDG_CONFIG_HOME`, else `HOME/.config`.
    pub fn config_home(&self) -> PathResult<PathBuf> {
        if let Some(xdg) = &self.xdg_config_home {
            return Ok(xdg.clone());
        }
        self.home.as_ref().map(|home| home.join(".config")).ok_or(PathError::MissingHomeDirectory)
    }
}

/// Directory holding the files of `app_folder`.
pub fn config_dir(env: &ConfigEnv, app_folder: &str) -> PathResult<PathBuf> {
    Ok(env.config_home()?.join(app_folder))
}

/// Create `dir` (and missing parents) if absent, owner-only on unix.
///
/// An already existing directory is not an error and its permissions are left alone.
pub fn ensure_dir(dir: &Path) -> PathResult<()> {
    if dir.is_dir() {
        return Ok(());
    }
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .map_err(|source| PathError::ConfigDirCreationFailed { path: dir.to_path_buf(), source })?;
    debug!(dir = %dir.display(), "created config directory");
    Ok(())
}

/// Open `path` for reading and writing, creating it empty if missing.
///
/// Existing content is kept; the file is never truncated on open.
pub fn open_read_write(path: &Path) -> PathResult<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|source| PathError::ConfigFileOpenFailed { path: path.to_path_buf(), source })
}

/// A named file inside the application's config directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    dir: PathBuf,
    file_name: String,
}

impl ConfigLocation {
    /// Resolve `<config home>/<app_folder>/<file_name>` without touching the filesystem.
    pub fn resolve(env: &ConfigEnv, app_folder: &str, file_name: &str) -> PathResult<Self> {
        Ok(Self { dir: config_dir(env, app_folder)?, file_name: file_name.to_string() })
    }

    /// Directory containing the file.
    pub fn dir(&self) -> &Path { &self.dir }

    /// Full path of the file.
    pub fn path(&self) -> PathBuf { self.dir.join(&self.file_name) }

    /// Create the directory if needed and open the file read-write.
    pub fn open(&self) -> PathResult<File> {
        ensure_dir(&self.dir)?;
        open_read_write(&self.path())
    }
}
