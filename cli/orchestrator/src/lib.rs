#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Command implementations for the mimelaunch CLI.
//!
//! [`Context`] ties the collaborators together for one invocation: it finds
//! the config directory, reads the settings, opens (and optionally locks)
//! the preference file and hands it to the store. All failures surface as a
//! [`CliError`], which `main` turns into a message and an exit code.

use std::fs::File;
use std::path::{Path, PathBuf};

use adapters::{AdapterError, Launcher, MimeSniffer};
use config::{ConfigError, Settings, SETTINGS_FILE_NAME};
use logging::LoggingError;
use path::{ConfigEnv, ConfigLocation, PathError};
use store::session::{load, resolve_in, unset_in};
use store::{ExclusiveLock, PreferenceStore, StoreError};
use thiserror::Error;
use tracing::debug;
use types::Association;

/// Folder under the user config directory holding the mimelaunch files.
pub const APP_FOLDER: &str = "mimelaunch";

/// Exit code for "no default program configured".
pub const EXIT_NO_PREFERENCE: u8 = 3;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors that can occur while running a mimelaunch command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config directory or file problems.
    #[error(transparent)]
    Path(#[from] PathError),
    /// Settings file problems.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Logging could not be set up.
    #[error(transparent)]
    Logging(#[from] LoggingError),
    /// Preference file read/resolve/persist problems.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// MIME detection or launch problems.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// The file to open does not exist or cannot be inspected.
    #[error("could not find file {path}: {source}")]
    TargetNotFound {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A MIME type or program was empty or only whitespace.
    #[error("{what} must not be empty")]
    BlankValue {
        /// Which value was blank.
        what: &'static str,
    },
    /// JSON output could not be produced.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Store(StoreError::NoPreferenceFound { .. }) => EXIT_NO_PREFERENCE,
            _ => EXIT_FAILURE,
        }
    }

    /// Follow-up advice shown under the error message, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Store(StoreError::NoPreferenceFound { mime_type }) => Some(format!(
                "re-run with `--default <PROGRAM>` or use `mimelaunch set {} <PROGRAM>` to choose one",
                mime_type
            )),
            CliError::Path(PathError::MissingHomeDirectory) => {
                Some("set HOME or XDG_CONFIG_HOME".to_string())
            }
            _ => None,
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Reject values that would be written as an unparseable `mime=` line.
fn non_blank<'a>(what: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(CliError::BlankValue { what });
    }
    Ok(value)
}

/// What `open` should do once the program is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Spawn and return.
    Detached,
    /// Spawn and wait for exit.
    Attached,
    /// Resolve (and persist) only.
    DryRun,
}

/// Everything one invocation needs: where the files are and what the settings say.
#[derive(Debug, Clone)]
pub struct Context {
    settings: Settings,
    store_location: ConfigLocation,
}

impl Context {
    /// Locate the config directory for `env` and read its settings file.
    pub fn load(env: &ConfigEnv) -> Result<Self> {
        let settings_location = ConfigLocation::resolve(env, APP_FOLDER, SETTINGS_FILE_NAME)?;
        let settings = Settings::load_or_default(settings_location.path())?;
        let store_location = ConfigLocation::resolve(env, APP_FOLDER, &settings.store.file_name)?;
        debug!(store = %store_location.path().display(), "context loaded");
        Ok(Self { settings, store_location })
    }

    /// Build a context from already-known parts.
    pub fn new(settings: Settings, store_location: ConfigLocation) -> Self {
        Self { settings, store_location }
    }

    /// Effective settings.
    pub fn settings(&self) -> &Settings { &self.settings }

    /// Location of the preference file.
    pub fn store_location(&self) -> &ConfigLocation { &self.store_location }

    /// Open the preference file and run `f` on it, under the lock if enabled.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut File) -> Result<T>) -> Result<T> {
        let mut file = self.store_location.open()?;
        let _lock =
            if self.settings.store.lock { Some(ExclusiveLock::acquire(&file)?) } else { None };
        f(&mut file)
    }

    /// Launch mode for `open`, from the flags and the `launch.detach` setting.
    pub fn launch_mode(&self, wait: bool, dry_run: bool) -> LaunchMode {
        if dry_run {
            LaunchMode::DryRun
        } else if wait || !self.settings.launch.detach {
            LaunchMode::Attached
        } else {
            LaunchMode::Detached
        }
    }

    /// Detect the type of `target`, resolve its program (recording `set_default`), and launch it.
    ///
    /// Returns the program that was (or, for a dry run, would be) launched.
    pub fn open(
        &self,
        target: &Path,
        set_default: Option<&str>,
        sniffer: &dyn MimeSniffer,
        launcher: &dyn Launcher,
        mode: LaunchMode,
    ) -> Result<String> {
        std::fs::metadata(target)
            .map_err(|source| CliError::TargetNotFound { path: target.to_path_buf(), source })?;
        let set_default = set_default.map(|program| non_blank("program", program)).transpose()?;
        let mime_type = sniffer.detect(target)?;
        non_blank("MIME type", &mime_type)?;
        let program = self.with_store(|file| Ok(resolve_in(file, &mime_type, set_default)?))?;
        match mode {
            LaunchMode::DryRun => {}
            LaunchMode::Attached => launcher.launch(&program, target, false)?,
            LaunchMode::Detached => launcher.launch(&program, target, true)?,
        }
        Ok(program)
    }

    /// Program configured for `mime_type`.
    pub fn query(&self, mime_type: &str) -> Result<String> {
        self.with_store(|file| Ok(resolve_in(file, mime_type, None)?))
    }

    /// Record `program` as the default for `mime_type`.
    pub fn set(&self, mime_type: &str, program: &str) -> Result<Association> {
        non_blank("MIME type", mime_type)?;
        non_blank("program", program)?;
        self.with_store(|file| Ok(resolve_in(file, mime_type, Some(program))?))
            .map(|program| Association::new(mime_type, program))
    }

    /// Remove the first association for `mime_type`.
    pub fn unset(&self, mime_type: &str) -> Result<Option<Association>> {
        self.with_store(|file| Ok(unset_in(file, mime_type)?))
    }

    /// Every association in file order.
    pub fn list(&self) -> Result<PreferenceStore> { self.with_store(|file| Ok(load(file)?)) }
}
