//! Starting the resolved program on the target file.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::{AdapterError, AdapterResult};

/// Anything that can open `target` with `program`.
pub trait Launcher {
    /// Start `program` with `target` as its last argument.
    ///
    /// Detached launches return as soon as the child is spawned; attached
    /// launches wait for it and fail on a non-zero exit.
    fn launch(&self, program: &str, target: &Path, detached: bool) -> AdapterResult<()>;
}

/// Launcher that spawns a real child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    /// Create a launcher.
    pub fn new() -> Self { Self }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &str, target: &Path, detached: bool) -> AdapterResult<()> {
        let (executable, args) = split_program(program)?;
        let mut command = Command::new(&executable);
        command.args(&args).arg(target);

        if !detached {
            debug!(program, target = %target.display(), "launching attached");
            let status = command.status().map_err(|source| AdapterError::LaunchFailed {
                program: program.to_string(),
                source,
            })?;
            return if status.success() {
                Ok(())
            } else {
                Err(AdapterError::ProgramExited {
                    program: program.to_string(),
                    code: status.code(),
                })
            };
        }

        command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let child = command
            .spawn()
            .map_err(|source| AdapterError::LaunchFailed { program: program.to_string(), source })?;
        info!(program, pid = child.id(), target = %target.display(), "launched detached");
        Ok(())
    }
}

/// Locate the executable for `program`.
///
/// The whole string is tried first so paths containing spaces work; otherwise
/// it is split on whitespace into an executable and leading arguments.
pub fn split_program(program: &str) -> AdapterResult<(PathBuf, Vec<String>)> {
    let not_found = || AdapterError::ProgramNotFound { program: program.to_string() };
    if let Ok(path) = which::which(program) {
        return Ok((path, Vec::new()));
    }
    let mut words = program.split_whitespace();
    let first = words.next().ok_or_else(not_found)?;
    let path = which::which(first).map_err(|_| not_found())?;
    Ok((path, words.map(str::to_string).collect()))
}
