//! Running external programs.
//!
//! The sync logic only talks to [`CommandRunner`], so tests can swap in a fake
//! that records invocations instead of spawning `git`.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::SyncError;

/// Run one external command to completion.
pub trait CommandRunner {
    /// Execute `args` (program first), optionally inside `cwd`.
    ///
    /// Success is silent. A non-zero exit yields [`SyncError::CommandFailed`].
    fn run(&self, args: &[OsString], cwd: Option<&Path>) -> Result<(), SyncError>;
}

/// Spawns real processes, inheriting stdin/stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, args: &[OsString], cwd: Option<&Path>) -> Result<(), SyncError> {
        let (program, rest) = args.split_first().ok_or_else(|| SyncError::Spawn {
            command: String::new(),
            cwd: cwd.map(Path::to_path_buf),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        })?;

        let mut cmd = Command::new(program);
        cmd.args(rest);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        log_cmd(&cmd);

        let status = cmd.status().map_err(|source| SyncError::Spawn {
            command: command_line(args),
            cwd: cwd.map(Path::to_path_buf),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(SyncError::CommandFailed {
                command: command_line(args),
                cwd: cwd.map(Path::to_path_buf),
                code: status.code(),
            })
        }
    }
}

/// Reconstruct a printable command line (arguments joined by single spaces).
pub fn command_line(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn log_cmd(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let cwd = cmd
        .get_current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    debug!(%program, ?args, %cwd, "exec");
}
