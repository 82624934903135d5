use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while bringing the CEF checkout to the pinned tag.
///
/// None of these are recovered locally: every variant aborts the run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// An external command ran but exited unsuccessfully.
    #[error("Command '{command}'{} failed with {}.", in_dir(.cwd), exit_status(.code))]
    CommandFailed {
        command: String,
        cwd: Option<PathBuf>,
        /// `None` when the process was killed by a signal.
        code: Option<i32>,
    },

    /// The program could not be started at all (missing binary, bad cwd, ...).
    #[error("failed to run '{command}'{}", in_dir(.cwd))]
    Spawn {
        command: String,
        cwd: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error(
        "Destination '{}' exists but is not a Git repository. \
         Please remove it or choose a different --output-dir.",
        .path.display()
    )]
    InvalidDestination { path: PathBuf },

    #[error("failed to create parent directory {}", .path.display())]
    CreateParent {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CEF version must not be empty")]
    EmptyVersion,
}

fn in_dir(cwd: &Option<PathBuf>) -> String {
    cwd.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
