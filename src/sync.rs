use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::SyncRequest;
use crate::git::ensure_repo;
use crate::runner::{CommandRunner, SystemRunner};

/// Clone or refresh the CEF checkout described by `request` using the system `git`.
///
/// Prints a one-line confirmation on success.
pub fn cmd_sync(request: &SyncRequest) -> Result<()> {
    sync_with(&SystemRunner, request)?;
    println!("{} {}", "✔".green(), confirmation(request));
    Ok(())
}

/// Same as [`cmd_sync`] minus the output, with an explicit runner.
pub fn sync_with<R: CommandRunner + ?Sized>(runner: &R, request: &SyncRequest) -> Result<()> {
    ensure_repo(runner, request).with_context(|| {
        format!(
            "could not prepare CEF {} at {}",
            request.version(),
            request.destination().display()
        )
    })
}

/// Human-readable success line.
pub fn confirmation(request: &SyncRequest) -> String {
    format!(
        "CEF source for version {} is available at {}.",
        request.version(),
        request.destination().display()
    )
}
