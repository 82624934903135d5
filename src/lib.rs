//! Crate entry point for **cefsrc**.
//!
//! `cefsrc` keeps a local checkout of the Chromium Embedded Framework sources
//! pinned to the `cef_<version>` tag that matches the binary build in use.
//! It shells out to `git` for every repository operation.
//!
//! Each submodule owns one concern (request/defaults, paths, git command plan,
//! process execution, logging). The `pub use` re-exports are what the binary uses.

mod config;
mod error;
mod git;
mod logging;
mod paths;
mod runner;
mod sync;

pub use config::{
    DEFAULT_CEF_REPOSITORY, DEFAULT_CEF_VERSION, SyncRequest, TAG_PREFIX, tag_for_version,
};
pub use error::SyncError;
pub use git::{DestinationState, clone_command, ensure_repo, update_commands};
pub use logging::init_logging;
pub use paths::default_output_dir;
pub use runner::{CommandRunner, SystemRunner, command_line};
pub use sync::{cmd_sync, confirmation, sync_with};
