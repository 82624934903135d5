//! Git integration layer.
//!
//! All version-control work is delegated to the `git` executable through a
//! [`CommandRunner`](crate::runner::CommandRunner); this module only decides
//! which commands to issue and in what order.

mod cli_backend;

pub use cli_backend::{DestinationState, clone_command, ensure_repo, update_commands};
