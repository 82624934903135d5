//! # cefsrc
//!
//! Clone the Chromium Embedded Framework (CEF) source tree for reference when
//! working on the webbrowser target.
//!
//! - Missing `--output-dir`: shallow clone of tag `cef_<version>`
//! - Existing checkout: fetch, force checkout of the tag, `git clean -fdx`
//! - Anything else at `--output-dir` is refused untouched
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use cefsrc::{
    DEFAULT_CEF_REPOSITORY, DEFAULT_CEF_VERSION, SyncRequest, cmd_sync, default_output_dir,
    init_logging,
};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use colored::Colorize;

/// Command-line interface definition.
///
/// No `version` attribute: `--version` selects the CEF release.
#[derive(Parser, Debug)]
#[command(
    name = "cefsrc",
    about = "Clone the Chromium Embedded Framework (CEF) source tree for reference \
             when working on the webbrowser target."
)]
struct Cli {
    /// CEF version tag to check out. The tool looks for a tag named 'cef_<version>'.
    #[arg(long, default_value = DEFAULT_CEF_VERSION, value_parser = NonEmptyStringValueParser::new())]
    version: String,

    /// CEF git repository URL to clone.
    #[arg(long, value_name = "URL", default_value = DEFAULT_CEF_REPOSITORY)]
    repo: String,

    /// Directory to clone the repository into. Parent directories are created if missing.
    #[arg(long, value_name = "PATH", default_value_os_t = default_output_dir())]
    output_dir: PathBuf,

    /// Log every git command before it runs
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let request = SyncRequest::new(cli.version, cli.repo, cli.output_dir)?;
    cmd_sync(&request)
}

/// CLI entry point.
///
/// Errors are printed as a single message (with causes) and exit with status 1.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
