//! cli
//!
//! Command-line interface layer for stevedore.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve the ambient environment (CI output channel) exactly once
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds the
//! [`Context`] every handler receives, and dispatches. Handlers read the
//! repository through [`crate::git`] and never touch process globals
//! themselves; the CI output channel travels inside the context.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::Result;

use crate::ci::CiOutput;
use crate::ui::Verbosity;

/// Execution context shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory to run in, if overridden via `--cwd`.
    pub cwd: Option<PathBuf>,
    /// Output verbosity derived from `--quiet`/`--debug`.
    pub verbosity: Verbosity,
    /// The CI output channel, resolved once at startup.
    pub ci: CiOutput,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        // The only place the process environment is consulted.
        ci: CiOutput::from_env(),
    };

    commands::dispatch(cli.command, &ctx)
}
