//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository and loads configuration
//! 2. Calls into the library layers (`core`, `git`, `sync`)
//! 3. Formats status output and writes CI outputs
//!
//! Handlers never parse diff paths or rewrite manifests themselves; that
//! logic lives in the library so it stays testable without a repository.

mod completion;
mod detect;
mod gate;
mod preview;
mod sync;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use detect::detect;
pub use gate::gate;
pub use preview::preview;
pub use sync::sync;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::cli::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Detect { from, to } => detect::detect(ctx, &from, &to),
        Command::Gate => gate::gate(ctx),
        Command::Preview { base } => preview::preview(ctx, base.as_deref()),
        Command::Sync { app } => sync::sync(ctx, &app),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// The directory the command starts in: `--cwd` or the process cwd.
pub(crate) fn start_dir(ctx: &Context) -> Result<PathBuf> {
    match &ctx.cwd {
        Some(cwd) => Ok(cwd.clone()),
        None => std::env::current_dir().context("cannot determine current directory"),
    }
}
