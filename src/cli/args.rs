//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stevedore - CI release helpers for app monorepos
#[derive(Parser, Debug)]
#[command(name = "stv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if stv was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect apps whose version was bumped between two commits
    #[command(
        name = "detect",
        long_about = "Detect apps whose version was bumped between two commits.\n\n\
            Diffs the two revisions, keeps the app package manifests among the \
            changed paths, and writes the resulting app set to the CI output \
            key 'released' as a JSON array. An empty set is a normal outcome.",
        after_help = "\
WORKFLOW EXAMPLES:
    # After a push to main: what did this commit release?
    stv detect

    # Against an arbitrary range
    stv detect --from v1.4.0 --to HEAD"
    )]
    Detect {
        /// Older revision to diff from
        #[arg(long, default_value = "HEAD~1")]
        from: String,

        /// Newer revision to diff to
        #[arg(long, default_value = "HEAD")]
        to: String,
    },

    /// Decide whether the current commit is a release commit
    #[command(
        name = "gate",
        long_about = "Decide whether the current commit is a release commit.\n\n\
            A release commit is the landing of the automated version-bump PR: \
            its message (or, for merge commits, the merged branch tip's message) \
            starts with the release marker. On a release commit the changed app \
            set is detected and emitted; otherwise 'is_release=false' and an \
            empty set are emitted and the command exits successfully."
    )]
    Gate,

    /// Render a release preview table for the current branch
    #[command(
        name = "preview",
        long_about = "Render a release preview table for the current branch.\n\n\
            Lists every app, marks the ones this branch bumps, shows their new \
            versions and the deploy ordering. On CI the markdown is written to \
            the output key 'comment' for posting as a PR comment; locally it is \
            printed to stdout."
    )]
    Preview {
        /// Base ref the branch will merge into
        #[arg(long)]
        base: Option<String>,
    },

    /// Propagate an app's package version into its packaging manifests
    #[command(
        name = "sync",
        long_about = "Propagate an app's package version into its packaging manifests.\n\n\
            Reads the version from the app's package.json and rewrites it into \
            src-tauri/Cargo.toml and src-tauri/tauri.conf.json, then refreshes \
            the Cargo lock file so the new crate version lands on disk. Run \
            this after a version bump, before committing.",
        after_help = "\
WORKFLOW EXAMPLES:
    # After bumping apps/cloudprint/package.json
    stv sync cloudprint"
    )]
    Sync {
        /// App directory name under the applications root
        app: String,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    stv completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    stv completion zsh >> ~/.zshrc"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
