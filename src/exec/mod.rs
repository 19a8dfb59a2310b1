//! exec
//!
//! Narrow subprocess abstraction.
//!
//! # Design
//!
//! The only subprocess stevedore runs is the packaging toolchain's
//! dependency-lock refresh, but it runs behind the [`CommandRunner`] trait
//! so tests substitute [`mock::MockRunner`] and never invoke real tooling.
//! The trait is deliberately minimal: run a program with arguments in a
//! working directory, capture exit status and output.
//!
//! # Example
//!
//! ```ignore
//! use stevedore::exec::{CommandRunner, SystemRunner};
//!
//! let runner = SystemRunner;
//! let output = runner.run("cargo", &["check".into()], Path::new("apps/x/src-tauri"))?;
//! if !output.success() {
//!     eprintln!("{}", output.stderr);
//! }
//! ```

pub mod mock;

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors from subprocess invocation.
///
/// Only spawn failures are errors at this layer; a process that runs and
/// exits nonzero is reported through [`CommandOutput`] so callers decide
/// what a failure means.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to run '{program}' in {cwd}: {source}")]
    Spawn {
        program: String,
        cwd: PathBuf,
        source: std::io::Error,
    },
}

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run a command, capture its output, surface its exit status.
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, blocking until it exits.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput, ExecError>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput, ExecError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                cwd: cwd.to_path_buf(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
