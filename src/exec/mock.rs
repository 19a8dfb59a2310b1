//! exec::mock
//!
//! Mock command runner for deterministic testing.
//!
//! # Design
//!
//! The mock records every invocation and replays scripted results in
//! order. With no scripted results it reports success with empty output,
//! which covers the common "the lock refresh worked" case without setup.
//!
//! # Example
//!
//! ```
//! use stevedore::exec::mock::MockRunner;
//! use stevedore::exec::CommandRunner;
//! use std::path::Path;
//!
//! let runner = MockRunner::new();
//! let output = runner
//!     .run("cargo", &["check".to_string()], Path::new("/tmp"))
//!     .unwrap();
//! assert!(output.success());
//!
//! let calls = runner.calls();
//! assert_eq!(calls.len(), 1);
//! assert_eq!(calls[0].program, "cargo");
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{CommandOutput, CommandRunner, ExecError};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The program that was run.
    pub program: String,
    /// Its arguments.
    pub args: Vec<String>,
    /// The working directory it ran in.
    pub cwd: PathBuf,
}

/// Mock runner for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    calls: Vec<RecordedCall>,
    scripted: Vec<CommandOutput>,
}

impl MockRunner {
    /// Create a mock runner that succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next unscripted invocation.
    ///
    /// Results are consumed in FIFO order; once the queue is empty the
    /// runner falls back to empty success.
    pub fn script(&self, output: CommandOutput) {
        self.inner.lock().unwrap().scripted.push(output);
    }

    /// Convenience: queue a failing result with the given exit code and stderr.
    pub fn script_failure(&self, code: i32, stderr: &str) {
        self.script(CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        });
    }

    /// All invocations recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput, ExecError> {
        let mut inner = self.inner.lock().unwrap();

        inner.calls.push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });

        if inner.scripted.is_empty() {
            Ok(CommandOutput {
                code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            })
        } else {
            Ok(inner.scripted.remove(0))
        }
    }
}
