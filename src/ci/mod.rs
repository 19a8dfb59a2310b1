//! ci
//!
//! The CI output channel.
//!
//! # Design
//!
//! GitHub Actions style: step outputs are appended as `key=value` lines to
//! the file named by the `GITHUB_OUTPUT` environment variable. Multi-line
//! values use the heredoc block form:
//!
//! ```text
//! key<<EOF-1717751820123
//! ...payload...
//! EOF-1717751820123
//! ```
//!
//! The environment is consulted exactly once, in [`CiOutput::from_env`] at
//! the CLI entry point; everything below receives the constructed value.
//! Tests build [`CiOutput::file`] or [`CiOutput::disabled`] directly and
//! never touch process globals.
//!
//! # Delimiter Correctness
//!
//! The heredoc delimiter must not occur verbatim inside the payload or the
//! consumer would truncate the value at the collision point. Delimiters are
//! derived from the current time and extended with a counter until they do
//! not appear in the payload.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from CI output writes.
#[derive(Debug, Error)]
pub enum CiError {
    #[error("failed to append to CI output file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid output key '{key}'")]
    InvalidKey { key: String },

    #[error("value for '{key}' contains a newline; use a multi-line output")]
    MultilineValue { key: String },
}

/// Handle to the CI output channel.
///
/// When no channel is connected (local invocation), writes are no-ops and
/// callers fall back to plain stdout where a human-visible result matters.
#[derive(Debug, Clone)]
pub struct CiOutput {
    path: Option<PathBuf>,
}

impl CiOutput {
    /// Construct from the process environment (`GITHUB_OUTPUT`).
    ///
    /// This is the only place stevedore reads the variable; call it once
    /// at the entry point and pass the value down.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }

    /// A channel writing to the given file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A disconnected channel (local invocation).
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Whether a CI output file is connected.
    pub fn is_connected(&self) -> bool {
        self.path.is_some()
    }

    /// Set a single-line output value.
    ///
    /// No-op when disconnected.
    pub fn set(&self, key: &str, value: &str) -> Result<(), CiError> {
        validate_key(key)?;
        if value.contains('\n') {
            return Err(CiError::MultilineValue {
                key: key.to_string(),
            });
        }

        self.append(&format!("{key}={value}\n"))
    }

    /// Set a multi-line output value using the heredoc block form.
    ///
    /// No-op when disconnected; callers that want the payload visible in a
    /// local run print it themselves.
    pub fn set_multiline(&self, key: &str, payload: &str) -> Result<(), CiError> {
        validate_key(key)?;

        let delimiter = unique_delimiter(payload);
        self.append(&format!("{key}<<{delimiter}\n{payload}\n{delimiter}\n"))
    }

    fn append(&self, chunk: &str) -> Result<(), CiError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CiError::Write {
                path: path.clone(),
                source,
            })?;

        file.write_all(chunk.as_bytes()).map_err(|source| CiError::Write {
            path: path.clone(),
            source,
        })
    }
}

/// Output keys are used verbatim on the left of `=`; reject anything that
/// would corrupt the line format.
fn validate_key(key: &str) -> Result<(), CiError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CiError::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// Generate a delimiter that does not occur in `payload`.
fn unique_delimiter(payload: &str) -> String {
    let base = format!("EOF-{}", chrono::Utc::now().timestamp_millis());
    delimiter_from_base(&base, payload)
}

/// Extend `base` with a counter until it no longer occurs in `payload`.
fn delimiter_from_base(base: &str, payload: &str) -> String {
    if !payload.contains(base) {
        return base.to_string();
    }

    let mut n = 1u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !payload.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
