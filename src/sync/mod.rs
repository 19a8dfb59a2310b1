//! sync
//!
//! Version propagation from an app's package manifest into the packaging
//! toolchain's manifests.
//!
//! # Overview
//!
//! The `package.json` version is the source of truth; release tooling bumps
//! it there and nowhere else. This module copies that version verbatim into
//! the two places the desktop packaging toolchain reads it from, then
//! refreshes the toolchain's lock file so the rewritten crate version is
//! reflected on disk:
//!
//! 1. `src-tauri/Cargo.toml` - the `version = "..."` line is rewritten in
//!    place; every other byte of the file is preserved
//! 2. `src-tauri/tauri.conf.json` - the version field, wherever the config
//!    schema generation put it (see [`TauriConfShape`])
//! 3. `cargo check` (configurable) runs in `src-tauri/` to regenerate
//!    `Cargo.lock`
//!
//! # Failure Semantics
//!
//! A missing source version and a failed lock refresh are fatal; a stale
//! lock file would silently ship wrong dependency versions. The secondary
//! and tertiary manifests are tooling-specific state and may legitimately
//! be absent, so those steps degrade to a warning, reported through
//! [`SyncReport`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::manifest::{ManifestError, PackageManifest};
use crate::core::paths::AppPaths;
use crate::exec::{CommandRunner, ExecError};

/// Errors from version propagation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source manifest is unreadable or has no version.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A packaging manifest could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A packaging manifest could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The packaging toolchain config is not valid JSON.
    #[error("failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// The configured lock-refresh command is empty.
    #[error("lock_command must name a program")]
    EmptyLockCommand,

    /// The lock-refresh command could not be spawned.
    #[error(transparent)]
    LockSpawn(#[from] ExecError),

    /// The lock-refresh command exited nonzero.
    #[error("lock refresh '{command}' failed with status {code:?}:\n{stderr}")]
    LockRefreshFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// What happened to one optional manifest during a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The version was written.
    Updated,
    /// The file does not exist; nothing to do.
    FileAbsent,
    /// The file exists but no version location was recognized.
    NoVersionFound,
}

/// Result of a successful sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// The version text that was propagated.
    pub version: String,
    /// Outcome for `src-tauri/Cargo.toml`.
    pub cargo_toml: StepOutcome,
    /// Outcome for `src-tauri/tauri.conf.json`.
    pub tauri_conf: StepOutcome,
}

/// The two historical schema shapes of `tauri.conf.json`.
///
/// Toolchain v1 nests the version under a `package` object; v2 moved it to
/// the top level. Configs generated by other versions (or hand-edited into
/// something else) are `Unrecognized`. When both locations are present the
/// nested one wins - it is the one the v1 toolchain actually reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TauriConfShape {
    /// `{"package": {"version": ...}}`
    Nested,
    /// `{"version": ...}`
    TopLevel,
    /// Neither location carries a version.
    Unrecognized,
}

impl TauriConfShape {
    /// Classify a parsed config.
    pub fn detect(conf: &serde_json::Value) -> Self {
        let nested = conf
            .get("package")
            .and_then(|p| p.get("version"))
            .is_some();
        if nested {
            return TauriConfShape::Nested;
        }
        if conf.get("version").is_some() {
            return TauriConfShape::TopLevel;
        }
        TauriConfShape::Unrecognized
    }

    /// Write `version` into the location this shape dictates.
    ///
    /// Returns false for [`TauriConfShape::Unrecognized`], leaving the
    /// config untouched.
    pub fn apply(&self, conf: &mut serde_json::Value, version: &str) -> bool {
        let slot = match self {
            TauriConfShape::Nested => conf.get_mut("package").and_then(|p| p.get_mut("version")),
            TauriConfShape::TopLevel => conf.get_mut("version"),
            TauriConfShape::Unrecognized => None,
        };

        match slot {
            Some(slot) => {
                *slot = serde_json::Value::String(version.to_string());
                true
            }
            None => false,
        }
    }
}

/// Rewrite the value of the first top-level `version = "..."` line.
///
/// The match is anchored at line start (no leading whitespace), so table
/// entries like `serde = { version = "1" }` never match. Only the quoted
/// value changes; all other bytes, including line endings and trailing
/// comments, are preserved. Returns `None` when no line matches.
pub fn rewrite_version_line(content: &str, version: &str) -> Option<String> {
    let mut result = String::with_capacity(content.len());
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        if !replaced {
            if let Some(rewritten) = rewrite_one_line(line, version) {
                result.push_str(&rewritten);
                replaced = true;
                continue;
            }
        }
        result.push_str(line);
    }

    replaced.then_some(result)
}

/// Rewrite a single line if it is a top-level version assignment.
fn rewrite_one_line(line: &str, version: &str) -> Option<String> {
    let rest = line.strip_prefix("version")?;

    // Next significant char must be '='; anything else is another key
    // ("versions", "version_suffix", ...).
    let after_key = rest.trim_start_matches([' ', '\t']);
    let after_eq = after_key.strip_prefix('=')?;
    let after_ws = after_eq.trim_start_matches([' ', '\t']);
    let value_start = after_ws.strip_prefix('"')?;
    let close = value_start.find('"')?;

    let prefix_len = line.len() - value_start.len();
    let suffix = &value_start[close..];

    Some(format!("{}{}{}", &line[..prefix_len], version, suffix))
}

/// Propagate the app's package version into the packaging manifests, then
/// refresh the dependency lock.
///
/// The lock refresh runs strictly after both rewrites, in the packaging
/// crate's directory (the toolchain resolves its manifest from the cwd).
pub fn sync_app(
    paths: &AppPaths,
    runner: &dyn CommandRunner,
    lock_command: &[String],
) -> Result<SyncReport, SyncError> {
    let package_json = paths.package_json();
    let manifest = PackageManifest::read(&package_json)?;
    let version = manifest.require_version(&package_json)?.to_string();

    let cargo_toml = sync_cargo_toml(&paths.tauri_cargo_toml(), &version)?;
    let tauri_conf = sync_tauri_conf(&paths.tauri_conf(), &version)?;

    refresh_lock(runner, lock_command, &paths.tauri_root())?;

    Ok(SyncReport {
        version,
        cargo_toml,
        tauri_conf,
    })
}

fn sync_cargo_toml(path: &Path, version: &str) -> Result<StepOutcome, SyncError> {
    if !path.exists() {
        return Ok(StepOutcome::FileAbsent);
    }

    let content = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match rewrite_version_line(&content, version) {
        Some(rewritten) => {
            fs::write(path, rewritten).map_err(|source| SyncError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(StepOutcome::Updated)
        }
        None => Ok(StepOutcome::NoVersionFound),
    }
}

fn sync_tauri_conf(path: &Path, version: &str) -> Result<StepOutcome, SyncError> {
    if !path.exists() {
        return Ok(StepOutcome::FileAbsent);
    }

    let content = fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut conf: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| SyncError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let shape = TauriConfShape::detect(&conf);
    if !shape.apply(&mut conf, version) {
        return Ok(StepOutcome::NoVersionFound);
    }

    let mut rendered = serde_json::to_string_pretty(&conf).map_err(|err| SyncError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    rendered.push('\n');

    fs::write(path, rendered).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(StepOutcome::Updated)
}

fn refresh_lock(
    runner: &dyn CommandRunner,
    lock_command: &[String],
    cwd: &Path,
) -> Result<(), SyncError> {
    let (program, args) = lock_command
        .split_first()
        .ok_or(SyncError::EmptyLockCommand)?;

    let output = runner.run(program, args, cwd)?;
    if output.success() {
        Ok(())
    } else {
        Err(SyncError::LockRefreshFailed {
            command: lock_command.join(" "),
            code: output.code,
            stderr: output.stderr,
        })
    }
}
