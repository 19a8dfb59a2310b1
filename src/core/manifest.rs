//! core::manifest
//!
//! The JSON package manifest every app carries.
//!
//! # Design
//!
//! Only the fields stevedore cares about are modeled; everything else in
//! `package.json` passes through untouched because the manifest is never
//! written back, only read. The version is kept as opaque text - it is
//! copied verbatim between files, never interpreted as semver.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors from manifest reads.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no version field in '{path}'")]
    MissingVersion { path: PathBuf },
}

/// The subset of a `package.json` stevedore reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    /// Package name, informational only.
    pub name: Option<String>,
    /// Version text, copied verbatim where needed.
    pub version: Option<String>,
}

impl PackageManifest {
    /// Read and parse a package manifest from disk.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|err| ManifestError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// The version field, or a typed error naming the manifest that lacks it.
    pub fn require_version(&self, path: &Path) -> Result<&str, ManifestError> {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ManifestError::MissingVersion {
                path: path.to_path_buf(),
            })
    }
}
