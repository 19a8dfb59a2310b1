//! core::config
//!
//! Repository configuration.
//!
//! # Overview
//!
//! Stevedore works out of the box for the standard monorepo layout; a
//! `stevedore.toml` at the repository root overrides the defaults when a
//! repo deviates. Precedence, later wins:
//!
//! 1. Built-in defaults
//! 2. `stevedore.toml`
//! 3. CLI flags (handled in the command layer, not here)
//!
//! # Example
//!
//! ```toml
//! apps_root = "services"
//! release_marker = "chore(release):"
//! base = "origin/develop"
//! anchor = "api"
//! lock_command = ["cargo", "generate-lockfile"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::release::DEFAULT_RELEASE_MARKER;

/// The config file name, looked up at the repository work-dir root.
pub const CONFIG_FILE: &str = "stevedore.toml";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/// Resolved repository configuration.
///
/// Every field carries a default; a missing config file yields
/// `Config::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory under the repo root that holds the apps.
    #[serde(default = "default_apps_root")]
    pub apps_root: String,

    /// Commit-message prefix that marks a release commit.
    #[serde(default = "default_release_marker")]
    pub release_marker: String,

    /// Default base ref for `stv preview`.
    #[serde(default = "default_base")]
    pub base: String,

    /// The app every other app waits for in the preview table.
    #[serde(default = "default_anchor")]
    pub anchor: String,

    /// Command that refreshes the packaging toolchain's lock file.
    #[serde(default = "default_lock_command")]
    pub lock_command: Vec<String>,
}

fn default_apps_root() -> String {
    "apps".to_string()
}

fn default_release_marker() -> String {
    DEFAULT_RELEASE_MARKER.to_string()
}

fn default_base() -> String {
    "origin/main".to_string()
}

fn default_anchor() -> String {
    "backend".to_string()
}

fn default_lock_command() -> Vec<String> {
    vec!["cargo".to_string(), "check".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apps_root: default_apps_root(),
            release_marker: default_release_marker(),
            base: default_base(),
            anchor: default_anchor(),
            lock_command: default_lock_command(),
        }
    }
}

impl Config {
    /// Load configuration for the repository rooted at `workdir`.
    ///
    /// A missing `stevedore.toml` is the common case and yields defaults;
    /// an unreadable or malformed file is an error (a repo that carries a
    /// config wants it honored, not silently ignored).
    pub fn load(workdir: &Path) -> Result<Self, ConfigError> {
        let path = workdir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path,
            message: err.to_string(),
        })
    }
}
