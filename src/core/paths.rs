//! core::paths
//!
//! Centralized path routing for app locations.
//!
//! # Architecture
//!
//! Every file stevedore reads or writes for an app is computed here. No
//! code elsewhere may join path fragments like `apps/<name>/...` by hand;
//! the sync command in particular depends on the lock-refresh subprocess
//! running in exactly the directory whose manifest was rewritten.
//!
//! # Layout
//!
//! For an app `<name>` under the applications root:
//! - `<root>/<name>/package.json` - primary manifest (source of truth)
//! - `<root>/<name>/src-tauri/Cargo.toml` - packaging crate manifest
//! - `<root>/<name>/src-tauri/tauri.conf.json` - packaging toolchain config
//! - `<root>/<name>/src-tauri/` - cwd for the lock refresh
//!
//! # Example
//!
//! ```
//! use stevedore::core::paths::AppPaths;
//! use stevedore::core::types::AppName;
//! use std::path::{Path, PathBuf};
//!
//! let app = AppName::new("cloudprint").unwrap();
//! let paths = AppPaths::new(Path::new("/repo"), "apps", &app);
//!
//! assert_eq!(
//!     paths.package_json(),
//!     PathBuf::from("/repo/apps/cloudprint/package.json")
//! );
//! assert_eq!(
//!     paths.tauri_root(),
//!     PathBuf::from("/repo/apps/cloudprint/src-tauri")
//! );
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::changes::MANIFEST_FILE;
use crate::core::types::AppName;

/// The packaging toolchain directory inside each app.
const TAURI_DIR: &str = "src-tauri";

/// Path routing for a single app's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// The app's directory: `<workdir>/<apps_root>/<name>`.
    app_dir: PathBuf,
}

impl AppPaths {
    /// Compute paths for `app` under `workdir/<apps_root>`.
    pub fn new(workdir: &Path, apps_root: &str, app: &AppName) -> Self {
        Self {
            app_dir: workdir.join(apps_root).join(app.as_str()),
        }
    }

    /// The app directory itself.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// The primary manifest: `package.json`.
    pub fn package_json(&self) -> PathBuf {
        self.app_dir.join(MANIFEST_FILE)
    }

    /// The packaging crate manifest: `src-tauri/Cargo.toml`.
    pub fn tauri_cargo_toml(&self) -> PathBuf {
        self.app_dir.join(TAURI_DIR).join("Cargo.toml")
    }

    /// The packaging toolchain config: `src-tauri/tauri.conf.json`.
    pub fn tauri_conf(&self) -> PathBuf {
        self.app_dir.join(TAURI_DIR).join("tauri.conf.json")
    }

    /// The directory the lock refresh must run in.
    pub fn tauri_root(&self) -> PathBuf {
        self.app_dir.join(TAURI_DIR)
    }
}

/// Enumerate all apps: the subdirectories of `<workdir>/<apps_root>`,
/// sorted lexicographically.
///
/// Entries that are not directories are skipped; so are directories whose
/// names fail [`AppName`] validation (hidden directories in particular).
pub fn list_apps(workdir: &Path, apps_root: &str) -> io::Result<Vec<AppName>> {
    let root = workdir.join(apps_root);
    let mut apps = Vec::new();

    for entry in fs::read_dir(&root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if let Some(name) = name.to_str() {
            if let Ok(app) = AppName::new(name) {
                apps.push(app);
            }
        }
    }

    apps.sort();
    Ok(apps)
}
