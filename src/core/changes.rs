//! core::changes
//!
//! Changed-set extraction from diff path lists.
//!
//! # Design
//!
//! This module contains only pure functions: they take the path list a diff
//! produced and return the set of apps whose package manifest is in it. No
//! Git access happens here; callers obtain the path list through
//! [`crate::git::Git`] and pass it in.
//!
//! A path counts only if it is exactly `<apps_root>/<name>/<manifest>` -
//! three components, nothing nested. A manifest buried deeper
//! (`apps/x/vendor/package.json`) belongs to a vendored dependency, not to
//! the app itself.

use std::collections::BTreeSet;

use crate::core::types::AppName;

/// The package manifest file every app carries.
pub const MANIFEST_FILE: &str = "package.json";

/// Extract the set of apps whose package manifest appears in `paths`.
///
/// Paths are matched component-exact against
/// `<apps_root>/<name>/package.json`. Duplicates collapse; the result is
/// sorted by app name. Paths that match the shape but carry an invalid
/// `<name>` are skipped.
///
/// # Example
///
/// ```
/// use stevedore::core::changes::changed_apps;
///
/// let paths = vec![
///     "apps/cloudprint/package.json".to_string(),
///     "apps/cloudprint/src/main.ts".to_string(),
///     "apps/backend/package.json".to_string(),
/// ];
/// let apps = changed_apps(paths, "apps");
/// let names: Vec<&str> = apps.iter().map(|a| a.as_str()).collect();
/// assert_eq!(names, vec!["backend", "cloudprint"]);
/// ```
pub fn changed_apps(
    paths: impl IntoIterator<Item = String>,
    apps_root: &str,
) -> BTreeSet<AppName> {
    paths
        .into_iter()
        .filter_map(|path| app_for_manifest_path(&path, apps_root))
        .collect()
}

/// Extract the app name from a single path, if it is an app manifest path.
fn app_for_manifest_path(path: &str, apps_root: &str) -> Option<AppName> {
    let mut components = path.split('/');

    if components.next()? != apps_root {
        return None;
    }
    let name = components.next()?;
    if components.next()? != MANIFEST_FILE {
        return None;
    }
    if components.next().is_some() {
        return None;
    }

    AppName::new(name).ok()
}

/// Serialize a changed set as a JSON array of app names.
///
/// The output is deterministic (sorted) and `[]` for an empty set.
pub fn to_json(apps: &BTreeSet<AppName>) -> String {
    // BTreeSet<AppName> serializes as a sorted array of strings.
    serde_json::to_string(apps).unwrap_or_else(|_| "[]".to_string())
}
