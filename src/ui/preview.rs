//! ui::preview
//!
//! Pure functions for generating the release preview table posted as a
//! pull-request comment.
//!
//! # Design
//!
//! This module contains only pure functions: they take the per-app facts
//! the command gathered and return formatted markdown. No Git or file
//! access happens here.
//!
//! # Example Output
//!
//! ```markdown
//! ### 🚀 Release Preview
//!
//! | App | Status | Version | Waits For |
//! | :--- | :--- | :--- | :--- |
//! | backend | ⚪ Skipped | – | - |
//! | **cloudprint** | 🟢 **Will Deploy** | `2.0.1` | backend |
//! | frachter | ⚪ Skipped | – | backend |
//! ```

use crate::core::types::AppName;

/// Header line of every preview comment.
const HEADER: &str = "### 🚀 Release Preview";

/// Message rendered instead of the table when nothing will deploy.
const NOTHING_TO_DEPLOY: &str = "No app version bumps detected. Nothing will deploy.";

/// The version cell of one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCell {
    /// The app deploys with this version.
    Version(String),
    /// The app deploys but its manifest version could not be read.
    Unreadable,
    /// The app does not deploy; no version is shown.
    NotDeploying,
}

impl VersionCell {
    fn render(&self) -> String {
        match self {
            VersionCell::Version(v) => format!("`{}`", v),
            VersionCell::Unreadable => "⚠️ unreadable".to_string(),
            VersionCell::NotDeploying => "–".to_string(),
        }
    }
}

/// One row of the preview table.
#[derive(Debug, Clone)]
pub struct PreviewRow {
    /// The app this row describes.
    pub app: AppName,
    /// Whether this PR bumps the app's version.
    pub changed: bool,
    /// Version display cell.
    pub version: VersionCell,
    /// The app this one waits for, `None` for the anchor itself.
    pub waits_for: Option<AppName>,
}

/// Deploy-ordering rule: every app waits for the anchor; the anchor waits
/// for nothing.
pub fn waits_for(app: &AppName, anchor: &AppName) -> Option<AppName> {
    if app == anchor {
        None
    } else {
        Some(anchor.clone())
    }
}

/// Render the preview comment.
///
/// With no changed row, the comment is a single "nothing to deploy" line;
/// otherwise a table with one row per app, changed or not.
pub fn render_preview(rows: &[PreviewRow]) -> String {
    let mut lines = vec![HEADER.to_string(), String::new()];

    if !rows.iter().any(|row| row.changed) {
        lines.push(NOTHING_TO_DEPLOY.to_string());
        return lines.join("\n");
    }

    lines.push("| App | Status | Version | Waits For |".to_string());
    lines.push("| :--- | :--- | :--- | :--- |".to_string());

    for row in rows {
        let name = if row.changed {
            format!("**{}**", row.app)
        } else {
            row.app.to_string()
        };
        let status = if row.changed {
            "🟢 **Will Deploy**"
        } else {
            "⚪ Skipped"
        };
        let waits = match &row.waits_for {
            Some(app) => app.to_string(),
            None => "-".to_string(),
        };

        lines.push(format!(
            "| {} | {} | {} | {} |",
            name,
            status,
            row.version.render(),
            waits
        ));
    }

    lines.join("\n")
}
