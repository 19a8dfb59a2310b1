//! preview command - Render a release preview table for the current branch

use anyhow::{anyhow, Context as _, Result};

use crate::cli::commands::start_dir;
use crate::cli::Context;
use crate::core::changes::changed_apps;
use crate::core::config::Config;
use crate::core::manifest::PackageManifest;
use crate::core::paths::{list_apps, AppPaths};
use crate::core::types::AppName;
use crate::git::Git;
use crate::ui::output;
use crate::ui::preview::{render_preview, waits_for, PreviewRow, VersionCell};

/// Render the release preview for the current branch against `base`.
///
/// On CI the markdown lands in the `comment` output for posting as a PR
/// comment; locally it goes to stdout.
pub fn preview(ctx: &Context, base: Option<&str>) -> Result<()> {
    let start = start_dir(ctx)?;
    let git = Git::open(&start).context("Failed to open repository")?;
    let config = Config::load(git.work_dir()).context("Failed to load configuration")?;

    let base = base.unwrap_or(&config.base);
    let anchor = AppName::new(&config.anchor)
        .map_err(|err| anyhow!("invalid anchor in configuration: {err}"))?;

    // The full candidate set comes from the filesystem, not the diff: the
    // table shows unchanged apps too.
    let all_apps = list_apps(git.work_dir(), &config.apps_root)
        .with_context(|| format!("Failed to list apps under '{}'", config.apps_root))?;

    let changed_paths = git
        .changed_paths_since(base, "HEAD")
        .with_context(|| format!("Failed to diff HEAD against {base}"))?;
    let changed = changed_apps(changed_paths, &config.apps_root);

    let rows: Vec<PreviewRow> = all_apps
        .iter()
        .map(|app| {
            let is_changed = changed.contains(app);
            let version = if is_changed {
                read_version_cell(ctx, &git, &config, app)
            } else {
                VersionCell::NotDeploying
            };

            PreviewRow {
                app: app.clone(),
                changed: is_changed,
                version,
                waits_for: waits_for(app, &anchor),
            }
        })
        .collect();

    let markdown = render_preview(&rows);

    if ctx.ci.is_connected() {
        ctx.ci
            .set_multiline("comment", &markdown)
            .context("Failed to write CI output")?;
        output::print("📝 Preview comment written to CI output", ctx.verbosity);
    } else {
        // Local invocation: the markdown itself is the result.
        println!("{markdown}");
    }

    Ok(())
}

/// Read an app's version for display; failures degrade to a marker cell.
fn read_version_cell(ctx: &Context, git: &Git, config: &Config, app: &AppName) -> VersionCell {
    let manifest_path = AppPaths::new(git.work_dir(), &config.apps_root, app).package_json();

    match PackageManifest::read(&manifest_path) {
        Ok(manifest) => match manifest.version {
            Some(version) if !version.is_empty() => VersionCell::Version(version),
            _ => {
                output::warn(format!("no version field for {app}"), ctx.verbosity);
                VersionCell::Unreadable
            }
        },
        Err(err) => {
            output::warn(format!("cannot read version for {app}: {err}"), ctx.verbosity);
            VersionCell::Unreadable
        }
    }
}
