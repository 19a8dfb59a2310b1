//! sync command - Propagate an app's package version into its packaging manifests

use anyhow::{anyhow, Context as _, Result};

use crate::cli::commands::start_dir;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::paths::AppPaths;
use crate::core::types::AppName;
use crate::exec::SystemRunner;
use crate::git::Git;
use crate::sync::{sync_app, StepOutcome};
use crate::ui::output;

/// Propagate `app`'s package version and refresh the dependency lock.
pub fn sync(ctx: &Context, app: &str) -> Result<()> {
    let start = start_dir(ctx)?;
    let git = Git::open(&start).context("Failed to open repository")?;
    let config = Config::load(git.work_dir()).context("Failed to load configuration")?;

    let app = AppName::new(app).map_err(|err| anyhow!("{err}"))?;
    let paths = AppPaths::new(git.work_dir(), &config.apps_root, &app);

    output::print(format!("🔄 Syncing version for {app}..."), ctx.verbosity);

    let report = sync_app(&paths, &SystemRunner, &config.lock_command)?;

    output::print(format!("📍 New version: {}", report.version), ctx.verbosity);

    report_step(ctx, "Cargo.toml", &report.cargo_toml);
    // An absent tauri.conf.json is ordinary (nothing packaged for this
    // app); only an unrecognized one deserves a warning.
    match &report.tauri_conf {
        StepOutcome::FileAbsent => {
            output::debug("no tauri.conf.json present, skipping", ctx.verbosity);
        }
        outcome => report_step(ctx, "tauri.conf.json", outcome),
    }

    output::print(
        format!("✅ Lock file refreshed in {}", paths.tauri_root().display()),
        ctx.verbosity,
    );
    output::print("✨ Sync complete.", ctx.verbosity);

    Ok(())
}

fn report_step(ctx: &Context, file: &str, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Updated => {
            output::print(format!("✅ Updated {file}"), ctx.verbosity);
        }
        StepOutcome::FileAbsent => {
            output::warn(format!("no {file} present, skipping"), ctx.verbosity);
        }
        StepOutcome::NoVersionFound => {
            output::warn(
                format!("could not find a version in {file}, skipping"),
                ctx.verbosity,
            );
        }
    }
}
