//! detect command - Detect apps whose version was bumped between two commits

use anyhow::{Context as _, Result};

use crate::cli::commands::start_dir;
use crate::cli::Context;
use crate::core::changes::{self, changed_apps};
use crate::core::config::Config;
use crate::git::Git;
use crate::ui::output;

/// Detect released apps between two revisions and emit the set.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `from` - Older revision (typically `HEAD~1`)
/// * `to` - Newer revision (typically `HEAD`)
pub fn detect(ctx: &Context, from: &str, to: &str) -> Result<()> {
    let start = start_dir(ctx)?;
    let git = Git::open(&start).context("Failed to open repository")?;
    let config = Config::load(git.work_dir()).context("Failed to load configuration")?;

    emit_released(ctx, &git, &config, from, to)
}

/// Shared core of `detect` and the release gate's RELEASE branch: diff,
/// filter, emit the `released` output.
pub(super) fn emit_released(
    ctx: &Context,
    git: &Git,
    config: &Config,
    from: &str,
    to: &str,
) -> Result<()> {
    let paths = git
        .changed_paths(from, to)
        .with_context(|| format!("Failed to diff {from} against {to}"))?;

    output::debug(
        format!("{} changed path(s) between {from} and {to}", paths.len()),
        ctx.verbosity,
    );

    let released = changed_apps(paths, &config.apps_root);
    let json = changes::to_json(&released);

    output::print(
        format!("🚀 Detected release bumps for: {json}"),
        ctx.verbosity,
    );
    ctx.ci
        .set("released", &json)
        .context("Failed to write CI output")?;

    Ok(())
}
