//! gate command - Decide whether the current commit is a release commit

use anyhow::{Context as _, Result};

use crate::cli::commands::{detect, start_dir};
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::release::{classify, ReleaseDecision};
use crate::git::Git;
use crate::ui::output;

/// Gate the deploy pipeline on the current commit being a release commit.
///
/// Not being a release commit is a normal outcome: the command emits
/// `is_release=false` with an empty set and exits zero. Only an unreadable
/// repository history is an error.
pub fn gate(ctx: &Context) -> Result<()> {
    let start = start_dir(ctx)?;
    let git = Git::open(&start).context("Failed to open repository")?;
    let config = Config::load(git.work_dir()).context("Failed to load configuration")?;

    // Reading HEAD's own message must work; a merge commit's second parent
    // legitimately may not exist (squash merge, direct push).
    let head_summary = git
        .summary("HEAD")
        .context("Failed to read HEAD commit message")?;
    let merge_parent_summary = git
        .second_parent_summary("HEAD")
        .context("Failed to read HEAD commit")?;

    let decision = classify(
        merge_parent_summary.as_deref(),
        &head_summary,
        &config.release_marker,
    );

    match decision {
        ReleaseDecision::NotRelease => {
            output::print("🚫 Not a release commit. Skipping.", ctx.verbosity);
            ctx.ci
                .set("is_release", "false")
                .and_then(|_| ctx.ci.set("released", "[]"))
                .context("Failed to write CI output")?;
            Ok(())
        }
        ReleaseDecision::Release(source) => {
            output::print(
                format!("✅ Detected release message in {}", source.describe()),
                ctx.verbosity,
            );
            ctx.ci
                .set("is_release", "true")
                .context("Failed to write CI output")?;

            // Diff against the previous state of the default branch.
            detect::emit_released(ctx, &git, &config, "HEAD~1", "HEAD")
        }
    }
}
