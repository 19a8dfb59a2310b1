//! core::release
//!
//! Release-commit classification.
//!
//! # Design
//!
//! A commit is a release commit when the automated version-bump PR lands:
//! its commit message starts with a fixed marker. Two merge styles reach
//! the default branch:
//!
//! - **Merge commit**: the marker sits on the merged branch's tip, i.e. the
//!   second parent of `HEAD`. The second parent's summary alone decides.
//! - **Squash merge / direct push**: `HEAD` has a single parent and carries
//!   the marker itself.
//!
//! Whether a merge parent exists is an explicit input here (the caller
//! checks the parent count), so "not a merge commit" never masquerades as
//! a failed history read.

/// The default commit-message marker for release commits.
pub const DEFAULT_RELEASE_MARKER: &str = "chore: release versions";

/// Where the deciding commit message was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    /// The second parent of a merge commit.
    MergeParent,
    /// The current commit itself.
    Head,
}

impl MessageSource {
    /// Human-readable description for status output.
    pub fn describe(&self) -> &'static str {
        match self {
            MessageSource::MergeParent => "merge parent (HEAD^2)",
            MessageSource::Head => "HEAD",
        }
    }
}

/// Terminal outcome of the release gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// The commit is a release commit; deploys should proceed.
    Release(MessageSource),
    /// Not a release commit; a normal outcome, not a failure.
    NotRelease,
}

impl ReleaseDecision {
    /// Whether this decision is a release.
    pub fn is_release(&self) -> bool {
        matches!(self, ReleaseDecision::Release(_))
    }
}

/// Classify a commit from its message summaries.
///
/// `merge_parent_summary` is the first line of the second parent's message
/// when the commit is a two-parent merge, `None` otherwise. When present it
/// decides alone; the fallback to `head_summary` applies only to non-merge
/// commits.
pub fn classify(
    merge_parent_summary: Option<&str>,
    head_summary: &str,
    marker: &str,
) -> ReleaseDecision {
    match merge_parent_summary {
        Some(summary) => {
            if summary.trim().starts_with(marker) {
                ReleaseDecision::Release(MessageSource::MergeParent)
            } else {
                ReleaseDecision::NotRelease
            }
        }
        None => {
            if head_summary.trim().starts_with(marker) {
                ReleaseDecision::Release(MessageSource::Head)
            } else {
                ReleaseDecision::NotRelease
            }
        }
    }
}
