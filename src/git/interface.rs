//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the single doorway to all Git operations in stevedore.
//! No other module imports `git2`. The interface is read-only: stevedore
//! never mutates the repository, it only asks what changed and what the
//! relevant commit messages say.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Revision resolution (`HEAD`, `HEAD~1`, `origin/main`, ...)
//! - Commit message summaries and parent inspection
//! - Changed-path queries between two revisions, two-point or merge-base
//!   ranged
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants so callers can tell an
//! unresolvable revision (usually a misspelled ref or a shallow CI clone)
//! from everything else.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// A revision could not be resolved to a commit.
    ///
    /// On CI this usually means a shallow clone is missing history
    /// (`HEAD~1` on a depth-1 checkout) or a remote ref was never fetched.
    #[error("cannot resolve revision '{rev}'")]
    RevNotFound {
        /// The revision that failed to resolve
        rev: String,
    },

    /// Two revisions share no common ancestor.
    #[error("no merge base between '{base}' and '{head}'")]
    NoMergeBase {
        /// The base revision
        base: String,
        /// The head revision
        head: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error, mapping not-found onto the
    /// revision that was being resolved.
    fn from_git2(err: git2::Error, rev: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RevNotFound {
                rev: rev.to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// The Git interface.
///
/// Wraps a discovered repository and exposes the handful of read-only
/// queries stevedore needs. All revision parameters accept anything
/// `git rev-parse` would (`HEAD`, `HEAD~1`, `origin/main`, an OID, ...).
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// The working directory root
    work_dir: PathBuf,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        let work_dir = repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();

        Ok(Self { repo, work_dir })
    }

    /// The repository's working directory root.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    // =========================================================================
    // Commit Queries
    // =========================================================================

    /// Resolve a revision to its commit.
    fn resolve_commit(&self, rev: &str) -> Result<git2::Commit<'_>, GitError> {
        let object = self
            .repo
            .revparse_single(rev)
            .map_err(|e| GitError::from_git2(e, rev))?;

        object
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, rev))
    }

    /// The summary (first message line) of the commit `rev` resolves to.
    pub fn summary(&self, rev: &str) -> Result<String, GitError> {
        let commit = self.resolve_commit(rev)?;
        Ok(commit.summary().unwrap_or("").to_string())
    }

    /// The number of parents of the commit `rev` resolves to.
    pub fn parent_count(&self, rev: &str) -> Result<usize, GitError> {
        let commit = self.resolve_commit(rev)?;
        Ok(commit.parent_count())
    }

    /// The summary of the second parent, if `rev` is a merge commit.
    ///
    /// Returns `Ok(None)` for non-merge commits - an expected condition,
    /// not an error. Only an unresolvable `rev` itself fails.
    pub fn second_parent_summary(&self, rev: &str) -> Result<Option<String>, GitError> {
        let commit = self.resolve_commit(rev)?;
        if commit.parent_count() < 2 {
            return Ok(None);
        }

        let parent = commit.parent(1)?;
        Ok(Some(parent.summary().unwrap_or("").to_string()))
    }

    // =========================================================================
    // Changed-Path Queries
    // =========================================================================

    /// Paths that differ between two revisions (two-point diff).
    ///
    /// Equivalent to `git diff --name-only <from> <to>`: one path per
    /// delta, using the new-side path (old-side for deletions).
    pub fn changed_paths(&self, from: &str, to: &str) -> Result<Vec<String>, GitError> {
        let from_tree = self.resolve_commit(from)?.tree()?;
        let to_tree = self.resolve_commit(to)?.tree()?;
        self.diff_paths(&from_tree, &to_tree)
    }

    /// Paths changed on `head` since it diverged from `base`.
    ///
    /// Range semantics (`base...head`): the diff runs from the merge base
    /// of the two revisions to `head`, so changes that happened on `base`
    /// in the meantime do not show up.
    pub fn changed_paths_since(&self, base: &str, head: &str) -> Result<Vec<String>, GitError> {
        let base_commit = self.resolve_commit(base)?;
        let head_commit = self.resolve_commit(head)?;

        let merge_base = self
            .repo
            .merge_base(base_commit.id(), head_commit.id())
            .map_err(|err| match err.code() {
                git2::ErrorCode::NotFound => GitError::NoMergeBase {
                    base: base.to_string(),
                    head: head.to_string(),
                },
                _ => err.into(),
            })?;

        let merge_base_tree = self.repo.find_commit(merge_base)?.tree()?;
        let head_tree = head_commit.tree()?;
        self.diff_paths(&merge_base_tree, &head_tree)
    }

    /// Collect one path per delta from a tree-to-tree diff.
    fn diff_paths(
        &self,
        old_tree: &git2::Tree<'_>,
        new_tree: &git2::Tree<'_>,
    ) -> Result<Vec<String>, GitError> {
        let diff = self
            .repo
            .diff_tree_to_tree(Some(old_tree), Some(new_tree), None)?;

        let mut paths = Vec::new();
        for delta in diff.deltas() {
            let path = delta.new_file().path().or_else(|| delta.old_file().path());
            if let Some(path) = path {
                paths.push(path.to_string_lossy().into_owned());
            }
        }

        Ok(paths)
    }
}
