//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! that the Git interface works correctly with actual git operations.
//! The git CLI is used for fixture building only; the code under test
//! goes through git2.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use stevedore::git::{Git, GitError};

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit on `main`.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-b", "main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        std::fs::write(dir.path().join("README.md"), "# Test Repo\n").unwrap();
        run_git(dir.path(), &["add", "README.md"]);
        run_git(dir.path(), &["commit", "-m", "Initial commit"]);

        Self { dir }
    }

    /// Get the path to the repository.
    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a Git interface to this repository.
    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Create a file (and its parent directories) and commit it.
    fn commit_file(&self, path: &str, content: &str, message: &str) {
        let full = self.dir.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, content).unwrap();
        run_git(self.path(), &["add", path]);
        run_git(self.path(), &["commit", "-m", message]);
    }

    /// Create and check out a branch.
    fn checkout_new(&self, name: &str) {
        run_git(self.path(), &["checkout", "-b", name]);
    }

    /// Check out an existing branch.
    fn checkout(&self, name: &str) {
        run_git(self.path(), &["checkout", name]);
    }

    /// Merge a branch with a merge commit.
    fn merge_no_ff(&self, branch: &str, message: &str) {
        run_git(self.path(), &["merge", "--no-ff", branch, "-m", message]);
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

// =============================================================
// Opening
// =============================================================

#[test]
fn open_discovers_repo_from_subdirectory() {
    let repo = TestRepo::new();
    let sub = repo.path().join("apps/backend");
    std::fs::create_dir_all(&sub).unwrap();

    let git = Git::open(&sub).unwrap();
    assert_eq!(
        git.work_dir().canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
}

#[test]
fn open_fails_outside_a_repository() {
    let dir = TempDir::new().unwrap();
    let err = Git::open(dir.path()).unwrap_err();
    assert!(matches!(err, GitError::NotARepo { .. }));
}

// =============================================================
// Commit queries
// =============================================================

#[test]
fn summary_returns_first_message_line() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a", "feat: add a\n\nLonger body text.");

    let summary = repo.git().summary("HEAD").unwrap();
    assert_eq!(summary, "feat: add a");
}

#[test]
fn summary_of_unresolvable_rev_is_an_error() {
    let repo = TestRepo::new();
    let err = repo.git().summary("no-such-branch").unwrap_err();
    assert!(matches!(err, GitError::RevNotFound { .. }));
}

#[test]
fn second_parent_summary_is_none_for_non_merge_commits() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a", "feat: add a");

    assert_eq!(repo.git().second_parent_summary("HEAD").unwrap(), None);
}

#[test]
fn second_parent_summary_reads_the_merged_branch_tip() {
    let repo = TestRepo::new();
    repo.checkout_new("release");
    repo.commit_file("apps/backend/package.json", "{}", "chore: release versions");
    repo.checkout("main");
    repo.merge_no_ff("release", "Merge pull request #1 from repo/release");

    let git = repo.git();
    assert_eq!(git.parent_count("HEAD").unwrap(), 2);
    assert_eq!(
        git.second_parent_summary("HEAD").unwrap().as_deref(),
        Some("chore: release versions")
    );
    // HEAD's own summary is the merge commit message.
    assert_eq!(
        git.summary("HEAD").unwrap(),
        "Merge pull request #1 from repo/release"
    );
}

// =============================================================
// Changed paths, two-point
// =============================================================

#[test]
fn changed_paths_lists_files_touched_between_two_commits() {
    let repo = TestRepo::new();
    repo.commit_file("apps/backend/package.json", "{\"version\": \"1.0.0\"}", "bump");

    let paths = repo.git().changed_paths("HEAD~1", "HEAD").unwrap();
    assert_eq!(paths, vec!["apps/backend/package.json".to_string()]);
}

#[test]
fn changed_paths_of_identical_revs_is_empty() {
    let repo = TestRepo::new();
    let paths = repo.git().changed_paths("HEAD", "HEAD").unwrap();
    assert!(paths.is_empty());
}

#[test]
fn changed_paths_includes_deletions() {
    let repo = TestRepo::new();
    repo.commit_file("apps/old/package.json", "{}", "add old app");
    run_git(repo.path(), &["rm", "apps/old/package.json"]);
    run_git(repo.path(), &["commit", "-m", "remove old app"]);

    let paths = repo.git().changed_paths("HEAD~1", "HEAD").unwrap();
    assert_eq!(paths, vec!["apps/old/package.json".to_string()]);
}

#[test]
fn changed_paths_with_unresolvable_rev_is_an_error() {
    let repo = TestRepo::new();
    // The usual CI failure mode: HEAD~1 on a single-commit (shallow) history.
    let err = repo.git().changed_paths("HEAD~1", "HEAD").unwrap_err();
    assert!(matches!(err, GitError::RevNotFound { .. }));
}

// =============================================================
// Changed paths, merge-base ranged
// =============================================================

#[test]
fn changed_paths_since_uses_the_merge_base() {
    let repo = TestRepo::new();

    // Branch off, then let main move on.
    repo.checkout_new("feature");
    repo.commit_file("apps/cloudprint/package.json", "{\"version\": \"2.0.1\"}", "bump cloudprint");
    repo.checkout("main");
    repo.commit_file("apps/backend/package.json", "{\"version\": \"9.0.0\"}", "bump backend on main");
    repo.checkout("feature");

    let paths = repo.git().changed_paths_since("main", "HEAD").unwrap();

    // Only the branch's own changes; main's concurrent bump is invisible.
    assert_eq!(paths, vec!["apps/cloudprint/package.json".to_string()]);
}

#[test]
fn changed_paths_since_is_empty_for_an_unchanged_branch() {
    let repo = TestRepo::new();
    repo.checkout_new("feature");

    let paths = repo.git().changed_paths_since("main", "HEAD").unwrap();
    assert!(paths.is_empty());
}
