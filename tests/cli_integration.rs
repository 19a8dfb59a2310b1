//! End-to-end tests for the `stv` binary.
//!
//! Each test builds a real monorepo fixture in a tempdir, runs the binary
//! against it with `GITHUB_OUTPUT` pointed at a temp file (or removed, for
//! the local-invocation paths), and asserts on exit status, stdout, and
//! the CI output file.

use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Monorepo fixture: a git repository with an `apps/` root.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-b", "main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        std::fs::write(dir.path().join("README.md"), "# Monorepo\n").unwrap();
        run_git(dir.path(), &["add", "."]);
        run_git(dir.path(), &["commit", "-m", "Initial commit"]);

        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file without committing.
    fn write(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, content).unwrap();
    }

    /// Write an app's package manifest without committing.
    fn write_manifest(&self, app: &str, version: &str) {
        self.write(
            &format!("apps/{app}/package.json"),
            &format!("{{\"name\": \"{app}\", \"version\": \"{version}\"}}"),
        );
    }

    /// Stage everything and commit.
    fn commit_all(&self, message: &str) {
        run_git(self.path(), &["add", "."]);
        run_git(self.path(), &["commit", "-m", message]);
    }

    fn checkout_new(&self, name: &str) {
        run_git(self.path(), &["checkout", "-b", name]);
    }

    fn checkout(&self, name: &str) {
        run_git(self.path(), &["checkout", name]);
    }

    fn merge_no_ff(&self, branch: &str, message: &str) {
        run_git(self.path(), &["merge", "--no-ff", branch, "-m", message]);
    }

    /// A command for the binary, run inside the repo with a clean CI env.
    fn stv(&self) -> Command {
        let mut cmd = Command::cargo_bin("stv").unwrap();
        cmd.current_dir(self.path()).env_remove("GITHUB_OUTPUT");
        cmd
    }

    /// Path for a fresh CI output file (not created yet).
    fn output_file(&self) -> PathBuf {
        self.path().join("github_output.txt")
    }

    fn read_output_file(&self) -> String {
        std::fs::read_to_string(self.output_file()).unwrap_or_default()
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = ProcessCommand::new("git")
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
// detect
// =============================================================

#[test]
fn detect_emits_bumped_apps_as_json() {
    let repo = TestRepo::new();
    repo.write_manifest("cloudprint", "2.0.0");
    repo.write_manifest("backend", "1.0.0");
    repo.commit_all("chore: release versions");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["backend","cloudprint"]"#));

    assert!(repo
        .read_output_file()
        .contains(r#"released=["backend","cloudprint"]"#));
}

#[test]
fn detect_ignores_non_manifest_changes() {
    let repo = TestRepo::new();
    repo.write("apps/cloudprint/src/main.ts", "console.log(1);\n");
    repo.write("docs/notes.md", "notes\n");
    repo.commit_all("feat: code only");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .arg("detect")
        .assert()
        .success();

    assert!(repo.read_output_file().contains("released=[]"));
}

#[test]
fn detect_accepts_explicit_revisions() {
    let repo = TestRepo::new();
    repo.write_manifest("frachter", "0.5.0");
    repo.commit_all("bump frachter");
    repo.write("README.md", "# changed\n");
    repo.commit_all("docs");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .args(["detect", "--from", "HEAD~2", "--to", "HEAD~1"])
        .assert()
        .success();

    assert!(repo.read_output_file().contains(r#"released=["frachter"]"#));
}

#[test]
fn detect_without_ci_env_still_succeeds() {
    let repo = TestRepo::new();
    repo.write_manifest("backend", "1.0.1");
    repo.commit_all("bump backend");

    repo.stv()
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["backend"]"#));
}

#[test]
fn detect_fails_on_missing_history() {
    // Single commit: HEAD~1 does not exist (the shallow-clone failure mode).
    let repo = TestRepo::new();

    repo.stv()
        .arg("detect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD~1"));
}

#[test]
fn detect_fails_outside_a_repository() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("stv")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("GITHUB_OUTPUT")
        .arg("detect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

// =============================================================
// gate
// =============================================================

#[test]
fn gate_passes_release_commits_and_emits_the_changed_set() {
    let repo = TestRepo::new();
    repo.write_manifest("cloudprint", "2.0.1");
    repo.commit_all("chore: release versions v2.0.1");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .arg("gate")
        .assert()
        .success();

    let output = repo.read_output_file();
    assert!(output.contains("is_release=true"));
    assert!(output.contains(r#"released=["cloudprint"]"#));
}

#[test]
fn gate_rejects_ordinary_commits_with_a_zero_exit() {
    let repo = TestRepo::new();
    repo.write("apps/cloudprint/src/fix.ts", "fixed\n");
    repo.commit_all("fix: bug");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .arg("gate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a release commit"));

    let output = repo.read_output_file();
    assert!(output.contains("is_release=false"));
    assert!(output.contains("released=[]"));
}

#[test]
fn gate_reads_the_merged_branch_tip_for_merge_commits() {
    let repo = TestRepo::new();
    repo.checkout_new("release-pr");
    repo.write_manifest("backend", "3.0.0");
    repo.commit_all("chore: release versions v3.0.0");
    repo.checkout("main");
    repo.merge_no_ff("release-pr", "Merge pull request #7 from repo/release-pr");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .arg("gate")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge parent"));

    let output = repo.read_output_file();
    assert!(output.contains("is_release=true"));
    assert!(output.contains(r#"released=["backend"]"#));
}

#[test]
fn gate_treats_non_release_merges_as_not_release() {
    let repo = TestRepo::new();
    repo.checkout_new("feature");
    repo.write("apps/backend/src/api.ts", "export {};\n");
    repo.commit_all("feat: api work");
    repo.checkout("main");
    repo.merge_no_ff("feature", "Merge pull request #8 from repo/feature");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .arg("gate")
        .assert()
        .success();

    assert!(repo.read_output_file().contains("is_release=false"));
}

// =============================================================
// preview
// =============================================================

/// The standard three-app fixture on a feature branch that bumps only
/// cloudprint.
fn preview_fixture() -> TestRepo {
    let repo = TestRepo::new();
    repo.write_manifest("backend", "1.0.0");
    repo.write_manifest("cloudprint", "1.9.9");
    repo.write_manifest("frachter", "0.4.2");
    repo.commit_all("chore: scaffold apps");

    repo.checkout_new("bump-cloudprint");
    repo.write_manifest("cloudprint", "2.0.1");
    repo.commit_all("chore: bump cloudprint");
    repo
}

#[test]
fn preview_prints_the_table_locally() {
    let repo = preview_fixture();

    repo.stv()
        .args(["preview", "--base", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 🚀 Release Preview"))
        .stdout(predicate::str::contains(
            "| **cloudprint** | 🟢 **Will Deploy** | `2.0.1` | backend |",
        ))
        .stdout(predicate::str::contains("| backend | ⚪ Skipped | – | - |"))
        .stdout(predicate::str::contains(
            "| frachter | ⚪ Skipped | – | backend |",
        ));
}

#[test]
fn preview_writes_a_heredoc_comment_on_ci() {
    let repo = preview_fixture();

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .args(["preview", "--base", "main"])
        .assert()
        .success();

    let output = repo.read_output_file();
    let first_line = output.lines().next().unwrap();
    let delimiter = first_line
        .strip_prefix("comment<<")
        .expect("expected a comment heredoc block");
    assert!(delimiter.starts_with("EOF-"));

    // The block is closed by the same delimiter.
    let closing = format!("\n{delimiter}\n");
    assert!(output.ends_with(&closing));
    assert!(output.contains("**cloudprint**"));
}

#[test]
fn preview_reports_nothing_to_deploy_for_an_unchanged_branch() {
    let repo = TestRepo::new();
    repo.write_manifest("backend", "1.0.0");
    repo.commit_all("chore: scaffold apps");
    repo.checkout_new("docs-only");
    repo.write("docs/guide.md", "guide\n");
    repo.commit_all("docs: guide");

    repo.stv()
        .args(["preview", "--base", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No app version bumps detected. Nothing will deploy.",
        ));
}

#[test]
fn preview_degrades_gracefully_when_a_manifest_is_unreadable() {
    let repo = preview_fixture();
    // Corrupt the bumped app's manifest in the working tree.
    repo.write("apps/cloudprint/package.json", "{broken");

    repo.stv()
        .args(["preview", "--base", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠️ unreadable"));
}

// =============================================================
// sync
// =============================================================

const FIXTURE_CARGO_TOML: &str = r#"[package]
name = "cloudprint"
version = "1.9.9"
edition = "2021"

[dependencies]
tauri = { version = "2", features = [] }
"#;

/// Sync fixture with a harmless lock command.
fn sync_fixture(tauri_conf: &str) -> TestRepo {
    let repo = TestRepo::new();
    repo.write_manifest("cloudprint", "2.0.1");
    repo.write("apps/cloudprint/src-tauri/Cargo.toml", FIXTURE_CARGO_TOML);
    repo.write("apps/cloudprint/src-tauri/tauri.conf.json", tauri_conf);
    // A no-op lock command keeps the test hermetic.
    repo.write("stevedore.toml", "lock_command = [\"true\"]\n");
    repo.commit_all("chore: scaffold cloudprint");
    repo
}

#[test]
fn sync_propagates_the_version_into_both_manifests() {
    let repo = sync_fixture(r#"{"version": "1.9.9", "identifier": "io.cloudprint"}"#);

    repo.stv()
        .args(["sync", "cloudprint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("📍 New version: 2.0.1"))
        .stdout(predicate::str::contains("✨ Sync complete."));

    let cargo =
        std::fs::read_to_string(repo.path().join("apps/cloudprint/src-tauri/Cargo.toml")).unwrap();
    assert!(cargo.contains("version = \"2.0.1\""));
    assert!(cargo.contains(r#"tauri = { version = "2", features = [] }"#));

    let conf: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(repo.path().join("apps/cloudprint/src-tauri/tauri.conf.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(conf["version"], "2.0.1");
    assert_eq!(conf["identifier"], "io.cloudprint");
}

#[test]
fn sync_updates_the_nested_schema_shape() {
    let repo = sync_fixture(r#"{"package": {"version": "1.9.9", "productName": "Cloudprint"}}"#);

    repo.stv().args(["sync", "cloudprint"]).assert().success();

    let conf: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(repo.path().join("apps/cloudprint/src-tauri/tauri.conf.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(conf["package"]["version"], "2.0.1");
}

#[test]
fn sync_fails_when_the_source_version_is_missing() {
    let repo = TestRepo::new();
    repo.write("apps/cloudprint/package.json", r#"{"name": "cloudprint"}"#);
    repo.write("stevedore.toml", "lock_command = [\"true\"]\n");
    repo.commit_all("chore: scaffold");

    repo.stv()
        .args(["sync", "cloudprint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no version field"));
}

#[test]
fn sync_fails_when_the_lock_refresh_fails() {
    let repo = sync_fixture(r#"{"version": "1.9.9"}"#);
    repo.write("stevedore.toml", "lock_command = [\"false\"]\n");

    repo.stv()
        .args(["sync", "cloudprint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lock refresh"));
}

#[test]
fn sync_is_idempotent_on_disk() {
    let repo = sync_fixture(r#"{"version": "1.9.9"}"#);

    repo.stv().args(["sync", "cloudprint"]).assert().success();
    let cargo_path = repo.path().join("apps/cloudprint/src-tauri/Cargo.toml");
    let conf_path = repo.path().join("apps/cloudprint/src-tauri/tauri.conf.json");
    let cargo_first = std::fs::read_to_string(&cargo_path).unwrap();
    let conf_first = std::fs::read_to_string(&conf_path).unwrap();

    repo.stv().args(["sync", "cloudprint"]).assert().success();
    assert_eq!(std::fs::read_to_string(&cargo_path).unwrap(), cargo_first);
    assert_eq!(std::fs::read_to_string(&conf_path).unwrap(), conf_first);
}

// =============================================================
// configuration
// =============================================================

#[test]
fn config_overrides_the_apps_root_and_marker() {
    let repo = TestRepo::new();
    repo.write(
        "stevedore.toml",
        "apps_root = \"services\"\nrelease_marker = \"chore(release):\"\n",
    );
    repo.write("services/api/package.json", r#"{"version": "1.0.0"}"#);
    repo.commit_all("chore(release): cut api");

    repo.stv()
        .env("GITHUB_OUTPUT", repo.output_file())
        .arg("gate")
        .assert()
        .success();

    let output = repo.read_output_file();
    assert!(output.contains("is_release=true"));
    assert!(output.contains(r#"released=["api"]"#));
}

#[test]
fn malformed_config_is_fatal() {
    let repo = TestRepo::new();
    repo.write("stevedore.toml", "apps_root = [broken");
    repo.commit_all("chore: break config");

    repo.stv()
        .arg("gate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}
