// tests/integration_test.rs
use std::process::{Command, Output};

use git2::{Repository as RawRepo, Signature};
use git_bump::boundary::BoundaryWarning;
use git_bump::cli::{next_version, run_tag_workflow, TagOutcome, TagRequest};
use git_bump::config::Config;
use git_bump::git::{Git2Repository, Repository};
use tempfile::TempDir;

/// A working repository with an `origin` remote backed by a local bare repo
struct Fixture {
    work: TempDir,
    remote: TempDir,
    config_file: tempfile::NamedTempFile,
}

impl Fixture {
    fn new() -> Self {
        let work = TempDir::new().unwrap();
        let remote = TempDir::new().unwrap();
        RawRepo::init_bare(remote.path()).unwrap();

        let repo = RawRepo::init(work.path()).unwrap();
        repo.remote("origin", remote.path().to_str().unwrap())
            .unwrap();

        Fixture {
            work,
            remote,
            config_file: tempfile::NamedTempFile::new().unwrap(),
        }
    }

    fn commit(&self, subject: &str) {
        let repo = RawRepo::open(self.work.path()).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, subject, &tree, &parents)
            .unwrap();
    }

    fn open(&self) -> Git2Repository {
        Git2Repository::open(self.work.path()).unwrap()
    }

    fn remote_tag_message(&self, name: &str) -> Option<String> {
        let remote = RawRepo::open_bare(self.remote.path()).unwrap();
        let reference = remote
            .find_reference(&format!("refs/tags/{}", name))
            .ok()?;
        let tag = reference.peel_to_tag().ok()?;
        tag.message().map(|m| m.trim_end().to_string())
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_git-bump"))
            .arg("-C")
            .arg(self.work.path())
            .arg("--config")
            .arg(self.config_file.path())
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute git-bump")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_git_bump_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_git-bump"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-bump"));
    assert!(stdout.contains("next"));
    assert!(stdout.contains("tag"));
}

#[test]
fn test_workflow_fetches_resolves_and_pushes() {
    let fixture = Fixture::new();
    fixture.commit("initial");
    let repo = fixture.open();

    // v1.2.3 only exists on the remote before the workflow runs
    repo.create_annotated_tag("v1.2.3", "Release v1.2.3").unwrap();
    repo.push_tag("origin", "v1.2.3").unwrap();
    repo.delete_tag("v1.2.3").unwrap();
    assert!(repo.list_tags().unwrap().is_empty());

    fixture.commit("Fix crash on empty input [patch]");

    let result = run_tag_workflow(&repo, &TagRequest::default(), &Config::default()).unwrap();

    match &result.outcome {
        TagOutcome::Published { tag, remote } => {
            assert_eq!(tag.name, "v1.2.4");
            assert_eq!(remote, "origin");
        }
        other => panic!("expected a published tag, got {:?}", other),
    }
    assert_eq!(result.latest_tag.as_deref(), Some("v1.2.3"));
    assert!(result.warnings.is_empty());
    assert_eq!(
        fixture.remote_tag_message("v1.2.4").as_deref(),
        Some("Release v1.2.4")
    );
}

#[test]
fn test_unborn_head_resolves_as_empty_message() {
    let dir = TempDir::new().unwrap();
    RawRepo::init(dir.path()).unwrap();
    let repo = Git2Repository::open(dir.path()).unwrap();

    let request = TagRequest {
        fetch: Some(false),
        ..TagRequest::default()
    };
    let next = next_version(&repo, &request, &Config::default()).unwrap();

    assert_eq!(next.resolution.version().unwrap().to_string(), "v0.1.0");
    assert_eq!(next.warnings[0], BoundaryWarning::NoPriorTag);
    assert!(matches!(
        next.warnings[1],
        BoundaryWarning::HeadUnreadable { .. }
    ));
}

#[test]
fn test_failed_push_leaves_no_local_tag() {
    let fixture = Fixture::new();
    fixture.commit("[major] first");
    let repo = fixture.open();

    let request = TagRequest {
        remote: Some("missing".to_string()),
        fetch: Some(false),
        ..TagRequest::default()
    };

    assert!(run_tag_workflow(&repo, &request, &Config::default()).is_err());
    assert!(repo.list_tags().unwrap().is_empty());
}

#[test]
fn test_cli_next_prints_version() {
    let fixture = Fixture::new();
    fixture.commit("add feature");

    let output = fixture.run(&["next", "--no-fetch"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "v0.1.0");
}

#[test]
fn test_cli_next_prints_skip() {
    let fixture = Fixture::new();
    fixture.commit("ci tweaks [skip]");

    let output = fixture.run(&["next"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "skip");
}

#[test]
fn test_cli_next_on_repository_without_commits() {
    let fixture = Fixture::new();

    let output = fixture.run(&["next", "--no-fetch"]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout(&output), "v0.1.0");
}

#[test]
fn test_cli_rejects_unknown_bump() {
    let fixture = Fixture::new();
    fixture.commit("anything");

    let output = fixture.run(&["next", "--force-bump", "bogus"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bump type"));
}

#[test]
fn test_cli_invalid_latest_tag_fails() {
    let fixture = Fixture::new();
    fixture.commit("anything");
    fixture
        .open()
        .create_annotated_tag("nightly", "moving tag")
        .unwrap();

    let output = fixture.run(&["next", "--no-fetch"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'nightly'"));
}

#[test]
fn test_cli_tag_dry_run() {
    let fixture = Fixture::new();
    fixture.commit("[major] new api");

    let output = fixture.run(&["tag", "--dry-run", "--no-fetch"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "v1.0.0");
    assert!(fixture.open().list_tags().unwrap().is_empty());
}

#[test]
fn test_cli_tag_explicit_version_and_message() {
    let fixture = Fixture::new();
    fixture.commit("[skip] would skip");

    let output = fixture.run(&["tag", "--version", "2.0.0", "-m", "Big one"]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout(&output), "v2.0.0");
    assert_eq!(fixture.open().list_tags().unwrap(), vec!["v2.0.0"]);
    assert_eq!(
        fixture.remote_tag_message("v2.0.0").as_deref(),
        Some("Big one")
    );
}

#[test]
fn test_cli_tag_skip_prints_skip() {
    let fixture = Fixture::new();
    fixture.commit("chore: bump deps [skip]");

    let output = fixture.run(&["tag", "--no-fetch"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "skip");
    assert!(fixture.open().list_tags().unwrap().is_empty());
}

#[test]
fn test_cli_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_git-bump"))
        .arg("-C")
        .arg(dir.path())
        .args(["next"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join(".git").exists());
}
