//! Sandbox Inspector Integration Tests
//!
//! Exercises the real inspector end to end: a throwaway git repository is
//! created on disk, committed, and cloned over file:// into the inspection
//! sandbox. Requires a `git` binary, same as the inspector itself.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use contrib_navigator_core::{EntryKind, NavError, RepoInspector, RepositoryRef};
use contrib_navigator_tools::{InspectorConfig, SandboxInspector};

// ============================================================================
// Fixture
// ============================================================================

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Create a committed repository with the given files and return a
/// `RepositoryRef` whose clone URL points at it over file://.
fn fixture_repo(files: &[(&str, &str)]) -> (TempDir, RepositoryRef) {
    let dir = TempDir::new().expect("failed to create fixture dir");
    git(dir.path(), &["init", "--initial-branch=main", "."]);

    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("failed to create fixture subdir");
        }
        std::fs::write(&full, content).expect("failed to write fixture file");
    }

    git(dir.path(), &["add", "."]);
    git(
        dir.path(),
        &[
            "-c",
            "user.name=Fixture",
            "-c",
            "user.email=fixture@example.invalid",
            "commit",
            "-m",
            "fixture",
        ],
    );

    let mut repo = RepositoryRef::new("fixture", "repo");
    repo.clone_url = format!("file://{}", dir.path().display());
    (dir, repo)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_inspects_listing_and_guide() {
    let (_dir, repo) = fixture_repo(&[
        ("README.md", "# fixture"),
        ("CONTRIBUTING.md", "Run cargo test before pushing."),
        ("src/lib.rs", "pub fn nothing() {}"),
    ]);

    let inspector = SandboxInspector::new(InspectorConfig::default());
    let result = inspector.inspect(&repo).await.unwrap();

    assert!(result.raw_clone_success);
    assert!(result.contains("README.md"));
    assert!(result.contains("src"));
    assert!(!result.contains(".git"));

    let src = result
        .top_level_entries
        .iter()
        .find(|e| e.name == "src")
        .unwrap();
    assert_eq!(src.kind, EntryKind::Dir);

    assert_eq!(
        result.contribution_guide_path.as_deref(),
        Some("CONTRIBUTING.md")
    );
    let text = result.contribution_guide_text.unwrap();
    assert!(text.contains("cargo test"));
}

#[tokio::test]
async fn test_finds_guide_in_dot_github_dir() {
    let (_dir, repo) = fixture_repo(&[
        ("README.md", "# fixture"),
        (".github/CONTRIBUTING.md", "Be nice."),
    ]);

    let inspector = SandboxInspector::new(InspectorConfig::default());
    let result = inspector.inspect(&repo).await.unwrap();

    assert_eq!(
        result.contribution_guide_path.as_deref(),
        Some(".github/CONTRIBUTING.md")
    );
}

#[tokio::test]
async fn test_missing_guide_reported_as_none_not_error() {
    let (_dir, repo) = fixture_repo(&[("README.md", "# fixture")]);

    let inspector = SandboxInspector::new(InspectorConfig::default());
    let result = inspector.inspect(&repo).await.unwrap();

    assert!(result.raw_clone_success);
    assert!(result.contribution_guide_path.is_none());
    assert!(result.contribution_guide_text.is_none());
}

#[tokio::test]
async fn test_oversized_guide_is_truncated() {
    let big = "x".repeat(64 * 1024);
    let (_dir, repo) = fixture_repo(&[("CONTRIBUTING.md", big.as_str())]);

    let inspector = SandboxInspector::new(InspectorConfig {
        guide_max_bytes: 1024,
        ..Default::default()
    });
    let result = inspector.inspect(&repo).await.unwrap();

    let text = result.contribution_guide_text.unwrap();
    assert!(text.len() <= 1024);
}

#[tokio::test]
async fn test_unreachable_repo_fails_with_inspection_error() {
    let mut repo = RepositoryRef::new("fixture", "missing");
    repo.clone_url = "file:///nonexistent/definitely/not/a/repo".to_string();

    let inspector = SandboxInspector::new(InspectorConfig::default());
    let err = inspector.inspect(&repo).await.unwrap_err();

    assert!(matches!(err, NavError::InspectionFailure(_)));
    assert!(err.is_section_recoverable());
}
