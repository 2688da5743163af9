//! Sandboxed Repository Inspector
//!
//! Performs a shallow clone of a repository inside a throwaway temporary
//! directory, lists its top-level entries, and locates the contribution
//! guide. The whole operation runs under a hard timeout; the sandbox is torn
//! down when the `TempDir` drops, so nothing persists past the call and the
//! caller's filesystem is never touched.
//!
//! Only the top level is listed (no recursive walk) to bound execution time.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use contrib_navigator_core::{
    EntryKind, InspectionResult, NavError, NavResult, RepoEntry, RepoInspector, RepositoryRef,
};

/// Contribution guide filename candidates, checked in priority order.
/// Matching is case-insensitive; first match wins.
const GUIDE_CANDIDATES: &[&str] = &[
    "CONTRIBUTING.md",
    "CONTRIBUTING.rst",
    ".github/CONTRIBUTING.md",
    "docs/CONTRIBUTING.md",
    ".github/CONTRIBUTING.rst",
];

/// Configuration for the sandboxed inspector.
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Hard budget for the clone step in seconds
    pub timeout_secs: u64,
    /// Located guide text is capped at this many bytes
    pub guide_max_bytes: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            guide_max_bytes: 16 * 1024,
        }
    }
}

/// Inspector that clones into a fresh temporary sandbox per invocation.
pub struct SandboxInspector {
    config: InspectorConfig,
}

impl SandboxInspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self { config }
    }

    /// Run `git clone --depth 1` into `target` under the configured timeout.
    async fn clone_into(&self, repo: &RepositoryRef, target: &Path) -> NavResult<()> {
        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth", "1"]);
        if let Some(branch) = &repo.default_branch {
            cmd.args(["--branch", branch]);
        }
        cmd.arg(&repo.clone_url)
            .arg(target)
            // Fail instead of prompting for credentials on private repos.
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(repo = %repo.full_name(), "cloning into sandbox");

        let output = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            cmd.output(),
        )
        .await
        .map_err(|_| NavError::InspectionTimeout {
            timeout_secs: self.config.timeout_secs,
        })?
        .map_err(|e| NavError::inspection(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NavError::inspection(format!(
                "git clone exited with {}: {}",
                output.status,
                stderr.trim().chars().take(300).collect::<String>()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RepoInspector for SandboxInspector {
    async fn inspect(&self, repo: &RepositoryRef) -> NavResult<InspectionResult> {
        let sandbox = tempfile::tempdir()
            .map_err(|e| NavError::inspection(format!("failed to create sandbox: {}", e)))?;
        let target = sandbox.path().join("repo");

        self.clone_into(repo, &target).await?;

        let top_level_entries = list_top_level(&target).await?;
        let guide = locate_guide(&target).await;

        let (contribution_guide_path, contribution_guide_text) = match guide {
            Some((path, file)) => {
                let text = read_guide(&file, self.config.guide_max_bytes).await;
                (Some(path), text)
            }
            None => (None, None),
        };

        // Sandbox (TempDir) drops here; nothing survives the call.
        Ok(InspectionResult {
            top_level_entries,
            contribution_guide_path,
            contribution_guide_text,
            raw_clone_success: true,
        })
    }
}

/// List the top-level entries of a cloned repository, sorted by name.
/// The `.git` directory is clone bookkeeping, not repository content.
async fn list_top_level(root: &Path) -> NavResult<Vec<RepoEntry>> {
    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(root)
        .await
        .map_err(|e| NavError::inspection(format!("failed to list clone: {}", e)))?;

    while let Some(entry) = dir
        .next_entry()
        .await
        .map_err(|e| NavError::inspection(format!("failed to list clone: {}", e)))?
    {
        let name = entry.file_name().to_string_lossy().to_string();
        if name == ".git" {
            continue;
        }
        let kind = match entry.file_type().await {
            Ok(t) if t.is_dir() => EntryKind::Dir,
            _ => EntryKind::File,
        };
        entries.push(RepoEntry { name, kind });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Locate the contribution guide by checking each candidate in priority
/// order, matching path components case-insensitively.
///
/// Returns the repository-relative path (with the on-disk spelling) and the
/// absolute file path.
async fn locate_guide(root: &Path) -> Option<(String, PathBuf)> {
    for candidate in GUIDE_CANDIDATES {
        let mut dir = root.to_path_buf();
        let mut relative = Vec::new();
        let mut found = true;

        for component in candidate.split('/') {
            match find_entry_ci(&dir, component).await {
                Some(actual) => {
                    dir = dir.join(&actual);
                    relative.push(actual);
                }
                None => {
                    found = false;
                    break;
                }
            }
        }

        if found && tokio::fs::metadata(&dir).await.map(|m| m.is_file()).unwrap_or(false) {
            return Some((relative.join("/"), dir));
        }
    }
    None
}

/// Find an entry named `name` (case-insensitively) in `dir`, returning its
/// on-disk spelling.
async fn find_entry_ci(dir: &Path, name: &str) -> Option<String> {
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let file_name = entry.file_name().to_string_lossy().to_string();
        if file_name.eq_ignore_ascii_case(name) {
            return Some(file_name);
        }
    }
    None
}

/// Read the guide text, capped at `max_bytes` on a char boundary.
/// Read failures degrade to `None` rather than failing the inspection.
async fn read_guide(path: &Path, max_bytes: usize) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(mut text) => {
            if text.len() > max_bytes {
                let mut cut = max_bytes;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
            }
            Some(text)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "located guide but could not read it: {}", e);
            None
        }
    }
}
