//! Data Model
//!
//! Immutable value types flowing between the collaborators and the planner:
//! issues and repository references from the issue source, inspection results
//! from the sandboxed inspector, and the small payload types embedded in kit
//! sections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Reference to the repository an issue belongs to.
///
/// Derived from the issue once at fetch time and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Default branch, when known. `None` until resolved from the tracker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    /// HTTPS clone URL
    pub clone_url: String,
}

impl RepositoryRef {
    /// Create a reference from owner and name, deriving the canonical
    /// GitHub clone URL.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner = owner.into();
        let name = name.into();
        let clone_url = format!("https://github.com/{}/{}.git", owner, name);
        Self {
            owner,
            name,
            default_branch: None,
            clone_url,
        }
    }

    /// Set the default branch.
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = Some(branch.into());
        self
    }

    /// `owner/name` form used as cache key and in tracker API paths.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Browsable repository URL (clone URL without the `.git` suffix).
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

/// One candidate issue fetched from the issue tracker.
///
/// Immutable once fetched; consumed read-only by the planner and the
/// reasoning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Tracker-assigned issue id
    pub id: u64,
    /// Issue title
    pub title: String,
    /// Browsable issue URL
    pub url: String,
    /// Repository the issue belongs to
    pub repository: RepositoryRef,
    /// Label names attached to the issue
    pub labels: BTreeSet<String>,
    /// Primary language the issue was searched under, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Issue body text (possibly truncated to a snippet by the source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Issue {
    /// Whether any of the issue's labels is in the given beginner-label set
    /// (case-insensitive).
    pub fn has_any_label(&self, candidates: &[String]) -> bool {
        self.labels.iter().any(|label| {
            candidates
                .iter()
                .any(|c| c.eq_ignore_ascii_case(label))
        })
    }
}

/// Kind of a top-level repository entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Dir,
}

/// One top-level entry of an inspected repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoEntry {
    /// Entry name relative to the repository root
    pub name: String,
    /// Whether the entry is a file or a directory
    pub kind: EntryKind,
}

impl RepoEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }
}

/// Result of one sandboxed repository inspection.
///
/// Produced at most once per repository per session (the planner memoizes);
/// discarded after kit assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    /// Top-level entries, sorted by name for deterministic output
    pub top_level_entries: Vec<RepoEntry>,
    /// Path of the located contribution guide, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_guide_path: Option<String>,
    /// Contents of the located guide, captured before sandbox teardown
    /// (length-capped). Absent when no guide was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_guide_text: Option<String>,
    /// Whether the shallow clone itself succeeded
    pub raw_clone_success: bool,
}

impl InspectionResult {
    /// Whether `path` names a top-level entry of the inspected repository.
    ///
    /// Used to drop hallucinated paths from file suggestions. A leading
    /// `./` and a trailing `/` are tolerated since models emit both.
    pub fn contains(&self, path: &str) -> bool {
        let normalized = path
            .trim()
            .trim_start_matches("./")
            .trim_end_matches('/');
        self.top_level_entries.iter().any(|e| e.name == normalized)
    }

    /// Top-level entry names in listing order.
    pub fn entry_names(&self) -> Vec<&str> {
        self.top_level_entries
            .iter()
            .map(|e| e.name.as_str())
            .collect()
    }
}

/// Structured digest of a contribution guide, produced by Summarize mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineSummary {
    /// Environment / project setup steps
    pub setup_steps: Vec<String>,
    /// Coding-style expectations
    pub style_notes: Vec<String>,
    /// Pull-request process notes
    pub pr_process: Vec<String>,
}

impl GuidelineSummary {
    /// A summary with no content at all is not useful to render.
    pub fn is_empty(&self) -> bool {
        self.setup_steps.is_empty() && self.style_notes.is_empty() && self.pr_process.is_empty()
    }
}

/// One suggested file to look at, produced by File-suggestion mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSuggestion {
    /// Path relative to the repository root
    pub path: String,
    /// Why this file is relevant to the issue
    pub reason: String,
}

/// One item of the first-steps checklist.
///
/// `done` always starts false; toggling is the UI layer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub text: String,
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}
