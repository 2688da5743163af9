//! Collaborator Capability Traits
//!
//! One small async interface per external collaborator the planner
//! orchestrates:
//!
//! - `IssueSource` - read-only issue tracker queries
//! - `RepoInspector` - sandboxed repository inspection
//! - `ReasoningService` - the four LLM call modes
//!
//! The planner depends only on these traits; production implementations live
//! in the tools and llm crates, and tests substitute mocks. Each collaborator
//! gets its own interface rather than a single dynamically-typed dispatch
//! table, so the planner's call sites stay typed end to end.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NavResult;
use crate::model::{FileSuggestion, GuidelineSummary, InspectionResult, Issue, RepositoryRef};
use crate::section::SectionPlan;

/// Parameters of one issue search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueQuery {
    /// Primary language filter (required by the tracker query grammar)
    pub language: String,
    /// Optional topic filters, OR-combined
    pub topics: BTreeSet<String>,
    /// Maximum number of issues to return
    pub limit: usize,
}

impl IssueQuery {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            topics: BTreeSet::new(),
            limit: 10,
        }
    }

    pub fn with_topics(mut self, topics: BTreeSet<String>) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Rank mode output: the single best issue plus the model's rationale.
///
/// `index` points into the slice the caller supplied, which carries the
/// issue source's ordering; on a tie the model must still name one index,
/// so "earliest-ranked wins" is enforced by construction rather than
/// trusted from model prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedIssue {
    /// Index into the caller's issue slice
    pub index: usize,
    /// Why the model picked this issue
    pub rationale: String,
}

/// Read-only query interface to the external issue tracker.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Search for candidate issues.
    ///
    /// Returns an empty vec (not an error) when nothing matches. Issues
    /// carrying a beginner-friendly label come first; tracker order is
    /// preserved within each group. Fails with `SourceUnavailable` when the
    /// tracker cannot be reached.
    async fn search(&self, query: &IssueQuery) -> NavResult<Vec<Issue>>;
}

/// Sandboxed repository inspection.
#[async_trait]
pub trait RepoInspector: Send + Sync {
    /// Shallow-clone the repository in an isolated sandbox and return its
    /// top-level listing plus the located contribution guide, if any.
    ///
    /// Bounded by a hard timeout; exceeding it fails with
    /// `InspectionTimeout`. The sandbox is torn down before returning.
    async fn inspect(&self, repo: &RepositoryRef) -> NavResult<InspectionResult>;
}

// Shared inspectors are common (one sandbox behind several owners), so the
// trait passes through Arc.
#[async_trait]
impl<T: RepoInspector + ?Sized> RepoInspector for std::sync::Arc<T> {
    async fn inspect(&self, repo: &RepositoryRef) -> NavResult<InspectionResult> {
        (**self).inspect(repo).await
    }
}

/// The LLM reasoning capability, exposed as four typed call modes.
///
/// Stateless from the caller's perspective: no context is shared between
/// calls. Every mode may fail with `ReasoningUnavailable` (transport) or
/// `MalformedResponse` (reply does not parse to the expected shape); both
/// are recoverable per section.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Rank mode: pick the single most beginner-suitable issue.
    ///
    /// `issues` must be in issue-source order; implementations must return
    /// an in-bounds index or `MalformedResponse`.
    async fn rank_issues(&self, issues: &[Issue]) -> NavResult<RankedIssue>;

    /// Plan mode: decide which kit sections to produce for this issue.
    ///
    /// Implementations validate names against the closed section catalog
    /// and drop anything unrecognized; the returned plan may be empty, in
    /// which case the planner substitutes the default section set.
    async fn plan_sections(&self, issue: &Issue) -> NavResult<Vec<SectionPlan>>;

    /// Summarize mode: digest raw contribution-guide text.
    ///
    /// Callers only invoke this with non-empty guide text; the absent-guide
    /// case is represented by `GuidelineDigest::NoGuidelineFound` without
    /// any model call.
    async fn summarize_guidelines(&self, guide_text: &str) -> NavResult<GuidelineSummary>;

    /// File-suggestion mode: propose repository files relevant to the issue.
    ///
    /// Suggestions are advisory; the caller validates each path against the
    /// inspection listing and drops non-members.
    async fn suggest_files(
        &self,
        issue: &Issue,
        inspection: &InspectionResult,
    ) -> NavResult<Vec<FileSuggestion>>;
}
