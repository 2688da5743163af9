//! contrib-navigator - find beginner-friendly issues and build onboarding kits
//!
//! This crate wires the workspace together:
//! - Configuration loading (env + optional JSON file)
//! - The [`Navigator`] facade that constructs the production collaborators
//!   and exposes the three user-facing operations: search, suggest, kit

pub mod config;

use std::sync::Arc;

use contrib_navigator_core::{
    Issue, IssueQuery, IssueSource, NavError, NavResult, OnboardingKit, RankedIssue,
    ReasoningService, RepoInspector,
};
use contrib_navigator_llm::{ChatClient, ChatConfig, OpenAiReasoning};
use contrib_navigator_planner::KitPlanner;
use contrib_navigator_tools::{
    GithubConfig, GithubIssueSource, InspectorConfig, MemoizedInspector, SandboxInspector,
};

pub use config::Config;

/// The application facade. Owns the issue source and the kit planner with
/// its collaborators, all built once from a [`Config`].
pub struct Navigator {
    source: Arc<GithubIssueSource>,
    planner: KitPlanner,
}

impl Navigator {
    /// Build the production wiring: GitHub search, OpenAI reasoning, and a
    /// sandboxed inspector behind a TTL memo so the guidelines and overview
    /// sections share one clone per repository.
    pub fn new(config: &Config) -> Self {
        let source = Arc::new(GithubIssueSource::new(GithubConfig {
            token: config.github_token.clone(),
            beginner_labels: config.beginner_labels.clone(),
            ..Default::default()
        }));

        let reasoning: Arc<dyn ReasoningService> =
            Arc::new(OpenAiReasoning::new(ChatClient::new(ChatConfig {
                api_key: config.openai_api_key.clone().unwrap_or_default(),
                base_url: config.base_url.clone(),
                model: config.model.clone(),
                temperature: config.temperature,
                ..Default::default()
            })));

        let inspector: Arc<dyn RepoInspector> = Arc::new(MemoizedInspector::new(
            SandboxInspector::new(InspectorConfig {
                timeout_secs: config.clone_timeout_secs,
                ..Default::default()
            }),
            std::time::Duration::from_secs(config.inspection_cache_ttl_secs),
        ));

        Self {
            source,
            planner: KitPlanner::new(reasoning, inspector),
        }
    }

    /// Search the issue source for beginner-friendly issues.
    pub async fn list_issues(&self, query: &IssueQuery) -> NavResult<Vec<Issue>> {
        self.source.search(query).await
    }

    /// Search, then ask the reasoning service which result to tackle first.
    /// Empty search results are reported as-is rather than sent to rank mode.
    pub async fn suggest_issue(&self, query: &IssueQuery) -> NavResult<(Vec<Issue>, RankedIssue)> {
        let issues = self.list_issues(query).await?;
        if issues.is_empty() {
            return Err(NavError::not_found(format!(
                "no open beginner-friendly {} issues matched",
                query.language
            )));
        }
        let ranked = self.planner.suggest_issue(&issues).await?;
        Ok((issues, ranked))
    }

    /// Generate an onboarding kit for one issue. The default branch is
    /// resolved best-effort first so the essentials section can name it;
    /// a failed lookup leaves it unset and kit generation proceeds.
    pub async fn generate_kit(&self, issue: &Issue) -> OnboardingKit {
        let issue = self.with_default_branch(issue.clone()).await;
        self.planner.generate_kit(&issue).await
    }

    async fn with_default_branch(&self, mut issue: Issue) -> Issue {
        if issue.repository.default_branch.is_none() {
            match self.source.default_branch(&issue.repository).await {
                Ok(Some(branch)) => {
                    issue.repository = issue.repository.clone().with_default_branch(branch);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(repo = %issue.repository.full_name(), "default branch lookup failed: {}", err);
                }
            }
        }
        issue
    }
}
