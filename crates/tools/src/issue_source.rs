//! GitHub Issue Source
//!
//! Issue Source Adapter backed by the GitHub search API. Builds search
//! queries from a language filter, a configurable beginner-label set, and
//! optional topics; normalizes the hits into `Issue` values; and orders
//! beginner-labeled issues ahead of the rest while preserving tracker order
//! within each group.
//!
//! Read-only: only GET requests are ever issued.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use contrib_navigator_core::{
    Issue, IssueQuery, IssueSource, NavError, NavResult, RepositoryRef,
};
use contrib_navigator_llm::build_http_client;

/// Default GitHub API base
const GITHUB_API_BASE: &str = "https://api.github.com";

/// Floor for per-topic page size when fanning out a multi-topic search.
const MIN_PER_TOPIC: usize = 3;

/// Configuration for the GitHub issue source.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Personal access token; anonymous requests work but are rate-limited
    pub token: Option<String>,
    /// API base URL override (tests point this at a local server)
    pub api_base: String,
    /// Labels that mark an issue as beginner-friendly
    pub beginner_labels: Vec<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Issue bodies are truncated to this many characters
    pub snippet_len: usize,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: GITHUB_API_BASE.to_string(),
            beginner_labels: default_beginner_labels(),
            request_timeout_secs: 15,
            snippet_len: 300,
        }
    }
}

/// The default beginner-friendly label set.
pub fn default_beginner_labels() -> Vec<String> {
    [
        "good first issue",
        "help wanted",
        "beginner",
        "first-timers-only",
        "contributions welcome",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// GitHub-backed issue source.
pub struct GithubIssueSource {
    config: GithubConfig,
    client: reqwest::Client,
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelItem>,
    #[serde(default)]
    updated_at: String,
}

#[derive(Debug, Deserialize)]
struct LabelItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RepoDetails {
    #[serde(default)]
    default_branch: Option<String>,
}

/// A normalized issue paired with the tracker's update timestamp, which is
/// only needed to merge multi-topic fan-out results.
struct FetchedIssue {
    issue: Issue,
    updated_at: String,
}

// ============================================================================
// Query construction
// ============================================================================

/// Build the `label:` qualifier with OR semantics, quoting labels that
/// contain spaces: `label:beginner,"good first issue"`.
fn label_qualifier(labels: &[String]) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    let quoted: Vec<String> = labels
        .iter()
        .map(|label| {
            let clean = label.trim();
            if clean.contains(' ') {
                format!("\"{}\"", clean)
            } else {
                clean.to_string()
            }
        })
        .collect();
    Some(format!("label:{}", quoted.join(",")))
}

/// Build the `topic:` qualifier, quoting topics that contain spaces.
fn topic_qualifier(topic: &str) -> String {
    let clean = topic.trim().to_lowercase();
    if clean.contains(' ') {
        format!("topic:\"{}\"", clean)
    } else {
        format!("topic:{}", clean)
    }
}

impl GithubIssueSource {
    pub fn new(config: GithubConfig) -> Self {
        let client = build_http_client(Duration::from_secs(config.request_timeout_secs));
        Self { config, client }
    }

    fn build_query(&self, language: &str, topic: Option<&str>) -> String {
        let mut parts = vec![
            format!("language:{}", language.trim().to_lowercase()),
            "state:open".to_string(),
            "is:issue".to_string(),
            "is:public".to_string(),
        ];
        if let Some(labels) = label_qualifier(&self.config.beginner_labels) {
            parts.push(labels);
        }
        if let Some(topic) = topic {
            parts.push(topic_qualifier(topic));
        }
        parts.join(" ")
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.config.token {
            builder = builder.header("Authorization", format!("token {}", token));
        }
        builder
    }

    /// Run one search query and normalize the hits.
    async fn fetch(&self, q: &str, per_page: usize) -> NavResult<Vec<FetchedIssue>> {
        let url = format!("{}/search/issues", self.config.api_base);
        tracing::debug!(query = %q, per_page, "searching issues");

        let response = self
            .request(&url)
            .query(&[
                ("q", q),
                ("sort", "updated"),
                ("order", "desc"),
                ("per_page", &per_page.to_string()),
                ("page", "1"),
            ])
            .send()
            .await
            .map_err(|e| NavError::source_unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NavError::source_unavailable(format!(
                "search returned HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            NavError::source_unavailable(format!("search response did not decode: {}", e))
        })?;

        Ok(parsed
            .items
            .into_iter()
            .filter_map(|item| self.normalize(item))
            .collect())
    }

    /// Turn one search hit into an `Issue`, deriving the repository
    /// reference from the issue URL. Hits with an unparseable URL are
    /// skipped, not fatal.
    fn normalize(&self, item: SearchItem) -> Option<FetchedIssue> {
        let parts: Vec<&str> = item.html_url.split('/').collect();
        if parts.len() < 5 {
            tracing::warn!(url = %item.html_url, "skipping issue with unparseable URL");
            return None;
        }
        let repository = RepositoryRef::new(parts[3], parts[4]);

        let body = item.body.filter(|b| !b.is_empty()).map(|b| {
            match b.char_indices().nth(self.config.snippet_len) {
                Some((idx, _)) => b[..idx].to_string(),
                None => b,
            }
        });

        Some(FetchedIssue {
            issue: Issue {
                id: item.id,
                title: item.title,
                url: item.html_url,
                repository,
                labels: item.labels.into_iter().map(|l| l.name).collect(),
                language: None,
                body,
            },
            updated_at: item.updated_at,
        })
    }

    /// Resolve the repository's default branch from the tracker.
    ///
    /// Best-effort: the caller tolerates `None` and proceeds with the
    /// tracker's own default on clone.
    pub async fn default_branch(&self, repo: &RepositoryRef) -> NavResult<Option<String>> {
        let url = format!("{}/repos/{}", self.config.api_base, repo.full_name());
        let response = self
            .request(&url)
            .send()
            .await
            .map_err(|e| NavError::source_unavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(NavError::source_unavailable(format!(
                "repository lookup returned HTTP {}",
                response.status()
            )));
        }

        let details: RepoDetails = response.json().await.map_err(|e| {
            NavError::source_unavailable(format!("repository details did not decode: {}", e))
        })?;
        Ok(details.default_branch)
    }

    /// Stable partition: beginner-labeled issues first, tracker order
    /// preserved within each group.
    fn beginner_first(&self, fetched: Vec<FetchedIssue>, language: &str) -> Vec<Issue> {
        let (beginner, rest): (Vec<FetchedIssue>, Vec<FetchedIssue>) = fetched
            .into_iter()
            .partition(|f| f.issue.has_any_label(&self.config.beginner_labels));

        beginner
            .into_iter()
            .chain(rest)
            .map(|f| Issue {
                language: Some(language.to_string()),
                ..f.issue
            })
            .collect()
    }
}

#[async_trait]
impl IssueSource for GithubIssueSource {
    async fn search(&self, query: &IssueQuery) -> NavResult<Vec<Issue>> {
        let fetched = if query.topics.is_empty() {
            self.fetch(&self.build_query(&query.language, None), query.limit)
                .await?
        } else {
            // One query per topic (the search grammar has no topic OR),
            // de-duplicated by issue URL, newest first, capped at the limit.
            let per_topic = (query.limit / query.topics.len()).max(MIN_PER_TOPIC);
            let mut seen = std::collections::HashSet::new();
            let mut merged: Vec<FetchedIssue> = Vec::new();
            for topic in &query.topics {
                let q = self.build_query(&query.language, Some(topic));
                for fetched in self.fetch(&q, per_topic).await? {
                    if seen.insert(fetched.issue.url.clone()) {
                        merged.push(fetched);
                    }
                }
            }
            merged.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            merged.truncate(query.limit);
            merged
        };

        Ok(self.beginner_first(fetched, &query.language))
    }
}
