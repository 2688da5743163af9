//! Reasoning Service
//!
//! Implements the four reasoning call modes (rank, plan, summarize,
//! file-suggestion) on top of [`ChatClient`]. Each mode sends a
//! role-specific instruction, requests a JSON reply, deserializes it into a
//! strict wire shape, and validates the result before handing it to the
//! planner. Model output is advisory: indices are bounds-checked, section
//! names are matched against the closed catalog, and anything else is
//! rejected as `MalformedResponse`.

use async_trait::async_trait;
use serde::Deserialize;

use contrib_navigator_core::{
    FileSuggestion, GuidelineSummary, InspectionResult, Issue, NavError, NavResult, RankedIssue,
    ReasoningService, SectionKind, SectionPlan,
};

use crate::client::ChatClient;

/// Cap on how much of each issue body goes into a prompt.
const BODY_SNIPPET_LEN: usize = 300;

/// Reasoning service backed by an OpenAI-compatible endpoint.
pub struct OpenAiReasoning {
    client: ChatClient,
}

// ============================================================================
// Wire shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct RankReply {
    index: usize,
    rationale: String,
}

#[derive(Debug, Deserialize)]
struct PlanReply {
    sections: Vec<PlanEntry>,
}

#[derive(Debug, Deserialize)]
struct PlanEntry {
    name: String,
    #[serde(default)]
    rationale: String,
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    #[serde(default)]
    setup_steps: Vec<String>,
    #[serde(default)]
    style_notes: Vec<String>,
    #[serde(default)]
    pr_process: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestReply {
    suggestions: Vec<SuggestEntry>,
}

#[derive(Debug, Deserialize)]
struct SuggestEntry {
    path: String,
    #[serde(default)]
    reason: String,
}

// ============================================================================
// Helpers
// ============================================================================

/// Extract the JSON object from a model reply.
///
/// Tolerates code-fenced replies (```json ... ```); anything without a
/// brace-delimited object is malformed.
fn extract_json(raw: &str) -> NavResult<&str> {
    let trimmed = raw.trim();
    let start = trimmed
        .find('{')
        .ok_or_else(|| NavError::malformed("reply contains no JSON object"))?;
    let end = trimmed
        .rfind('}')
        .ok_or_else(|| NavError::malformed("reply contains no closing brace"))?;
    if end < start {
        return Err(NavError::malformed("reply braces are unbalanced"));
    }
    Ok(&trimmed[start..=end])
}

fn parse_reply<T: for<'de> Deserialize<'de>>(raw: &str) -> NavResult<T> {
    let json = extract_json(raw)?;
    serde_json::from_str(json)
        .map_err(|e| NavError::malformed(format!("reply did not match expected shape: {}", e)))
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Render issues for a prompt, numbered from 0 in caller order.
fn format_issues(issues: &[Issue]) -> String {
    let mut out = String::new();
    for (i, issue) in issues.iter().enumerate() {
        let labels: Vec<&str> = issue.labels.iter().map(String::as_str).collect();
        let snippet = issue
            .body
            .as_deref()
            .map(|b| truncate(b, BODY_SNIPPET_LEN).to_string())
            .unwrap_or_else(|| "No description available.".to_string());
        out.push_str(&format!(
            "--- Issue {} ---\nTitle: {}\nURL: {}\nLabels: {}\nSnippet: {}\n",
            i,
            issue.title,
            issue.url,
            if labels.is_empty() {
                "none".to_string()
            } else {
                labels.join(", ")
            },
            snippet,
        ));
    }
    out
}

impl OpenAiReasoning {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    fn rank_prompts(issues: &[Issue]) -> (String, String) {
        let system = "You are an expert assistant helping a new open-source contributor. \
                      Analyze the listed GitHub issues and pick the single one most suitable \
                      for a beginner, considering clarity, labels, and apparent scope. \
                      Reply with a JSON object: {\"index\": <zero-based issue number>, \
                      \"rationale\": <one or two sentences>}. If several issues are equally \
                      suitable, pick the one listed earliest."
            .to_string();
        let user = format!(
            "Here are the candidate issues:\n{}\nPick the best one for a beginner.",
            format_issues(issues)
        );
        (system, user)
    }

    fn plan_prompts(issue: &Issue) -> (String, String) {
        let system = "You plan the contents of an onboarding kit for a selected open-source \
                      issue. The available section names are: essentials, \
                      contribution_guidelines, repo_overview, first_steps_checklist. Reply \
                      with a JSON object: {\"sections\": [{\"name\": <section name>, \
                      \"rationale\": <why it helps for this issue>}]}. Only use the listed \
                      names; order sections by usefulness to a first-time contributor."
            .to_string();
        let body = issue
            .body
            .as_deref()
            .map(|b| truncate(b, BODY_SNIPPET_LEN))
            .unwrap_or("No description available.");
        let user = format!(
            "Issue: {}\nRepository: {}\nLabels: {}\nDescription: {}\n\nWhich sections should \
             the kit contain?",
            issue.title,
            issue.repository.full_name(),
            issue
                .labels
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            body,
        );
        (system, user)
    }

    fn summarize_prompts(guide_text: &str) -> (String, String) {
        let system = "You summarize open-source contribution guidelines for a first-time \
                      contributor. Reply with a JSON object: {\"setup_steps\": [..], \
                      \"style_notes\": [..], \"pr_process\": [..]}, each a list of short \
                      strings. Only state what the document actually says; leave a list \
                      empty when the document does not cover that topic."
            .to_string();
        let user = format!("Contribution guide:\n\n{}", guide_text);
        (system, user)
    }

    fn suggest_prompts(issue: &Issue, inspection: &InspectionResult) -> (String, String) {
        let system = "You point a new contributor at the repository entries most relevant \
                      to their issue. Reply with a JSON object: {\"suggestions\": \
                      [{\"path\": <entry name>, \"reason\": <why>}]}, most relevant first. \
                      Only use entry names from the provided listing."
            .to_string();
        let body = issue
            .body
            .as_deref()
            .map(|b| truncate(b, BODY_SNIPPET_LEN))
            .unwrap_or("No description available.");
        let user = format!(
            "Issue: {}\nDescription: {}\n\nTop-level repository entries:\n{}",
            issue.title,
            body,
            inspection
                .entry_names()
                .iter()
                .map(|n| format!("- {}", n))
                .collect::<Vec<_>>()
                .join("\n"),
        );
        (system, user)
    }
}

#[async_trait]
impl ReasoningService for OpenAiReasoning {
    async fn rank_issues(&self, issues: &[Issue]) -> NavResult<RankedIssue> {
        if issues.is_empty() {
            return Err(NavError::validation("no issues to rank"));
        }
        let (system, user) = Self::rank_prompts(issues);
        let raw = self.client.complete(&system, &user).await?;
        let reply: RankReply = parse_reply(&raw)?;
        if reply.index >= issues.len() {
            return Err(NavError::malformed(format!(
                "ranked index {} out of range for {} issues",
                reply.index,
                issues.len()
            )));
        }
        Ok(RankedIssue {
            index: reply.index,
            rationale: reply.rationale,
        })
    }

    async fn plan_sections(&self, issue: &Issue) -> NavResult<Vec<SectionPlan>> {
        let (system, user) = Self::plan_prompts(issue);
        let raw = self.client.complete(&system, &user).await?;
        let reply: PlanReply = parse_reply(&raw)?;

        let mut plan = Vec::new();
        for entry in reply.sections {
            match SectionKind::parse(&entry.name) {
                Some(kind) if !plan.iter().any(|p: &SectionPlan| p.section == kind) => {
                    plan.push(SectionPlan::new(kind, entry.rationale));
                }
                Some(kind) => {
                    tracing::debug!(section = %kind, "dropping duplicate planned section");
                }
                None => {
                    tracing::debug!(name = %entry.name, "dropping unrecognized planned section");
                }
            }
        }
        Ok(plan)
    }

    async fn summarize_guidelines(&self, guide_text: &str) -> NavResult<GuidelineSummary> {
        if guide_text.trim().is_empty() {
            // Never fabricate a summary for absent input.
            return Err(NavError::validation("guide text is empty"));
        }
        let (system, user) = Self::summarize_prompts(guide_text);
        let raw = self.client.complete(&system, &user).await?;
        let reply: SummaryReply = parse_reply(&raw)?;
        Ok(GuidelineSummary {
            setup_steps: reply.setup_steps,
            style_notes: reply.style_notes,
            pr_process: reply.pr_process,
        })
    }

    async fn suggest_files(
        &self,
        issue: &Issue,
        inspection: &InspectionResult,
    ) -> NavResult<Vec<FileSuggestion>> {
        if inspection.top_level_entries.is_empty() {
            return Ok(Vec::new());
        }
        let (system, user) = Self::suggest_prompts(issue, inspection);
        let raw = self.client.complete(&system, &user).await?;
        let reply: SuggestReply = parse_reply(&raw)?;
        Ok(reply
            .suggestions
            .into_iter()
            .map(|s| FileSuggestion {
                path: s.path,
                reason: s.reason,
            })
            .collect())
    }
}
