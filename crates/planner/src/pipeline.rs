//! Kit Planner Pipeline
//!
//! The orchestrator at the heart of kit generation. One invocation walks a
//! fixed sequence of states:
//!
//! 1. **Plan** - ask the reasoning service which sections to produce; a
//!    failed or empty plan degrades to the default section set.
//! 2. **Execute** - run each planned section in plan order. Sections are
//!    independent: a failure inside one section becomes a warning naming
//!    that section and never blocks later sections.
//! 3. **Assemble** - hand the accumulated sections and warnings to the pure
//!    assembler.
//!
//! Failure containment follows the error taxonomy: collaborator failures
//! are recovered per section, and a kit is always produced because the
//! essentials and checklist sections need no collaborator at all. No
//! retries happen here; retry policy, if any, belongs to the collaborator's
//! transport.

use std::sync::Arc;

use contrib_navigator_core::{
    assemble, GuidelineDigest, Issue, KitSection, NavError, NavResult, OnboardingKit, RankedIssue,
    ReasoningService, RepoInspector, SectionContent, SectionKind, SectionPlan,
};

use crate::sections::{
    checklist_section, essentials_section, filter_suggestions, section_warning,
};

/// How the executed plan was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanSource {
    /// Plan mode returned a usable plan
    Planned,
    /// Plan mode returned nothing usable; default section set substituted
    DefaultSet,
    /// Plan mode failed; default section set substituted with a warning
    Degraded,
}

/// Outcome of executing one planned section.
struct SectionOutcome {
    section: Option<KitSection>,
    warnings: Vec<String>,
}

impl SectionOutcome {
    fn produced(section: KitSection) -> Self {
        Self {
            section: Some(section),
            warnings: Vec::new(),
        }
    }

    fn failed(kind: SectionKind, err: &NavError) -> Self {
        Self {
            section: None,
            warnings: vec![section_warning(kind, err)],
        }
    }
}

/// The kit planner, owning handles to the two collaborators it sequences.
///
/// Holds no mutable state between invocations; all in-progress state lives
/// on the stack of one `generate_kit` call, so concurrent invocations never
/// interfere.
pub struct KitPlanner {
    reasoning: Arc<dyn ReasoningService>,
    inspector: Arc<dyn RepoInspector>,
}

impl KitPlanner {
    pub fn new(reasoning: Arc<dyn ReasoningService>, inspector: Arc<dyn RepoInspector>) -> Self {
        Self {
            reasoning,
            inspector,
        }
    }

    /// Rank mode with the tie-break enforced on this side of the boundary:
    /// the returned index must address the caller-ordered slice.
    pub async fn suggest_issue(&self, issues: &[Issue]) -> NavResult<RankedIssue> {
        let ranked = self.reasoning.rank_issues(issues).await?;
        if ranked.index >= issues.len() {
            return Err(NavError::malformed(format!(
                "ranked index {} out of range for {} issues",
                ranked.index,
                issues.len()
            )));
        }
        Ok(ranked)
    }

    /// Generate one onboarding kit. Infallible by design: the worst case is
    /// a kit holding only collaborator-free sections plus warnings.
    pub async fn generate_kit(&self, issue: &Issue) -> OnboardingKit {
        let mut warnings: Vec<String> = Vec::new();

        let (plan, source) = self.plan_phase(issue, &mut warnings).await;
        tracing::info!(
            issue = issue.id,
            sections = plan.len(),
            source = ?source,
            "executing kit plan"
        );

        let mut produced: Vec<KitSection> = Vec::new();
        for entry in &plan {
            let outcome = self.run_section(issue, entry.section).await;
            if let Some(section) = outcome.section {
                produced.push(section);
            }
            warnings.extend(outcome.warnings);
        }

        assemble(issue.clone(), produced, warnings)
    }

    /// Plan phase. An empty plan is a valid model answer and substitutes
    /// the default set silently; a failed plan call substitutes the default
    /// set with a warning.
    async fn plan_phase(
        &self,
        issue: &Issue,
        warnings: &mut Vec<String>,
    ) -> (Vec<SectionPlan>, PlanSource) {
        match self.reasoning.plan_sections(issue).await {
            Ok(plan) if !plan.is_empty() => (dedup_plan(plan), PlanSource::Planned),
            Ok(_) => (SectionPlan::default_plan(), PlanSource::DefaultSet),
            Err(err) => {
                tracing::warn!(issue = issue.id, "plan mode failed: {}", err);
                warnings.push(format!("section_plan: {}", err));
                (SectionPlan::default_plan(), PlanSource::Degraded)
            }
        }
    }

    /// Execute one section via its fixed collaborator mapping.
    async fn run_section(&self, issue: &Issue, kind: SectionKind) -> SectionOutcome {
        match kind {
            SectionKind::Essentials => SectionOutcome::produced(essentials_section(issue)),
            SectionKind::FirstStepsChecklist => {
                SectionOutcome::produced(checklist_section(issue))
            }
            SectionKind::ContributionGuidelines => self.guidelines_section(issue).await,
            SectionKind::RepoOverview => self.overview_section(issue).await,
        }
    }

    /// Inspector (guide + text) then Summarize mode. An absent guide is a
    /// definite answer, not a failure.
    async fn guidelines_section(&self, issue: &Issue) -> SectionOutcome {
        let kind = SectionKind::ContributionGuidelines;
        let inspection = match self.inspector.inspect(&issue.repository).await {
            Ok(inspection) => inspection,
            Err(err) => return SectionOutcome::failed(kind, &err),
        };

        let digest = match (
            inspection.contribution_guide_path,
            inspection.contribution_guide_text,
        ) {
            (Some(path), Some(text)) if !text.trim().is_empty() => {
                match self.reasoning.summarize_guidelines(&text).await {
                    Ok(summary) => GuidelineDigest::Found { path, summary },
                    Err(err) => return SectionOutcome::failed(kind, &err),
                }
            }
            _ => GuidelineDigest::NoGuidelineFound,
        };

        SectionOutcome::produced(KitSection {
            name: kind,
            content: SectionContent::Guidelines { digest },
        })
    }

    /// Inspector (listing) then File-suggestion mode. The listing is useful
    /// on its own, so a failed suggestion call degrades to a listing-only
    /// section with a warning instead of dropping the section.
    async fn overview_section(&self, issue: &Issue) -> SectionOutcome {
        let kind = SectionKind::RepoOverview;
        let inspection = match self.inspector.inspect(&issue.repository).await {
            Ok(inspection) => inspection,
            Err(err) => return SectionOutcome::failed(kind, &err),
        };

        match self.reasoning.suggest_files(issue, &inspection).await {
            Ok(raw) => {
                let (suggestions, dropped) = filter_suggestions(raw, &inspection);
                if dropped > 0 {
                    tracing::debug!(
                        issue = issue.id,
                        dropped,
                        "dropped suggested paths missing from listing"
                    );
                }
                SectionOutcome::produced(KitSection {
                    name: kind,
                    content: SectionContent::Overview {
                        entries: inspection.top_level_entries,
                        suggestions,
                    },
                })
            }
            Err(err) => SectionOutcome {
                section: Some(KitSection {
                    name: kind,
                    content: SectionContent::Overview {
                        entries: inspection.top_level_entries,
                        suggestions: Vec::new(),
                    },
                }),
                warnings: vec![section_warning(kind, &err)],
            },
        }
    }
}

/// Keep the first occurrence of each planned kind. The production reasoning
/// service already de-duplicates; the planner enforces it regardless since
/// plan input is untrusted.
fn dedup_plan(plan: Vec<SectionPlan>) -> Vec<SectionPlan> {
    let mut out: Vec<SectionPlan> = Vec::new();
    for entry in plan {
        if !out.iter().any(|p| p.section == entry.section) {
            out.push(entry);
        }
    }
    out
}
