//! Kit Pipeline Integration Tests
//!
//! Drives the full planner through mock collaborators and asserts the
//! degradation contract: a kit is always produced, failed sections become
//! warnings naming the section, and healthy runs carry no warnings.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use contrib_navigator_core::{
    FileSuggestion, GuidelineDigest, GuidelineSummary, InspectionResult, Issue, NavError,
    NavResult, RankedIssue, ReasoningService, RepoEntry, RepoInspector, RepositoryRef,
    SectionContent, SectionKind, SectionPlan,
};
use contrib_navigator_planner::KitPlanner;
use contrib_navigator_tools::MemoizedInspector;

// ============================================================================
// Mock collaborators
// ============================================================================

/// A scriptable reasoning service. `None` in a field scripts that mode to
/// fail with a transport error.
struct ScriptedReasoning {
    plan: Option<Vec<SectionPlan>>,
    summary: Option<GuidelineSummary>,
    suggestions: Option<Vec<FileSuggestion>>,
}

impl ScriptedReasoning {
    fn healthy() -> Self {
        Self {
            plan: Some(
                SectionKind::catalog()
                    .into_iter()
                    .map(|kind| SectionPlan::new(kind, "relevant"))
                    .collect(),
            ),
            summary: Some(GuidelineSummary {
                setup_steps: vec!["cargo build".to_string()],
                style_notes: vec!["run rustfmt".to_string()],
                pr_process: vec!["open a draft PR".to_string()],
            }),
            suggestions: Some(vec![FileSuggestion {
                path: "src".to_string(),
                reason: "implementation lives here".to_string(),
            }]),
        }
    }

    fn unavailable() -> Self {
        Self {
            plan: None,
            summary: None,
            suggestions: None,
        }
    }
}

#[async_trait]
impl ReasoningService for ScriptedReasoning {
    async fn rank_issues(&self, issues: &[Issue]) -> NavResult<RankedIssue> {
        if issues.is_empty() {
            return Err(NavError::validation("no issues to rank"));
        }
        Ok(RankedIssue {
            index: 0,
            rationale: "smallest scope".to_string(),
        })
    }

    async fn plan_sections(&self, _issue: &Issue) -> NavResult<Vec<SectionPlan>> {
        self.plan
            .clone()
            .ok_or_else(|| NavError::reasoning_unavailable("quota exceeded"))
    }

    async fn summarize_guidelines(&self, _guide_text: &str) -> NavResult<GuidelineSummary> {
        self.summary
            .clone()
            .ok_or_else(|| NavError::reasoning_unavailable("quota exceeded"))
    }

    async fn suggest_files(
        &self,
        _issue: &Issue,
        _inspection: &InspectionResult,
    ) -> NavResult<Vec<FileSuggestion>> {
        self.suggestions
            .clone()
            .ok_or_else(|| NavError::reasoning_unavailable("quota exceeded"))
    }
}

/// A scriptable inspector. `None` scripts every inspection to fail with the
/// configured error; the call counter lets memoization tests observe how
/// many inspections actually ran.
struct ScriptedInspector {
    result: Option<InspectionResult>,
    error: fn() -> NavError,
    calls: AtomicUsize,
}

impl ScriptedInspector {
    fn healthy() -> Self {
        Self {
            result: Some(InspectionResult {
                top_level_entries: vec![
                    RepoEntry::file("CONTRIBUTING.md"),
                    RepoEntry::file("Cargo.toml"),
                    RepoEntry::dir("src"),
                ],
                contribution_guide_path: Some("CONTRIBUTING.md".to_string()),
                contribution_guide_text: Some("Please run the tests.".to_string()),
                raw_clone_success: true,
            }),
            error: || NavError::internal("unused"),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(error: fn() -> NavError) -> Self {
        Self {
            result: None,
            error,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RepoInspector for ScriptedInspector {
    async fn inspect(&self, _repo: &RepositoryRef) -> NavResult<InspectionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Some(result) => Ok(result.clone()),
            None => Err((self.error)()),
        }
    }
}

fn sample_issue() -> Issue {
    Issue {
        id: 7,
        title: "Broken link in README".to_string(),
        url: "https://github.com/acme/widget/issues/7".to_string(),
        repository: RepositoryRef::new("acme", "widget").with_default_branch("main"),
        labels: ["good first issue".to_string()].into_iter().collect(),
        language: Some("rust".to_string()),
        body: None,
    }
}

// ============================================================================
// Healthy path
// ============================================================================

#[tokio::test]
async fn test_healthy_run_produces_canonical_sections_without_warnings() {
    let planner = KitPlanner::new(
        Arc::new(ScriptedReasoning::healthy()),
        Arc::new(ScriptedInspector::healthy()),
    );

    let kit = planner.generate_kit(&sample_issue()).await;

    assert_eq!(
        kit.section_names(),
        vec![
            SectionKind::Essentials,
            SectionKind::ContributionGuidelines,
            SectionKind::RepoOverview,
            SectionKind::FirstStepsChecklist,
        ]
    );
    assert!(kit.generation_warnings.is_empty());

    // Essentials must carry the resolved default branch.
    let essentials = kit.section(SectionKind::Essentials).unwrap();
    match &essentials.content {
        SectionContent::Essentials {
            clone_command,
            default_branch,
            ..
        } => {
            assert!(clone_command.contains("git clone"));
            assert_eq!(default_branch.as_deref(), Some("main"));
        }
        other => panic!("unexpected essentials content: {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_generation_is_structurally_stable() {
    let planner = KitPlanner::new(
        Arc::new(ScriptedReasoning::healthy()),
        Arc::new(ScriptedInspector::healthy()),
    );
    let issue = sample_issue();

    let first = planner.generate_kit(&issue).await;
    let second = planner.generate_kit(&issue).await;

    assert_eq!(first.section_names(), second.section_names());
    assert_eq!(first.generation_warnings, second.generation_warnings);
}

// ============================================================================
// Degraded collaborators
// ============================================================================

#[tokio::test]
async fn test_unreachable_inspector_yields_partial_kit_with_two_warnings() {
    let planner = KitPlanner::new(
        Arc::new(ScriptedReasoning::healthy()),
        Arc::new(ScriptedInspector::failing(|| {
            NavError::inspection("sandbox unreachable")
        })),
    );

    let kit = planner.generate_kit(&sample_issue()).await;

    assert_eq!(
        kit.section_names(),
        vec![SectionKind::Essentials, SectionKind::FirstStepsChecklist]
    );
    assert_eq!(kit.generation_warnings.len(), 2);
    assert!(kit.generation_warnings[0].contains("contribution_guidelines"));
    assert!(kit.generation_warnings[1].contains("repo_overview"));
}

#[tokio::test]
async fn test_inspection_timeout_names_only_the_affected_section() {
    let reasoning = ScriptedReasoning {
        plan: Some(vec![
            SectionPlan::new(SectionKind::Essentials, "links first"),
            SectionPlan::new(SectionKind::RepoOverview, "orientation"),
            SectionPlan::new(SectionKind::FirstStepsChecklist, "next actions"),
        ]),
        ..ScriptedReasoning::healthy()
    };
    let planner = KitPlanner::new(
        Arc::new(reasoning),
        Arc::new(ScriptedInspector::failing(|| NavError::InspectionTimeout {
            timeout_secs: 120,
        })),
    );

    let kit = planner.generate_kit(&sample_issue()).await;

    assert_eq!(
        kit.section_names(),
        vec![SectionKind::Essentials, SectionKind::FirstStepsChecklist]
    );
    assert_eq!(kit.generation_warnings.len(), 1);
    assert!(kit.generation_warnings[0].contains("repo_overview"));
}

#[tokio::test]
async fn test_reasoning_outage_still_produces_default_sections() {
    let planner = KitPlanner::new(
        Arc::new(ScriptedReasoning::unavailable()),
        Arc::new(ScriptedInspector::healthy()),
    );

    let kit = planner.generate_kit(&sample_issue()).await;

    // Plan failed, so the default collaborator-free sections run.
    assert_eq!(
        kit.section_names(),
        vec![SectionKind::Essentials, SectionKind::FirstStepsChecklist]
    );
    assert_eq!(kit.generation_warnings.len(), 1);
    assert!(kit.generation_warnings[0].starts_with("section_plan:"));
}

#[tokio::test]
async fn test_missing_guide_produces_explicit_digest() {
    let mut inspector = ScriptedInspector::healthy();
    if let Some(result) = &mut inspector.result {
        result.contribution_guide_path = None;
        result.contribution_guide_text = None;
    }
    let planner = KitPlanner::new(Arc::new(ScriptedReasoning::healthy()), Arc::new(inspector));

    let kit = planner.generate_kit(&sample_issue()).await;

    let guidelines = kit.section(SectionKind::ContributionGuidelines).unwrap();
    assert!(matches!(
        guidelines.content,
        SectionContent::Guidelines {
            digest: GuidelineDigest::NoGuidelineFound
        }
    ));
    assert!(kit.generation_warnings.is_empty());
}

// ============================================================================
// Inspection memoization across sections
// ============================================================================

#[tokio::test]
async fn test_one_clone_serves_both_repo_backed_sections() {
    let inner = Arc::new(ScriptedInspector::healthy());
    let memo = MemoizedInspector::new(Arc::clone(&inner), std::time::Duration::from_secs(60));
    let planner = KitPlanner::new(Arc::new(ScriptedReasoning::healthy()), Arc::new(memo));

    let kit = planner.generate_kit(&sample_issue()).await;

    assert_eq!(kit.sections.len(), 4);
    // Guidelines and overview both needed an inspection; the memo collapsed
    // them into one underlying call.
    assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
}
