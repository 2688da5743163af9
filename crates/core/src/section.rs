//! Kit Sections
//!
//! The closed catalog of kit section kinds, the plan entries the reasoning
//! service produces, and the structured section payloads the planner emits.
//!
//! Plan mode output comes from an untrusted oracle, so section names are
//! validated against the closed `SectionKind` catalog; anything the catalog
//! does not recognize is dropped rather than dispatched.

use serde::{Deserialize, Serialize};

use crate::model::{ChecklistItem, FileSuggestion, GuidelineSummary, Issue, RepoEntry};

// ============================================================================
// Section Catalog
// ============================================================================

/// The closed catalog of recognized kit sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Issue and repository links plus clone instructions. Derived purely
    /// from the issue; never fails.
    Essentials,
    /// Summarized contribution guide.
    ContributionGuidelines,
    /// Top-level repository listing with suggested files for the issue.
    RepoOverview,
    /// Fixed-template first contribution checklist.
    FirstStepsChecklist,
}

impl SectionKind {
    /// Parse a section name as emitted by Plan mode.
    ///
    /// Case-insensitive; hyphens and spaces are accepted in place of
    /// underscores. Returns `None` for anything outside the catalog.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "essentials" => Some(SectionKind::Essentials),
            "contribution_guidelines" => Some(SectionKind::ContributionGuidelines),
            "repo_overview" => Some(SectionKind::RepoOverview),
            "first_steps_checklist" => Some(SectionKind::FirstStepsChecklist),
            _ => None,
        }
    }

    /// All catalog kinds in canonical kit order.
    pub fn catalog() -> [SectionKind; 4] {
        [
            SectionKind::Essentials,
            SectionKind::ContributionGuidelines,
            SectionKind::RepoOverview,
            SectionKind::FirstStepsChecklist,
        ]
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Essentials => write!(f, "essentials"),
            SectionKind::ContributionGuidelines => write!(f, "contribution_guidelines"),
            SectionKind::RepoOverview => write!(f, "repo_overview"),
            SectionKind::FirstStepsChecklist => write!(f, "first_steps_checklist"),
        }
    }
}

// ============================================================================
// Section Plan
// ============================================================================

/// One planned section with the model's rationale for including it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPlan {
    /// Which section to produce
    pub section: SectionKind,
    /// Why the model planned it (free text, informational only)
    pub rationale: String,
}

impl SectionPlan {
    pub fn new(section: SectionKind, rationale: impl Into<String>) -> Self {
        Self {
            section,
            rationale: rationale.into(),
        }
    }

    /// The fallback plan used when Plan mode fails or returns nothing:
    /// the two sections that require no external collaborator.
    pub fn default_plan() -> Vec<SectionPlan> {
        vec![
            SectionPlan::new(SectionKind::Essentials, "default section set"),
            SectionPlan::new(SectionKind::FirstStepsChecklist, "default section set"),
        ]
    }
}

// ============================================================================
// Section Content
// ============================================================================

/// Summarized contribution guide, or an explicit not-found marker.
///
/// `NoGuidelineFound` is a first-class value: the summarizer is never asked
/// to invent content for an absent guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GuidelineDigest {
    Found {
        /// Repository-relative path of the guide
        path: String,
        summary: GuidelineSummary,
    },
    NoGuidelineFound,
}

/// Structured payload of one kit section, specific to its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Essentials {
        issue_url: String,
        repo_url: String,
        clone_command: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        default_branch: Option<String>,
    },
    Guidelines {
        digest: GuidelineDigest,
    },
    Overview {
        entries: Vec<RepoEntry>,
        /// Validated suggestions; every path is a member of `entries`.
        suggestions: Vec<FileSuggestion>,
    },
    Checklist {
        items: Vec<ChecklistItem>,
    },
}

/// One produced kit section. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitSection {
    /// Section kind; doubles as the section's name in warnings
    pub name: SectionKind,
    /// Kind-specific structured payload
    pub content: SectionContent,
}

// ============================================================================
// Onboarding Kit
// ============================================================================

/// The final artifact: the selected issue, its produced sections in plan
/// order, and one warning per section that failed or degraded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingKit {
    pub issue: Issue,
    pub sections: Vec<KitSection>,
    pub generation_warnings: Vec<String>,
}

impl OnboardingKit {
    /// Look up a section by kind.
    pub fn section(&self, kind: SectionKind) -> Option<&KitSection> {
        self.sections.iter().find(|s| s.name == kind)
    }

    /// Whether a section of the given kind was produced.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.section(kind).is_some()
    }

    /// Section kinds in produced order.
    pub fn section_names(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.name).collect()
    }
}
