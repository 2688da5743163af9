//! Section Builders
//!
//! Pure helpers for the planner: the two collaborator-free sections
//! (essentials, first-steps checklist), suggestion validation, and warning
//! formatting. Everything here is deterministic and infallible.

use contrib_navigator_core::{
    ChecklistItem, FileSuggestion, InspectionResult, Issue, KitSection, NavError, SectionContent,
    SectionKind,
};

/// Build the essentials section from the issue alone. Never fails, which is
/// what guarantees a kit is always produced.
pub fn essentials_section(issue: &Issue) -> KitSection {
    let repo = &issue.repository;
    KitSection {
        name: SectionKind::Essentials,
        content: SectionContent::Essentials {
            issue_url: issue.url.clone(),
            repo_url: repo.html_url(),
            clone_command: format!("git clone {}", repo.clone_url),
            default_branch: repo.default_branch.clone(),
        },
    }
}

/// Build the first-steps checklist from the fixed template plus the issue.
pub fn checklist_section(issue: &Issue) -> KitSection {
    let items = vec![
        ChecklistItem::new(format!("Read the issue and its discussion: {}", issue.url)),
        ChecklistItem::new(format!(
            "Clone the repository: git clone {}",
            issue.repository.clone_url
        )),
        ChecklistItem::new("Read the project's contribution guidelines"),
        ChecklistItem::new("Set up the project locally and run its test suite"),
        ChecklistItem::new("Comment on the issue so maintainers know you are working on it"),
        ChecklistItem::new("Open a draft pull request early to gather feedback"),
    ];
    KitSection {
        name: SectionKind::FirstStepsChecklist,
        content: SectionContent::Checklist { items },
    }
}

/// Drop suggested paths that are not members of the inspection's top-level
/// listing. Hallucinated paths are a recoverable data-quality issue, not an
/// error; returns the kept suggestions and how many were dropped.
pub fn filter_suggestions(
    suggestions: Vec<FileSuggestion>,
    inspection: &InspectionResult,
) -> (Vec<FileSuggestion>, usize) {
    let total = suggestions.len();
    let kept: Vec<FileSuggestion> = suggestions
        .into_iter()
        .filter(|s| inspection.contains(&s.path))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

/// Warning string naming the failed section, as surfaced to the user via
/// `generation_warnings`.
pub fn section_warning(kind: SectionKind, err: &NavError) -> String {
    format!("{}: {}", kind, err)
}
