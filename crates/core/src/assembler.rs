//! Kit Assembler
//!
//! Pure data-shaping step turning the planner's accumulated section results
//! and warnings into the final `OnboardingKit`. No I/O and no recoverable
//! failure modes; input-shape violations are programming errors.

use crate::model::Issue;
use crate::section::{KitSection, OnboardingKit};

/// Assemble the final kit.
///
/// `sections` must already be in plan order with at most one section per
/// kind; the planner guarantees both. Warnings are carried through verbatim.
pub fn assemble(issue: Issue, sections: Vec<KitSection>, warnings: Vec<String>) -> OnboardingKit {
    debug_assert!(
        {
            let mut seen = std::collections::HashSet::new();
            sections.iter().all(|s| seen.insert(s.name))
        },
        "duplicate section kinds in assembled kit"
    );

    OnboardingKit {
        issue,
        sections,
        generation_warnings: warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RepositoryRef;
    use crate::section::{SectionContent, SectionKind};

    fn sample_issue() -> Issue {
        Issue {
            id: 1,
            title: "Fix typo".to_string(),
            url: "https://github.com/acme/widget/issues/1".to_string(),
            repository: RepositoryRef::new("acme", "widget"),
            labels: Default::default(),
            language: None,
            body: None,
        }
    }

    fn essentials_section() -> KitSection {
        KitSection {
            name: SectionKind::Essentials,
            content: SectionContent::Essentials {
                issue_url: "https://github.com/acme/widget/issues/1".to_string(),
                repo_url: "https://github.com/acme/widget".to_string(),
                clone_command: "git clone https://github.com/acme/widget.git".to_string(),
                default_branch: None,
            },
        }
    }

    #[test]
    fn test_assemble_preserves_order_and_warnings() {
        let checklist = KitSection {
            name: SectionKind::FirstStepsChecklist,
            content: SectionContent::Checklist { items: vec![] },
        };
        let kit = assemble(
            sample_issue(),
            vec![essentials_section(), checklist],
            vec!["repo_overview: inspection failed".to_string()],
        );
        assert_eq!(
            kit.section_names(),
            vec![SectionKind::Essentials, SectionKind::FirstStepsChecklist]
        );
        assert_eq!(kit.generation_warnings.len(), 1);
        assert!(kit.generation_warnings[0].starts_with("repo_overview"));
    }

    #[test]
    fn test_assemble_empty_sections_is_valid() {
        let kit = assemble(sample_issue(), vec![], vec![]);
        assert!(kit.sections.is_empty());
        assert!(kit.generation_warnings.is_empty());
    }
}
