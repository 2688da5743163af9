//! Kit Wire-Shape Tests
//!
//! The CLI's `--json` output and any downstream consumer read the kit as
//! JSON, so the serialized shape is a contract: camelCase field names,
//! internally tagged section content, snake_case section names.

use serde_json::Value;

use contrib_navigator_core::{
    assemble, ChecklistItem, GuidelineDigest, GuidelineSummary, Issue, KitSection, OnboardingKit,
    RepositoryRef, SectionContent, SectionKind,
};

fn sample_issue() -> Issue {
    Issue {
        id: 11,
        title: "Clarify install docs".to_string(),
        url: "https://github.com/acme/widget/issues/11".to_string(),
        repository: RepositoryRef::new("acme", "widget"),
        labels: ["help wanted".to_string()].into_iter().collect(),
        language: Some("rust".to_string()),
        body: Some("The install section skips a step.".to_string()),
    }
}

fn sample_kit() -> OnboardingKit {
    let issue = sample_issue();
    let sections = vec![
        KitSection {
            name: SectionKind::Essentials,
            content: SectionContent::Essentials {
                issue_url: issue.url.clone(),
                repo_url: issue.repository.html_url(),
                clone_command: format!("git clone {}", issue.repository.clone_url),
                default_branch: None,
            },
        },
        KitSection {
            name: SectionKind::ContributionGuidelines,
            content: SectionContent::Guidelines {
                digest: GuidelineDigest::Found {
                    path: "CONTRIBUTING.md".to_string(),
                    summary: GuidelineSummary {
                        setup_steps: vec!["cargo build".to_string()],
                        style_notes: vec![],
                        pr_process: vec![],
                    },
                },
            },
        },
        KitSection {
            name: SectionKind::FirstStepsChecklist,
            content: SectionContent::Checklist {
                items: vec![ChecklistItem::new("Read the issue")],
            },
        },
    ];
    assemble(issue, sections, vec!["repo_overview: timed out".to_string()])
}

#[test]
fn test_kit_serializes_with_camel_case_and_tagged_sections() {
    let json: Value = serde_json::to_value(sample_kit()).unwrap();

    assert_eq!(json["issue"]["title"], "Clarify install docs");
    assert!(json["generationWarnings"].is_array());
    assert_eq!(json["generationWarnings"][0], "repo_overview: timed out");

    let sections = json["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0]["name"], "essentials");
    assert_eq!(sections[1]["name"], "contribution_guidelines");
    assert_eq!(sections[2]["name"], "first_steps_checklist");
}

#[test]
fn test_guideline_digest_distinguishes_found_from_absent() {
    let json: Value = serde_json::to_value(sample_kit()).unwrap();
    let digest = &json["sections"][1]["content"]["digest"];
    assert_eq!(digest["status"], "found");
    assert_eq!(digest["path"], "CONTRIBUTING.md");

    let absent = serde_json::to_value(GuidelineDigest::NoGuidelineFound).unwrap();
    assert_eq!(absent["status"], "no_guideline_found");
}

#[test]
fn test_checklist_items_default_unchecked() {
    let json: Value = serde_json::to_value(sample_kit()).unwrap();
    let items = json["sections"][2]["content"]["items"].as_array().unwrap();
    assert_eq!(items[0]["done"], false);
}

#[test]
fn test_kit_round_trips_through_json() {
    let kit = sample_kit();
    let text = serde_json::to_string(&kit).unwrap();
    let back: OnboardingKit = serde_json::from_str(&text).unwrap();
    assert_eq!(back.section_names(), kit.section_names());
    assert_eq!(back.generation_warnings, kit.generation_warnings);
    assert_eq!(back.issue.id, kit.issue.id);
}
