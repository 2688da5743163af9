//! Contrib Navigator Core
//!
//! Foundational types for the Contrib Navigator workspace: the error
//! taxonomy, the immutable data model, the kit section catalog, the
//! collaborator capability traits, and the pure kit assembler. This crate
//! has zero dependencies on application-level code (HTTP clients, LLM
//! providers, sandbox plumbing).
//!
//! ## Module Organization
//!
//! - `error` - Error taxonomy (`NavError`, `NavResult`)
//! - `model` - Issues, repository references, inspection results
//! - `section` - Section catalog, plans, contents, and the final kit
//! - `collaborators` - Capability traits for the three external collaborators
//! - `assembler` - Pure kit assembly
//!
//! ## Design Principles
//!
//! 1. **Dependency-light** - only serde/serde_json/async-trait/thiserror
//! 2. **Trait-based collaborator seams** - enables mocking and testing
//! 3. **Closed catalogs for untrusted input** - model output is validated
//!    against enums, never dispatched as arbitrary instructions

pub mod assembler;
pub mod collaborators;
pub mod error;
pub mod model;
pub mod section;

// Error types
pub use error::{NavError, NavResult};

// Data model
pub use model::{
    ChecklistItem, EntryKind, FileSuggestion, GuidelineSummary, InspectionResult, Issue,
    RepoEntry, RepositoryRef,
};

// Sections and the final kit
pub use section::{
    GuidelineDigest, KitSection, OnboardingKit, SectionContent, SectionKind, SectionPlan,
};

// Collaborator traits
pub use collaborators::{IssueQuery, IssueSource, RankedIssue, ReasoningService, RepoInspector};

// Kit assembly
pub use assembler::assemble;
