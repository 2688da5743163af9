//! Contrib Navigator Tools
//!
//! Production implementations of the two non-LLM collaborators:
//!
//! - `issue_source` - GitHub-backed Issue Source Adapter (read-only search)
//! - `inspector` - sandboxed shallow-clone Repository Inspector
//! - `memo` - per-session memoization wrapper for inspections

pub mod inspector;
pub mod issue_source;
pub mod memo;

// Re-export main types
pub use inspector::{InspectorConfig, SandboxInspector};
pub use issue_source::{default_beginner_labels, GithubConfig, GithubIssueSource};
pub use memo::MemoizedInspector;
