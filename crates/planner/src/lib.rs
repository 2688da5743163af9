//! Kit planning for contrib-navigator.
//!
//! This crate owns the agentic loop that turns a chosen issue into an
//! onboarding kit: planning which sections to produce, executing each one
//! against the reasoning and inspection collaborators, and degrading
//! per section when a collaborator fails.

pub mod pipeline;
pub mod sections;

pub use pipeline::KitPlanner;
