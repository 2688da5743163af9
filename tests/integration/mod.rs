//! Integration Tests Module
//!
//! End-to-end tests for contrib-navigator:
//! - Kit pipeline behavior under healthy and degraded collaborators
//! - Kit serialization shape consumed by the CLI's JSON output
//! - Sandboxed repository inspection against a real local git repository
//!
//! No network or LLM calls are made. Reasoning and inspection are mocked
//! except in the inspector tests, which clone a fixture repo over file://.

// Kit planner degradation and ordering tests
mod kit_pipeline_test;

// Kit JSON wire-shape tests
mod kit_serialization_test;

// Sandbox inspector tests against a local git fixture
mod inspector_test;
