//! Core Error Types
//!
//! Defines the error taxonomy shared across the Contrib Navigator workspace.
//! The taxonomy distinguishes collaborator failures by origin so the kit
//! planner can decide which failures are recoverable per section:
//!
//! - `SourceUnavailable` - the issue tracker could not be reached
//! - `ReasoningUnavailable` / `MalformedResponse` - LLM transport or shape failures
//! - `InspectionTimeout` / `InspectionFailure` - sandboxed clone failures
//!
//! These error types are dependency-free (only thiserror + serde_json + std)
//! to keep the core crate lightweight.

use thiserror::Error;

/// Error type for the Contrib Navigator workspace.
#[derive(Error, Debug)]
pub enum NavError {
    /// The issue tracker could not be reached or rejected the query.
    #[error("Issue source unavailable: {0}")]
    SourceUnavailable(String),

    /// The reasoning service could not be reached (network, quota, auth).
    #[error("Reasoning service unavailable: {0}")]
    ReasoningUnavailable(String),

    /// The reasoning service replied, but the reply does not parse to the
    /// expected shape.
    #[error("Malformed reasoning response: {0}")]
    MalformedResponse(String),

    /// The sandboxed repository inspection exceeded its time budget.
    #[error("Repository inspection timed out after {timeout_secs}s")]
    InspectionTimeout { timeout_secs: u64 },

    /// The sandboxed repository inspection failed (clone error, sandbox setup).
    #[error("Repository inspection failed: {0}")]
    InspectionFailure(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for navigator errors
pub type NavResult<T> = Result<T, NavError>;

impl NavError {
    /// Create a source-unavailable error
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Create a reasoning-unavailable error
    pub fn reasoning_unavailable(msg: impl Into<String>) -> Self {
        Self::ReasoningUnavailable(msg.into())
    }

    /// Create a malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an inspection-failure error
    pub fn inspection(msg: impl Into<String>) -> Self {
        Self::InspectionFailure(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this failure is recoverable within a single kit section.
    ///
    /// Section-recoverable failures are contained by the planner: the section
    /// is degraded or omitted with a warning, and later sections still run.
    pub fn is_section_recoverable(&self) -> bool {
        matches!(
            self,
            NavError::ReasoningUnavailable(_)
                | NavError::MalformedResponse(_)
                | NavError::InspectionTimeout { .. }
                | NavError::InspectionFailure(_)
        )
    }
}

/// Convert NavError to a string
impl From<NavError> for String {
    fn from(err: NavError) -> String {
        err.to_string()
    }
}
