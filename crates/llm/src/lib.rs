//! Contrib Navigator LLM
//!
//! The LLM Reasoning Service: a single stateless capability exposed to the
//! planner through four typed call modes (rank, plan, summarize,
//! file-suggestion), backed by an OpenAI-compatible chat-completions
//! endpoint. Also includes the shared HTTP client factory.

pub mod client;
pub mod http_client;
pub mod reasoning;

// Re-export main types
pub use client::{missing_api_key_error, parse_http_error, ChatClient, ChatConfig};
pub use http_client::build_http_client;
pub use reasoning::OpenAiReasoning;
