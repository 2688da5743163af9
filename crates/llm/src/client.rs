//! Chat Completions Client
//!
//! Minimal client for an OpenAI-compatible chat-completions endpoint. Every
//! reasoning call mode funnels through [`ChatClient::complete`]: one system
//! prompt, one user prompt, one text reply. Transport and API failures map
//! to `ReasoningUnavailable`; replies the API itself cannot shape map to
//! `MalformedResponse`.

use std::time::Duration;

use serde::Deserialize;

use contrib_navigator_core::{NavError, NavResult};

use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Configuration for the chat client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API key; an empty key fails at call time, not construction time
    pub api_key: String,
    /// Override for OpenAI-compatible endpoints (None = api.openai.com)
    pub base_url: Option<String>,
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token budget
    pub max_tokens: u32,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.4,
            max_tokens: 800,
            request_timeout_secs: 60,
        }
    }
}

/// OpenAI-compatible chat-completions client.
pub struct ChatClient {
    config: ChatConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ChatClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ChatConfig) -> Self {
        let client = build_http_client(Duration::from_secs(config.request_timeout_secs));
        Self { config, client }
    }

    /// Get the API endpoint URL.
    fn endpoint(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the request body for the API.
    ///
    /// `response_format` is pinned to `json_object` since every call mode
    /// expects a parseable JSON reply.
    fn build_request_body(&self, system: &str, user: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ]
        })
    }

    /// Send one completion request and return the reply text.
    pub async fn complete(&self, system: &str, user: &str) -> NavResult<String> {
        if self.config.api_key.is_empty() {
            return Err(missing_api_key_error());
        }

        let body = self.build_request_body(system, user);
        tracing::debug!(model = %self.config.model, "sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                NavError::reasoning_unavailable(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status.as_u16(), &body));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            NavError::malformed(format!("response body did not decode: {}", e))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| NavError::malformed("response contained no message content"))?;

        Ok(content)
    }
}

/// Error for a missing API key.
pub fn missing_api_key_error() -> NavError {
    NavError::reasoning_unavailable("API key not configured")
}

/// Map an HTTP error status to the reasoning error taxonomy.
pub fn parse_http_error(status: u16, body: &str) -> NavError {
    let detail = if body.is_empty() { "(empty body)" } else { body };
    match status {
        401 | 403 => NavError::reasoning_unavailable(format!(
            "authentication failed (HTTP {}): {}",
            status, detail
        )),
        429 => NavError::reasoning_unavailable(format!("rate limited: {}", detail)),
        500..=599 => {
            NavError::reasoning_unavailable(format!("server error (HTTP {}): {}", status, detail))
        }
        _ => NavError::reasoning_unavailable(format!("HTTP {}: {}", status, detail)),
    }
}
