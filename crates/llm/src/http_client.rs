//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with consistent
//! timeouts and identification, shared by the llm and tools crates.

use std::time::Duration;

/// Identifies the application to remote APIs (GitHub requires a User-Agent).
const USER_AGENT: &str = concat!("contrib-navigator/", env!("CARGO_PKG_VERSION"));

/// Connection establishment budget, separate from the per-request budget.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build a `reqwest::Client` with the given per-request timeout.
pub fn build_http_client(request_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(request_timeout)
        .build()
        .expect("failed to build reqwest client")
}
