//! Navigator Configuration
//!
//! Settings are layered: defaults, then an optional JSON file at
//! `~/.contrib-navigator/config.json`, then environment variables. The
//! environment always wins so a shell override works without touching the
//! file. Secrets (`GITHUB_PAT`, `OPENAI_API_KEY`) are read from the
//! environment only and never persisted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use contrib_navigator_core::{NavError, NavResult};

/// Settings that may come from the config file. All fields optional so a
/// partial file merges over the defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
struct FileConfig {
    model: Option<String>,
    base_url: Option<String>,
    temperature: Option<f32>,
    beginner_labels: Option<Vec<String>>,
    clone_timeout_secs: Option<u64>,
    inspection_cache_ttl_secs: Option<u64>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub token, if the user supplied one. Unauthenticated search
    /// works but with a much lower rate limit.
    pub github_token: Option<String>,
    /// OpenAI-compatible API key. Required for reasoning calls; search
    /// alone runs without it.
    pub openai_api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub beginner_labels: Vec<String>,
    pub clone_timeout_secs: u64,
    pub inspection_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            openai_api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            temperature: 0.4,
            beginner_labels: contrib_navigator_tools::default_beginner_labels(),
            clone_timeout_secs: 120,
            inspection_cache_ttl_secs: 600,
        }
    }
}

/// Get the path to the config file.
///
/// Returns `~/.contrib-navigator/config.json`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".contrib-navigator").join("config.json"))
}

impl Config {
    /// Load configuration: defaults, then the config file if present, then
    /// environment variables. A missing file is fine; a file that exists
    /// but does not parse is an error rather than a silent fallback.
    pub fn load() -> NavResult<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                let file: FileConfig = serde_json::from_str(&content).map_err(|e| {
                    NavError::config(format!("failed to parse {}: {}", path.display(), e))
                })?;
                config.apply_file(file);
            }
        }

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(base_url) = file.base_url {
            self.base_url = Some(base_url);
        }
        if let Some(temperature) = file.temperature {
            self.temperature = temperature;
        }
        if let Some(labels) = file.beginner_labels {
            if !labels.is_empty() {
                self.beginner_labels = labels;
            }
        }
        if let Some(secs) = file.clone_timeout_secs {
            self.clone_timeout_secs = secs;
        }
        if let Some(secs) = file.inspection_cache_ttl_secs {
            self.inspection_cache_ttl_secs = secs;
        }
    }

    fn apply_env(&mut self) {
        // GITHUB_PAT preferred; GITHUB_TOKEN accepted for CI convenience.
        self.github_token = non_empty_var("GITHUB_PAT").or_else(|| non_empty_var("GITHUB_TOKEN"));
        self.openai_api_key = non_empty_var("OPENAI_API_KEY");
        if let Some(model) = non_empty_var("OPENAI_MODEL") {
            self.model = model;
        }
        if let Some(base_url) = non_empty_var("OPENAI_BASE_URL") {
            self.base_url = Some(base_url);
        }
    }

    fn validate(&self) -> NavResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(NavError::config(format!(
                "temperature {} out of range 0.0..=2.0",
                self.temperature
            )));
        }
        if self.clone_timeout_secs == 0 {
            return Err(NavError::config("clone_timeout_secs must be non-zero"));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
