//! Scoring backend location
//!
//! `url` is the backend origin; `/api/*` requests are forwarded there
//! unchanged. The typed client talks to `api_base`, which defaults to
//! `{url}/api/v1` and can be pointed elsewhere on its own.

use serde::Deserialize;

/// Backend connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Backend origin, e.g. `http://localhost:5000`
    pub url: String,
    /// Explicit API base URL, overriding `{url}/api/v1`
    pub api_base: Option<String>,
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            api_base: None,
            timeout_secs: 30,
        }
    }
}

/// Backend settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileBackend {
    pub url: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    /// Create from file config; `env_url` and `env_api_base` win when set
    pub fn from_file(
        file: Option<FileBackend>,
        env_url: Option<String>,
        env_api_base: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let url = env_url.or(file.url).unwrap_or(defaults.url);
        let api_base = env_api_base.or(file.api_base).filter(|s| !s.trim().is_empty());

        Self {
            url: url.trim_end_matches('/').to_string(),
            api_base: api_base.map(|s| s.trim_end_matches('/').to_string()),
            timeout_secs: file
                .timeout_secs
                .filter(|t| *t > 0)
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Base URL of the typed client
    pub fn api_base(&self) -> String {
        match &self.api_base {
            Some(base) => base.clone(),
            None => format!("{}/api/v1", self.url.trim_end_matches('/')),
        }
    }
}
