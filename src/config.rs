//! Session and oracle configuration
//!
//! Plain structs with defaults; the binary fills them from CLI flags and
//! environment variables.

use crate::oracle::Language;
use std::time::Duration;

/// Default OpenAI-compatible endpoint for Gemini
pub const DEFAULT_ORACLE_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

pub const DEFAULT_ORACLE_MODEL: &str = "gemini-2.0-flash";

/// Per-session tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Cap on the number of candidates kept after filtering
    pub candidate_limit: Option<usize>,
    /// How many ranked candidates the oracle sees
    pub oracle_top_n: usize,
    pub oracle_timeout: Duration,
    pub language: Language,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            candidate_limit: None,
            oracle_top_n: 50,
            oracle_timeout: Duration::from_secs(10),
            language: Language::En,
        }
    }
}

/// Connection settings for [`crate::oracle::ChatOracle`]
#[derive(Clone, PartialEq)]
pub struct OracleConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl OracleConfig {
    /// Defaults for everything but the key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ORACLE_ENDPOINT.to_string(),
            model: DEFAULT_ORACLE_MODEL.to_string(),
            api_key: api_key.into(),
            temperature: 0.2,
            max_tokens: 96,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

// Hand-written so the key never lands in logs
impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
