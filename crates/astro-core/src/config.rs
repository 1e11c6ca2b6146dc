//! LLM bridge configuration loaded from `astro_config.toml` with environment overrides.
//!
//! | Env | Overrides |
//! |-----|-----------|
//! | ASTRO_LLM_API_KEY, then GROQ_API_KEY | `api_key` |
//! | ASTRO_LLM_MODEL | `model` |
//! | ASTRO_LLM_API_URL | `api_base` |

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "qwen/qwen3-32b";

pub const DEFAULT_PROMPT: &str = "You are an astrologer. Write today's horoscope for {name}, \
whose zodiac sign is {zodiac}. Keep it to one short paragraph. \
Respond with JSON only, in the form {\"horoscope\": \"<paragraph>\"}.";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    2
}

/// Settings for the horoscope language-model collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstroConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// OpenAI-compatible base URL (without `/chat/completions`).
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Prompt template; `{name}` and `{zodiac}` are substituted.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after the first on transport errors, 429 and 5xx.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for AstroConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            prompt: default_prompt(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl AstroConfig {
    pub fn default_path() -> PathBuf {
        PathBuf::from("astro_config.toml")
    }

    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(&Self::default_path())?.with_env_overrides())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(
                target: "astro::config",
                path = %path.display(),
                "config file not found; using defaults"
            );
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Environment values win over file values; blank variables are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_opt_string("ASTRO_LLM_API_KEY").or_else(|| env_opt_string("GROQ_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = env_opt_string("ASTRO_LLM_MODEL") {
            self.model = model;
        }
        if let Some(url) = env_opt_string("ASTRO_LLM_API_URL") {
            self.api_base = url;
        }
        self
    }

    /// Trimmed, non-empty API key.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
