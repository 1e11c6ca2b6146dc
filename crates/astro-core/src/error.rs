//! Error types for the astro core.

use thiserror::Error;

/// Failures of the horoscope language-model collaborator.
#[derive(Error, Debug)]
pub enum HoroscopeError {
    #[error("no LLM API key configured (set ASTRO_LLM_API_KEY or GROQ_API_KEY)")]
    MissingApiKey,

    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM reply could not be parsed as a horoscope payload: {0}")]
    Unparsable(String),
}

/// Malformed inbound birth details. Raised only by request parsing, before the core runs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date/time format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Errors raised inside the core. Converted to an error record at the service boundary.
#[derive(Error, Debug)]
pub enum AstroError {
    #[error(transparent)]
    Horoscope(#[from] HoroscopeError),

    #[error("Zodiac sign '{0}' not found")]
    UnknownSign(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
