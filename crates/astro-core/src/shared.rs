//! Shared types: birth details, language, result bundles, and the clock.

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Caller-supplied birth details. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthDetails {
    pub name: String,
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub birth_place: String,
}

/// Output language. Selects the display name and the insight text variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// Wire code: "en" or "hi".
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Self::English),
            "hi" => Some(Self::Hindi),
            _ => None,
        }
    }
}

/// A generated daily insight. Stored verbatim in the cache and returned verbatim on a hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResult {
    pub name: String,
    /// Sign display name in the requested language.
    pub zodiac: String,
    pub insight: String,
    pub language: String,
    pub birth_place: String,
    pub generated_at: DateTime<Local>,
    #[serde(rename = "horoscope_by_llm")]
    pub horoscope: String,
}

/// Uniform error record returned at the service boundary. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
    pub name: String,
}

/// Outcome of `generate_daily_insight`: a result bundle or an error record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsightResponse {
    Insight(InsightResult),
    Error(ErrorResult),
}

impl InsightResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn insight(&self) -> Option<&InsightResult> {
        match self {
            Self::Insight(r) => Some(r),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            Self::Insight(_) => None,
            Self::Error(e) => Some(e),
        }
    }
}

/// Source of "now". The cache key's calendar day and every generation timestamp come from here.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
