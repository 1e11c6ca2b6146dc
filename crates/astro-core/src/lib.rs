//! astro-core: daily astrological insights.
//!
//! Resolves a zodiac sign from a birth date, composes a deterministic trait-based insight,
//! asks a language model for a horoscope paragraph, and caches the bundle per
//! (name, birth date, calendar day, language) until the day rolls over.

mod cache;
mod catalog;
mod config;
mod error;
mod horoscope;
pub mod insight;
mod request;
mod service;
mod shared;
pub mod zodiac;

// Shared types + clock
pub use shared::{
    BirthDetails, Clock, ErrorResult, InsightResponse, InsightResult, Language, SystemClock,
};

// Zodiac table + trait catalog
pub use catalog::{traits_for, SignInfo, TraitSet};
pub use zodiac::ZodiacSign;

// Day-scoped cache
pub use cache::{CacheKey, ResultCache};

// LLM horoscope bridge
pub use horoscope::{parse_horoscope, ChatHoroscopeClient, Horoscope, HoroscopeClient};

// Configuration + errors
pub use config::{AstroConfig, DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_PROMPT};
pub use error::{AstroError, ConfigError, HoroscopeError, InputError};

// Inbound contract + orchestration
pub use request::InsightRequest;
pub use service::{AstrologicalService, HealthStatus, HoroscopeReport, SERVICE_NAME};
