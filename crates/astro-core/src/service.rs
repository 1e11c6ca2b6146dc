//! AstrologicalService: cache lookup, zodiac resolution, insight composition, horoscope fetch.

use crate::cache::{CacheKey, ResultCache};
use crate::catalog::SignInfo;
use crate::error::AstroError;
use crate::horoscope::HoroscopeClient;
use crate::insight;
use crate::shared::{
    BirthDetails, Clock, ErrorResult, InsightResponse, InsightResult, Language, SystemClock,
};
use crate::zodiac::{self, ZodiacSign};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "Astrological Insight Generator";

/// Standalone horoscope (no insight composition, no caching).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoroscopeReport {
    pub name: String,
    pub zodiac: String,
    pub horoscope_data: String,
    pub generated_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Local>,
    pub service: &'static str,
    pub cached_entries: usize,
}

/// Orchestrates insight generation over an injected cache, horoscope client and clock.
pub struct AstrologicalService {
    cache: Arc<ResultCache>,
    client: Arc<dyn HoroscopeClient>,
    clock: Arc<dyn Clock>,
}

impl AstrologicalService {
    pub fn new(client: Arc<dyn HoroscopeClient>, cache: Arc<ResultCache>) -> Self {
        Self {
            cache,
            client,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Returns today's insight for the subject, from cache when already generated today.
    ///
    /// Never fails: collaborator errors become an [`ErrorResult`] carrying the subject's
    /// name, and are not cached. Concurrent misses on the same key are serialized so the
    /// horoscope is fetched once.
    pub async fn generate_daily_insight(
        &self,
        details: &BirthDetails,
        language: Language,
    ) -> InsightResponse {
        // Key day and generated_at share one clock reading.
        let now = self.clock.now();
        let key = CacheKey::derive(details, now.date_naive(), language);
        if let Some(hit) = self.cache.get(&key) {
            return InsightResponse::Insight(hit);
        }

        let _guard = self.cache.lock_key(&key).await;
        if let Some(hit) = self.cache.get(&key) {
            return InsightResponse::Insight(hit);
        }

        match self.build_insight(details, language, now).await {
            Ok(result) => {
                self.cache.put(key, result.clone());
                InsightResponse::Insight(result)
            }
            Err(e) => {
                tracing::warn!(
                    target: "astro::service",
                    name = %details.name,
                    error = %e,
                    "insight generation failed"
                );
                InsightResponse::Error(ErrorResult {
                    error: format!("Failed to generate insight: {}", e),
                    name: details.name.clone(),
                })
            }
        }
    }

    async fn build_insight(
        &self,
        details: &BirthDetails,
        language: Language,
        now: DateTime<Local>,
    ) -> Result<InsightResult, AstroError> {
        let sign = zodiac::resolve(details.birth_date);
        let insight = insight::compose(details, sign, language);
        let horoscope = self.client.request(&details.name, sign).await?;

        let zodiac = match language {
            Language::Hindi => sign.hindi(),
            Language::English => sign.english(),
        };
        tracing::info!(
            target: "astro::service",
            name = %details.name,
            sign = %sign,
            language = language.code(),
            "daily insight generated"
        );
        Ok(InsightResult {
            name: details.name.clone(),
            zodiac: zodiac.to_string(),
            insight,
            language: language.code().to_string(),
            birth_place: details.birth_place.clone(),
            generated_at: now,
            horoscope: horoscope.horoscope,
        })
    }

    /// Sign profile by English name (case-insensitive).
    pub fn zodiac_info(&self, sign_name: &str) -> Result<SignInfo, AstroError> {
        let sign = ZodiacSign::from_name(sign_name)
            .ok_or_else(|| AstroError::UnknownSign(sign_name.to_string()))?;
        Ok(SignInfo::for_sign(sign))
    }

    /// Fetches a horoscope for a named sign directly, bypassing the cache.
    pub async fn horoscope(&self, name: &str, sign_name: &str) -> Result<HoroscopeReport, AstroError> {
        let sign = ZodiacSign::from_name(sign_name)
            .ok_or_else(|| AstroError::UnknownSign(sign_name.to_string()))?;
        let horoscope = self.client.request(name, sign).await?;
        Ok(HoroscopeReport {
            name: name.to_string(),
            zodiac: sign.english().to_string(),
            horoscope_data: horoscope.horoscope,
            generated_at: self.clock.now(),
        })
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            timestamp: self.clock.now(),
            service: SERVICE_NAME,
            cached_entries: self.cache.len(),
        }
    }
}
