//! Day-scoped result cache.
//!
//! Keys embed the *current* calendar date, so entries go stale at midnight without any
//! sweep: the next day simply computes a different key. Entries are never evicted.

use crate::shared::{BirthDetails, InsightResult, Language};
use chrono::NaiveDate;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// md5 hex digest of `{name}_{birth_date}_{today}_{language}`.
///
/// `today` is the caller's current calendar day, read once per request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(details: &BirthDetails, today: NaiveDate, language: Language) -> Self {
        let raw = format!(
            "{}_{}_{}_{}",
            details.name,
            details.birth_date.format("%Y-%m-%d"),
            today.format("%Y-%m-%d"),
            language.code()
        );
        Self(format!("{:x}", md5::compute(raw.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory result store with per-key compute guards.
///
/// The guard map lets a caller hold exclusive access to one key across an `await`
/// (cache check, horoscope call, store) without blocking other keys.
#[derive(Default)]
pub struct ResultCache {
    entries: DashMap<CacheKey, InsightResult>,
    guards: DashMap<CacheKey, Arc<Mutex<()>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<InsightResult> {
        let hit = self.entries.get(key).map(|r| r.value().clone());
        tracing::debug!(
            target: "astro::cache",
            key = %key,
            hit = hit.is_some(),
            "cache lookup"
        );
        hit
    }

    pub fn put(&self, key: CacheKey, result: InsightResult) {
        tracing::debug!(target: "astro::cache", key = %key, "cache store");
        self.entries.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Acquires the compute guard for `key`. Hold it for the whole miss path.
    pub async fn lock_key(&self, key: &CacheKey) -> OwnedMutexGuard<()> {
        let guard = self
            .guards
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        guard.lock_owned().await
    }
}
