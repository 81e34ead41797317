use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::models::SearchVenuesRequest;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process cache of serialized query responses.
///
/// The catalog fakes backend latency on every read, so identical queries
/// within the TTL are served straight from here. One process, one tier;
/// entries are JSON bytes so any response type fits.
pub struct ResponseCache {
    l1_cache: moka::future::Cache<String, Vec<u8>>,
}

impl ResponseCache {
    pub fn new(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { l1_cache }
    }

    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: DeserializeOwned,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.l1_cache.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop every entry. Used after a mutation; cheaper than tracking which
    /// of the per-filter key variants a change invalidates.
    pub fn purge(&self) {
        self.l1_cache.invalidate_all();
        tracing::debug!("Cache purged");
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a venue search request
    pub fn venue_search(request: &SearchVenuesRequest) -> String {
        let filters = &request.filters;
        format!(
            "venues:search:{}:{}:{}:{}-{}:{}:{}:{}:{}:{}",
            filters.query,
            filters.location,
            filters.category,
            filters.price_range.0,
            filters.price_range.1,
            filters.min_rating,
            filters.features.join(","),
            filters.open_now,
            request.sort,
            request.limit,
        )
    }

    /// Build a cache key for the popular venues list
    pub fn popular_venues() -> String {
        "venues:popular".to_string()
    }

    /// Build a cache key for a venue's reviews
    pub fn reviews(venue_id: &str, band: &str, sort: &str) -> String {
        format!("reviews:{}:{}:{}", venue_id, band, sort)
    }

    /// Build a cache key for Pay Later history
    pub fn history(query: &str, status: &str, order: &str) -> String {
        format!("paylater:history:{}:{}:{}", query, status, order)
    }

    /// Build a cache key for the friends list
    pub fn friends(query: &str, status: &str) -> String {
        format!("friends:{}:{}", query, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = ResponseCache::new(100, 60);

        cache.set("test_key", &"test_value").await.unwrap();
        let result: String = cache.get("test_key").await.unwrap();
        assert_eq!(result, "test_value");
    }

    #[tokio::test]
    async fn test_purge_drops_entries() {
        let cache = ResponseCache::new(100, 60);

        cache.set("test_key", &"test_value").await.unwrap();
        cache.purge();

        assert!(cache.get::<String>("test_key").await.is_err());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::reviews("1", "all", "newest"), "reviews:1:all:newest");
        assert_eq!(
            CacheKey::history("sky", "paid", "desc"),
            "paylater:history:sky:paid:desc"
        );
        assert_eq!(CacheKey::friends("", "online"), "friends::online");
        assert_eq!(CacheKey::popular_venues(), "venues:popular");
    }

    #[test]
    fn test_venue_search_keys_differ_by_filter() {
        let base = SearchVenuesRequest::default();
        let mut filtered = SearchVenuesRequest::default();
        filtered.filters.query = "sky".to_string();

        assert_ne!(
            CacheKey::venue_search(&base),
            CacheKey::venue_search(&filtered)
        );
    }
}
