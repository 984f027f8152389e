//! Moka in-memory cache provider
//!
//! High-performance, concurrent in-memory cache implementation using Moka.
//! Serves as Tier 1 of the two-tier search cache (see spec's cache module):
//! fast, process-local, short TTL.
//!
//! ## Example
//!
//! ```ignore
//! use runbook_providers::cache::MokaCacheProvider;
//! use std::time::Duration;
//!
//! let provider = MokaCacheProvider::with_config(1000, Duration::from_secs(300));
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use runbook_domain::error::{Error, Result};
use runbook_domain::ports::providers::{CacheEntryConfig, CacheProvider, CacheStats, TaggedCacheProvider};

use crate::constants::CACHE_DEFAULT_SIZE_LIMIT;

/// Moka-based in-memory cache provider
///
/// Uses the Moka crate for high-performance concurrent caching. Tracks its
/// own hit/miss counters since Moka itself does not expose them, and a tag
/// index for the tag-based invalidation `TaggedCacheProvider` requires.
pub struct MokaCacheProvider {
    cache: Cache<String, Vec<u8>>,
    max_size: usize,
    tags: DashMap<String, Vec<String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for MokaCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheProvider {
    /// Create a new Moka cache provider with default settings
    pub fn new() -> Self {
        Self::with_capacity(CACHE_DEFAULT_SIZE_LIMIT)
    }

    /// Create a new Moka cache provider with specified capacity
    pub fn with_capacity(max_size: usize) -> Self {
        let cache = Cache::builder().max_capacity(max_size as u64).build();
        Self {
            cache,
            max_size,
            tags: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Create a new Moka cache provider with custom configuration
    pub fn with_config(max_size: usize, time_to_live: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_size as u64)
            .time_to_live(time_to_live)
            .build();

        Self {
            cache,
            max_size,
            tags: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get the maximum capacity of the cache
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        if let Some(bytes) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            let json = String::from_utf8(bytes)
                .map_err(|e| Error::cache(format!("invalid UTF-8 in cached value: {e}")))?;
            Ok(Some(json))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }
    }

    async fn set_json(&self, key: &str, value: &str, _config: CacheEntryConfig) -> Result<()> {
        let bytes = value.as_bytes();

        if bytes.len() > self.max_size {
            return Err(Error::cache(format!(
                "cache value size {} exceeds maximum size {}",
                bytes.len(),
                self.max_size
            )));
        }

        self.cache.insert(key.to_string(), bytes.to_vec()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.cache.contains_key(key);
        self.cache.invalidate(key).await;
        Ok(existed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        self.tags.clear();
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        self.cache.run_pending_tasks().await;
        let entries = self.cache.entry_count();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);

        let mut stats = CacheStats {
            hits,
            misses,
            entries,
            hit_rate: 0.0,
            bytes_used: 0,
        };
        stats.hit_rate = stats.calculate_hit_rate();
        Ok(stats)
    }

    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

#[async_trait]
impl TaggedCacheProvider for MokaCacheProvider {
    async fn tag(&self, key: &str, tag: &str) -> Result<()> {
        self.tags.entry(tag.to_string()).or_default().push(key.to_string());
        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> Result<u64> {
        let Some((_, keys)) = self.tags.remove(tag) else {
            return Ok(0);
        };
        let mut count = 0u64;
        for key in keys {
            if self.cache.contains_key(&key) {
                self.cache.invalidate(&key).await;
                count += 1;
            }
        }
        Ok(count)
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_size", &self.max_size)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let provider = MokaCacheProvider::new();
        provider
            .set_json("k", "\"v\"", CacheEntryConfig::default())
            .await
            .unwrap();
        assert_eq!(provider.get_json("k").await.unwrap(), Some("\"v\"".to_string()));
    }

    #[tokio::test]
    async fn tag_invalidation_removes_tagged_keys_only() {
        let provider = MokaCacheProvider::new();
        provider.set_json("a", "1", CacheEntryConfig::default()).await.unwrap();
        provider.set_json("b", "2", CacheEntryConfig::default()).await.unwrap();
        provider.tag("a", "source:wiki").await.unwrap();

        let removed = provider.invalidate_tag("source:wiki").await.unwrap();
        assert_eq!(removed, 1);
        assert!(!provider.exists("a").await.unwrap());
        assert!(provider.exists("b").await.unwrap());
    }
}
