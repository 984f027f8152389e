//! Redis distributed cache provider
//!
//! Distributed cache implementation using Redis as the backend.
//! Suitable for multi-instance deployments (Tier 2 of the two-tier cache).
//!
//! ## Features
//!
//! - Distributed caching for multiple instances
//! - TTL support for automatic expiration
//! - Connection pooling via multiplexed connection
//!
//! ## Example
//!
//! ```ignore
//! use runbook_providers::cache::RedisCacheProvider;
//!
//! let provider = RedisCacheProvider::new("redis://localhost:6379")?;
//! // Or with host/port
//! let provider = RedisCacheProvider::with_host_port("localhost", 6379)?;
//! ```

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use runbook_domain::error::{Error, Result};
use runbook_domain::ports::providers::{CacheEntryConfig, CacheProvider, CacheStats};
use std::sync::{Arc, RwLock};

/// Redis cache provider
///
/// Distributed cache implementation using Redis.
/// Uses multiplexed connections for efficient connection reuse.
#[derive(Clone)]
pub struct RedisCacheProvider {
    client: Client,
    stats: Arc<RwLock<CacheStats>>,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider with connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Example
    ///
    /// ```ignore
    /// let provider = RedisCacheProvider::new("redis://localhost:6379")?;
    /// ```
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string)
            .map_err(|e| Error::cache(format!("failed to create Redis client: {e}")))?;

        Ok(Self {
            client,
            stats: Arc::new(RwLock::new(CacheStats::new())),
        })
    }

    /// Create a new Redis cache provider with host and port
    ///
    /// # Arguments
    ///
    /// * `host` - Redis server hostname
    /// * `port` - Redis server port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Get a connection from the pool
    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::cache(format!("failed to get Redis connection: {e}")))
    }

    /// Record a cache hit
    fn record_hit(&self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.hits += 1;
            stats.hit_rate = stats.calculate_hit_rate();
        }
    }

    /// Record a cache miss
    fn record_miss(&self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.misses += 1;
            stats.hit_rate = stats.calculate_hit_rate();
        }
    }

    /// Get the Redis server address description
    pub fn server_address(&self) -> String {
        "redis-server".to_string()
    }

    /// Check if the Redis connection uses TLS
    pub fn is_tls(&self) -> bool {
        false
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                self.record_hit();
                Ok(Some(value))
            }
            Ok(None) => {
                self.record_miss();
                Ok(None)
            }
            Err(e) => Err(Error::cache(format!("Redis GET failed: {e}"))),
        }
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let ttl_seconds = config.effective_ttl().as_secs();

        let result: redis::RedisResult<()> = if ttl_seconds > 0 {
            conn.set_ex(key, value, ttl_seconds).await
        } else {
            conn.set(key, value).await
        };

        result.map_err(|e| Error::cache(format!("Redis SET failed: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let deleted: redis::RedisResult<i32> = conn.del(key).await;
        match deleted {
            Ok(count) => Ok(count > 0),
            Err(e) => Err(Error::cache(format!("Redis DEL failed: {e}"))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let exists: redis::RedisResult<i32> = conn.exists(key).await;
        match exists {
            Ok(count) => Ok(count > 0),
            Err(e) => Err(Error::cache(format!("Redis EXISTS failed: {e}"))),
        }
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;

        redis::cmd("FLUSHDB")
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::cache(format!("Redis FLUSHDB failed: {e}")))
    }

    async fn stats(&self) -> Result<CacheStats> {
        let mut conn = self.get_connection().await?;

        let dbsize: redis::RedisResult<usize> = redis::cmd("DBSIZE").query_async(&mut conn).await;
        let dbsize = dbsize.unwrap_or(0);

        let mut internal_stats = self
            .stats
            .read()
            .map_err(|_| Error::cache("failed to read cache stats (lock poisoned)"))?
            .clone();

        internal_stats.entries = dbsize as u64;

        Ok(internal_stats)
    }

    async fn size(&self) -> Result<usize> {
        let mut conn = self.get_connection().await?;

        let dbsize: redis::RedisResult<usize> = redis::cmd("DBSIZE").query_async(&mut conn).await;
        dbsize.map_err(|e| Error::cache(format!("Redis DBSIZE failed: {e}")))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("server", &self.server_address())
            .field("tls", &self.is_tls())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_port_constructor_builds_expected_url() {
        // Client::open validates the URL scheme but doesn't connect, so this
        // exercises the URL construction without requiring a live server.
        let provider = RedisCacheProvider::with_host_port("localhost", 6379);
        assert!(provider.is_ok());
    }
}
