//! Cache configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Cache providers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CacheProvider {
    /// In-memory cache (Moka)
    Moka,
    /// Distributed cache (Redis)
    Redis,
}

/// Cache configuration
///
/// `provider: Redis` activates the tier-2 layer on top of the always-on
/// in-process tier-1 (Moka); the fields below `redis_url` configure that
/// tier-2 connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache enabled
    pub enabled: bool,

    /// Cache provider
    pub provider: CacheProvider,

    /// Default TTL in seconds
    pub default_ttl_secs: u64,

    /// Maximum cache size in bytes
    pub max_size: usize,

    /// Maximum number of entries held in tier-1 before LRU eviction
    pub max_keys: u64,

    /// Memory usage threshold, in megabytes, above which tier-1 sheds entries proactively
    pub memory_threshold_mb: u64,

    /// Compress cached values above a size threshold
    pub compression_enabled: bool,

    /// Queries to issue against the cache on startup to pre-warm it
    pub warmup_queries: Vec<String>,

    /// Redis URL (tier-2, for Redis provider)
    pub redis_url: Option<String>,

    /// Redis connection pool size
    pub redis_pool_size: u32,

    /// Namespace for cache keys
    pub namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: CacheProvider::Moka,
            default_ttl_secs: CACHE_DEFAULT_TTL_SECS,
            max_size: CACHE_DEFAULT_SIZE_LIMIT,
            max_keys: 10_000,
            memory_threshold_mb: 256,
            compression_enabled: false,
            warmup_queries: Vec::new(),
            redis_url: None,
            redis_pool_size: REDIS_POOL_SIZE as u32,
            namespace: "mcb".to_string(),
        }
    }
}
