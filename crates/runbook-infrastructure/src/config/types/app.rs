//! Main application configuration

use runbook_domain::value_objects::AdapterConfig;
use serde::{Deserialize, Serialize};

// Re-export all config types
pub use super::{
    auth::{AdminApiKeyConfig, ApiKeyConfig, AuthConfig, JwtConfig, PasswordAlgorithm},
    cache::{CacheConfig, CacheProvider},
    limits::LimitsConfig,
    logging::LoggingConfig,
    metrics::MetricsConfig,
    server::{
        ServerConfig, ServerCorsConfig, ServerNetworkConfig, ServerSslConfig, ServerTimeoutConfig,
        TransportMode,
    },
    snapshot::SnapshotConfig,
};

/// Semantic embedding configuration
///
/// Selects the embedding provider used by the hybrid scorer and its
/// fallback behavior; provider-specific connection details (API keys,
/// base URLs) are resolved via the credential store, not stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name, e.g. "fastembed", "openai", "ollama", "null"
    pub provider: String,

    /// Model identifier understood by the selected provider
    pub model: String,

    /// Expected embedding dimensionality
    pub dimensions: usize,

    /// Fall back to fuzzy-only search when the embedding path fails
    pub fallback_on_failure: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "null".to_string(),
            model: "default".to_string(),
            dimensions: 384,
            fallback_on_failure: true,
        }
    }
}

/// Maximum document and response payload sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSizeConfig {
    /// Documents larger than this are truncated with an ellipsis sentinel
    pub max_document_bytes: u64,

    /// Responses larger than this fail with `OVERSIZED_PAYLOAD`
    pub max_response_bytes: u64,
}

impl Default for LimitsSizeConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: runbook_domain::constants::DEFAULT_MAX_DOCUMENT_BYTES,
            max_response_bytes: runbook_domain::constants::DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// Main application configuration
///
/// Deserialized from TOML (`--config <path>`) and overlaid with
/// `MCB_`-prefixed environment variables. Unknown fields and missing
/// required fields both fail with a `CONFIG` error at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Two-tier cache configuration
    pub cache: CacheConfig,

    /// Embedding / semantic search configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Document and payload size limits
    #[serde(default)]
    pub sizes: LimitsSizeConfig,

    /// Metrics configuration
    pub metrics: MetricsConfig,

    /// Snapshot persistence configuration
    pub snapshot: SnapshotConfig,

    /// Configured source adapters
    #[serde(default)]
    pub adapters: Vec<AdapterConfig>,
}
