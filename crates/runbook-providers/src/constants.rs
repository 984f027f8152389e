//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in runbook-domain) and infrastructure constants.

// ============================================================================
// EMBEDDING PROVIDER CONSTANTS
// ============================================================================

/// Null embedding provider dimension (for testing)
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// FastEmbed default dimension (BAAI/bge models)
pub const EMBEDDING_DIMENSION_FASTEMBED_DEFAULT: usize = 384;

/// OpenAI text-embedding-3-small dimension
pub const EMBEDDING_DIMENSION_OPENAI_SMALL: usize = 1536;

/// OpenAI text-embedding-3-large dimension
pub const EMBEDDING_DIMENSION_OPENAI_LARGE: usize = 3072;

/// OpenAI text-embedding-ada-002 dimension
pub const EMBEDDING_DIMENSION_OPENAI_ADA: usize = 1536;

/// VoyageAI default dimension
pub const EMBEDDING_DIMENSION_VOYAGEAI_DEFAULT: usize = 1024;

/// VoyageAI code model dimension
pub const EMBEDDING_DIMENSION_VOYAGEAI_CODE: usize = 1024;

/// Ollama nomic-embed-text dimension
pub const EMBEDDING_DIMENSION_OLLAMA_NOMIC: usize = 768;

/// Ollama default dimension
pub const EMBEDDING_DIMENSION_OLLAMA_DEFAULT: usize = 768;

/// Gemini embedding dimension
pub const EMBEDDING_DIMENSION_GEMINI: usize = 768;

// ============================================================================
// EMBEDDING API CONSTANTS
// ============================================================================

/// OpenAI max tokens per request
pub const OPENAI_MAX_TOKENS_PER_REQUEST: usize = 8191;

/// VoyageAI max input tokens
pub const VOYAGEAI_MAX_INPUT_TOKENS: usize = 16000;

/// Ollama server default port
pub const OLLAMA_DEFAULT_PORT: u16 = 11434;

// ============================================================================
// CACHE PROVIDER CONSTANTS
// ============================================================================

/// Default cache TTL in seconds (1 hour)
pub const CACHE_DEFAULT_TTL_SECS: u64 = 3600;

/// Default cache size limit in bytes (100MB)
pub const CACHE_DEFAULT_SIZE_LIMIT: usize = 100 * 1024 * 1024;

/// Redis default port
pub const REDIS_DEFAULT_PORT: u16 = 6379;

/// Cache namespace separator
pub const CACHE_NAMESPACE_SEPARATOR: &str = ":";

// ============================================================================
// EVENTS PROVIDER CONSTANTS
// ============================================================================

/// NATS default connection timeout in seconds
pub const NATS_CONNECT_TIMEOUT_SECS: u64 = 10;

/// NATS default request timeout in seconds
pub const NATS_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Event bus buffer size
pub const EVENT_BUS_BUFFER_SIZE: usize = 1000;

// ============================================================================
// CRYPTO CONSTANTS
// ============================================================================

/// AES-GCM key size in bytes
pub const AES_GCM_KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes
pub const AES_GCM_NONCE_SIZE: usize = 12;

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP request timeout in seconds (for embedding API calls, HTTP adapter)
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client maximum idle connections per host
pub const HTTP_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client idle connection timeout in seconds
pub const HTTP_CLIENT_IDLE_TIMEOUT_SECS: u64 = 90;

/// HTTP TCP keep-alive interval in seconds
pub const HTTP_KEEPALIVE_SECS: u64 = 60;

// ============================================================================
// SOURCE ADAPTER CONSTANTS
// ============================================================================

/// Default per-adapter operation timeout in milliseconds
pub const ADAPTER_DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Default consecutive-failure threshold before an adapter is marked unhealthy
pub const ADAPTER_DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Default refresh interval for file/repo/wiki adapters, in seconds
pub const ADAPTER_DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Conservative per-hour request quota applied to Repo/Wiki adapters, as a
/// fraction of a typical upstream API rate limit. This service never tries
/// to exhaust an upstream's real quota.
pub const ADAPTER_QUOTA_FRACTION: f64 = 0.10;

/// Minimum interval between requests to a single Repo/Wiki upstream, in
/// milliseconds, independent of the token bucket
pub const ADAPTER_MIN_REQUEST_INTERVAL_MS: u64 = 200;

/// Maximum bytes read from a single source document before it is rejected
/// as oversized (mirrors `runbook_domain::constants::DEFAULT_MAX_DOCUMENT_BYTES`)
pub const ADAPTER_MAX_DOCUMENT_BYTES: u64 = 100 * 1024;
