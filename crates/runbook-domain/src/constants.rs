//! Domain layer constants
//!
//! Contains constants that are part of the domain logic and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `infrastructure/constants.rs`.

// ============================================================================
// DOCUMENT SIZE AND SHAPE
// ============================================================================

/// Default maximum size of a single ingested document, in bytes
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 100 * 1024;

/// Default maximum size of any response payload returned to a caller
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 5 * 1024 * 1024;

// ============================================================================
// EMBEDDING DEFAULTS
// ============================================================================

/// Default embedding vector dimensionality
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

// ============================================================================
// HYBRID SEARCH SCORE WEIGHTS
// ============================================================================

/// Default weight given to semantic (dense-vector) similarity in the
/// combined score, before normalization
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.5;

/// Default weight given to fuzzy/lexical overlap in the combined score,
/// before normalization
pub const DEFAULT_FUZZY_WEIGHT: f64 = 0.3;

/// Default weight given to the metadata-relevance score in the combined
/// score, before normalization
pub const DEFAULT_METADATA_WEIGHT: f64 = 0.2;

/// Candidates scoring below this on the semantic component, AND below
/// `DEFAULT_MIN_FUZZY_THRESHOLD` on the fuzzy component, are discarded
/// before boosting
pub const DEFAULT_MIN_SEMANTIC_THRESHOLD: f64 = 0.15;

/// See [`DEFAULT_MIN_SEMANTIC_THRESHOLD`]
pub const DEFAULT_MIN_FUZZY_THRESHOLD: f64 = 0.15;

/// Minimum combined score a result must meet to be returned
pub const DEFAULT_MIN_SCORE: f64 = 0.15;

/// Threshold above which a document is treated as a high-confidence runbook match
pub const RUNBOOK_MATCH_THRESHOLD: f64 = 0.7;

// ============================================================================
// CACHE DEFAULTS
// ============================================================================

/// Default TTL for tier-1 (in-process) cache entries, in seconds
pub const DEFAULT_TIER1_TTL_SECS: u64 = 300;

/// Default TTL for tier-2 (external) cache entries, in seconds
pub const DEFAULT_TIER2_TTL_SECS: u64 = 3600;

/// Default maximum number of entries held in the tier-1 cache
pub const DEFAULT_TIER1_MAX_ENTRIES: u64 = 10_000;

/// Cache TTL applied instead of the default when a query was flagged
/// suspicious by the query processor
pub const SUSPICIOUS_QUERY_CACHE_TTL_SECS: u64 = 30;

// ============================================================================
// ADAPTER FAN-OUT DEFAULTS
// ============================================================================

/// Default per-adapter timeout for a fan-out search, in milliseconds
pub const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 3000;

/// Default number of consecutive failures before an adapter is marked unhealthy
pub const DEFAULT_ADAPTER_FAILURE_THRESHOLD: u32 = 3;
