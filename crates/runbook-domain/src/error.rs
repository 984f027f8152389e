//! Error taxonomy
//!
//! The service recognizes a closed set of error categories. Each category
//! carries a fixed severity and a default retry-after hint so that callers
//! (the tool dispatcher, the HTTP layer) can render a uniform envelope
//! without re-deriving policy per call site.

use thiserror::Error;

/// Result type alias for operations that can fail with a taxonomy [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Severity associated with an error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Caller can retry or fix input locally
    Low,
    /// Requires operator attention but the system degrades gracefully
    Medium,
    /// An upstream dependency is compromised
    High,
    /// The process cannot continue in its current state
    Critical,
}

/// Error taxonomy for the runbook knowledge retrieval service
///
/// The variant set is closed and mirrors the error kinds table from the
/// service specification: each kind has a fixed severity and a default
/// `retry_after_ms`, both available via [`Error::severity`] and
/// [`Error::retry_after_ms`].
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input is malformed
    #[error("validation error: {message}")]
    Validation {
        /// Description of what failed validation
        message: String,
    },

    /// Credentials missing or invalid for an upstream source
    #[error("authentication error: {message}")]
    Auth {
        /// Description of the authentication failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration was rejected at startup
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation exceeded its deadline
    #[error("timeout: {operation} exceeded its deadline")]
    Timeout {
        /// The operation whose deadline was hit
        operation: String,
        /// Request id the timeout is attributed to, when known
        request_id: Option<String>,
    },

    /// Local or upstream quota exhausted
    #[error("rate limit exceeded: retry after {reset_in_ms}ms")]
    RateLimit {
        /// Milliseconds until the caller may retry
        reset_in_ms: u64,
    },

    /// A source adapter failed; other adapters may still have succeeded
    #[error("source adapter '{adapter}' failed: {message}")]
    SourceAdapter {
        /// Name of the failing adapter
        adapter: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cache layer unavailable; caller should proceed without it
    #[error("cache error: {message}")]
    Cache {
        /// Description of the cache failure
        message: String,
    },

    /// Vector/embedding path failed; caller may fall back to fuzzy-only
    #[error("embedding failure: {message}")]
    EmbedFailure {
        /// Description of the embedding failure
        message: String,
    },

    /// Requested entity does not exist
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Response body exceeded the configured maximum size
    #[error("oversized payload: {size_bytes} bytes exceeds limit of {limit_bytes} bytes")]
    OversizedPayload {
        /// Actual payload size in bytes
        size_bytes: u64,
        /// Configured maximum size in bytes
        limit_bytes: u64,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Default category for errors that do not fit elsewhere
    #[error("internal error: {message}")]
    Unknown {
        /// Description of the error
        message: String,
    },
}

impl Error {
    /// Severity of this error, per the closed taxonomy
    pub fn severity(&self) -> Severity {
        match self {
            Error::Validation { .. } => Severity::Low,
            Error::Auth { .. } => Severity::High,
            Error::Config { .. } => Severity::Critical,
            Error::Timeout { .. } => Severity::Medium,
            Error::RateLimit { .. } => Severity::Medium,
            Error::SourceAdapter { .. } => Severity::High,
            Error::Cache { .. } => Severity::Low,
            Error::EmbedFailure { .. } => Severity::Medium,
            Error::NotFound { .. } => Severity::Low,
            Error::OversizedPayload { .. } => Severity::Low,
            Error::Io { .. } | Error::Json { .. } => Severity::Medium,
            Error::Unknown { .. } => Severity::Medium,
        }
    }

    /// Default retry-after hint in milliseconds, if the error is retryable.
    ///
    /// `Some(0)` means "retrying without changing the request is pointless"
    /// (validation / not-found / oversized payload); `None` means there is
    /// no sane default because the hint is situational (auth, config).
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Error::Validation { .. } => Some(0),
            Error::Auth { .. } | Error::Config { .. } => None,
            Error::Timeout { .. } => Some(2000),
            Error::RateLimit { reset_in_ms } => Some(*reset_in_ms),
            Error::SourceAdapter { .. } => Some(5000),
            Error::Cache { .. } => Some(1000),
            Error::EmbedFailure { .. } => Some(1000),
            Error::NotFound { .. } => Some(0),
            Error::OversizedPayload { .. } => Some(0),
            Error::Io { .. } | Error::Json { .. } => Some(1000),
            Error::Unknown { .. } => Some(1000),
        }
    }

    /// Short machine-readable code for the error kind, used in the uniform
    /// `{success: false, error: {code, ...}}` envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "VALIDATION",
            Error::Auth { .. } => "AUTH",
            Error::Config { .. } => "CONFIG",
            Error::Timeout { .. } => "TIMEOUT",
            Error::RateLimit { .. } => "RATE_LIMIT",
            Error::SourceAdapter { .. } => "SOURCE_ADAPTER",
            Error::Cache { .. } => "CACHE",
            Error::EmbedFailure { .. } => "EMBED_FAILURE",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::OversizedPayload { .. } => "OVERSIZED_PAYLOAD",
            Error::Io { .. } | Error::Json { .. } => "UNKNOWN",
            Error::Unknown { .. } => "UNKNOWN",
        }
    }
}

// Constructors, grouped by category like the rest of the domain crate.
impl Error {
    /// Build a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Build an auth error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
            source: None,
        }
    }

    /// Build a config error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Build a config error with an underlying source
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a timeout error
    pub fn timeout<S: Into<String>>(operation: S, request_id: Option<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
            request_id,
        }
    }

    /// Build a rate-limit error
    pub fn rate_limit(reset_in_ms: u64) -> Self {
        Self::RateLimit { reset_in_ms }
    }

    /// Build a source-adapter error
    pub fn source_adapter<A, S>(adapter: A, message: S) -> Self
    where
        A: Into<String>,
        S: Into<String>,
    {
        Self::SourceAdapter {
            adapter: adapter.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Build a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Build an embedding-failure error
    pub fn embed_failure<S: Into<String>>(message: S) -> Self {
        Self::EmbedFailure {
            message: message.into(),
        }
    }

    /// Build a not-found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Build an oversized-payload error
    pub fn oversized_payload(size_bytes: u64, limit_bytes: u64) -> Self {
        Self::OversizedPayload {
            size_bytes,
            limit_bytes,
        }
    }

    /// Build an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Build an I/O error with an underlying source
    pub fn io_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a catch-all error
    pub fn unknown<S: Into<String>>(message: S) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Unknown {
            message: s.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Unknown { message: s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_after_matches_table() {
        assert_eq!(Error::validation("bad").retry_after_ms(), Some(0));
        assert_eq!(Error::timeout("search", None).retry_after_ms(), Some(2000));
        assert_eq!(Error::rate_limit(1500).retry_after_ms(), Some(1500));
        assert_eq!(
            Error::source_adapter("file", "boom").retry_after_ms(),
            Some(5000)
        );
        assert_eq!(Error::cache("down").retry_after_ms(), Some(1000));
        assert_eq!(Error::not_found("doc:1").retry_after_ms(), Some(0));
    }

    #[test]
    fn severity_matches_table() {
        assert_eq!(Error::validation("x").severity(), Severity::Low);
        assert_eq!(Error::auth("x").severity(), Severity::High);
        assert_eq!(Error::config("x").severity(), Severity::Critical);
        assert_eq!(Error::source_adapter("a", "x").severity(), Severity::High);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(Error::validation("x").code(), "VALIDATION");
        assert_eq!(Error::rate_limit(0).code(), "RATE_LIMIT");
        assert_eq!(Error::oversized_payload(1, 1).code(), "OVERSIZED_PAYLOAD");
    }
}
