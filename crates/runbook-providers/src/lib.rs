//! # Runbook Knowledge Service - Provider Implementations
//!
//! This crate contains all user-selectable provider implementations following
//! Clean Architecture principles. Each provider implements a port (trait)
//! defined in `runbook-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Embedding | `EmbeddingProvider` | OpenAI, Ollama, VoyageAI, Gemini, FastEmbed, Null |
//! | Cache | `CacheProvider` | Moka, Redis, Null |
//! | Events | `EventBusProvider` | Tokio, Nats, Null |
//! | Source Adapter | `SourceAdapter` | File, HTTP, Repo, Wiki, Database |
//!
//! ## Feature Flags
//!
//! Each provider can be enabled/disabled via feature flags for minimal builds:
//!
//! ```toml
//! [dependencies]
//! runbook-providers = { version = "0.1", default-features = false, features = ["embedding-ollama", "cache-moka"] }
//! ```

// Re-export runbook-domain types commonly used with providers
pub use runbook_domain::error::{Error, Result};
pub use runbook_domain::ports::providers::{CacheProvider, EmbeddingProvider, SourceAdapter};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Embedding provider implementations
///
/// Implements `EmbeddingProvider` for various embedding APIs.
pub mod embedding;

/// Cache provider implementations
///
/// Implements `CacheProvider` for caching backends.
pub mod cache;

/// Event bus provider implementations
///
/// Implements `EventBusProvider` for event distribution backends.
pub mod events;

/// HTTP client abstractions
///
/// Provides `HttpClientProvider` trait and configuration for API-based providers.
pub mod http;

/// Source adapter implementations
///
/// Implements `SourceAdapter` over heterogeneous knowledge sources: local
/// file trees, generic HTTP endpoints, wiki/repo document hosts, and SQL
/// databases, fanned out by an `AdapterRegistry`.
pub mod adapters;
