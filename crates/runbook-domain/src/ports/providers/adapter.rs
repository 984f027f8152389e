//! Source Adapter Port
//!
//! The single contract every concrete source (file tree, HTTP API, wiki,
//! git repository, database) implements. The application layer's fan-out
//! search and the adapter registry depend only on this trait, never on a
//! concrete adapter type.

use crate::error::Result;
use crate::value_objects::{AdapterConfig, AdapterHealth, Document};
use async_trait::async_trait;

/// Result of a `refreshIndex` call: how many documents changed
#[derive(Debug, Clone, Default)]
pub struct RefreshOutcome {
    /// Documents newly discovered
    pub added: usize,
    /// Documents whose content changed
    pub modified: usize,
    /// Documents no longer present at the source
    pub removed: usize,
}

/// Source Adapter Port
///
/// All methods are async and must honor the caller's deadline: long-running
/// adapters (a slow wiki API, a large git clone) are expected to respect
/// cancellation via `tokio::time::timeout` at the call site rather than
/// implementing their own ad-hoc timeout logic.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable name this adapter is registered under
    fn name(&self) -> &str;

    /// Perform any startup work (open connections, validate credentials)
    async fn initialize(&self, config: &AdapterConfig) -> Result<()>;

    /// Free-text search scoped to this adapter's documents
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>>;

    /// Search restricted to documents classified as runbooks
    async fn search_runbooks(&self, query: &str, limit: usize) -> Result<Vec<Document>>;

    /// Fetch a single document by id
    async fn get_document(&self, document_id: &str) -> Result<Option<Document>>;

    /// Report current health (reachability, credential validity, latency)
    async fn health_check(&self) -> Result<AdapterHealth>;

    /// Re-scan the source and report what changed since the last refresh
    async fn refresh_index(&self) -> Result<RefreshOutcome>;

    /// Arbitrary adapter-specific metadata surfaced via `list_sources`
    async fn get_metadata(&self) -> Result<std::collections::HashMap<String, String>>;

    /// Apply a configuration update without a full restart, where supported
    async fn configure(&self, config: &AdapterConfig) -> Result<()>;

    /// Release any held resources (connections, file watchers) on shutdown
    async fn cleanup(&self) -> Result<()>;
}
