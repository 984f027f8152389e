//! Adapter Registry Port
//!
//! The application layer depends only on this trait, never on a concrete
//! set of adapters. `runbook-providers` implements it by holding one
//! `Arc<dyn SourceAdapter>` per configured source and fanning calls out to
//! all of them concurrently, tolerating individual adapter failures.

use async_trait::async_trait;
use runbook_domain::error::Result;
use runbook_domain::value_objects::{AdapterHealth, Document};
use std::sync::Arc;

/// Outcome of a single adapter's contribution to a fan-out call
#[derive(Debug, Clone)]
pub struct AdapterOutcome {
    /// Name of the adapter that produced (or failed to produce) results
    pub adapter: String,
    /// Documents returned, empty on failure
    pub documents: Vec<Document>,
    /// Error message, if this adapter failed or timed out
    pub error: Option<String>,
}

/// Adapter Registry Port
///
/// Fan-out search across every registered, healthy adapter. A failing or
/// timed-out adapter is reported in the returned outcomes rather than
/// propagated as an error — one bad source must never fail the whole
/// search.
#[async_trait]
pub trait AdapterRegistry: Send + Sync {
    /// Fan out a free-text search across every registered adapter
    async fn search_all(&self, query: &str, limit_per_adapter: usize) -> Vec<AdapterOutcome>;

    /// Fan out a runbook-scoped search across every registered adapter
    async fn search_runbooks_all(&self, query: &str, limit_per_adapter: usize)
        -> Vec<AdapterOutcome>;

    /// Fetch a document by id, trying adapters in registration order until one answers
    async fn get_document(&self, document_id: &str) -> Result<Option<Document>>;

    /// Names of every registered adapter
    fn adapter_names(&self) -> Vec<String>;

    /// Look up a single adapter by name, for targeted operations (refresh, configure)
    fn adapter(&self, name: &str) -> Option<Arc<dyn runbook_domain::ports::SourceAdapter>>;

    /// Health of every registered adapter
    async fn health_all(&self) -> Vec<AdapterHealth>;
}
