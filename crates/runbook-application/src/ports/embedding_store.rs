//! Embedding Store Port
//!
//! Caches per-document embeddings keyed by content hash so that unchanged
//! documents are never re-embedded. Implemented in `runbook-infrastructure`
//! as an in-memory cosine-similarity scan (`ArcSwap`-protected snapshot)
//! backed by the [`EmbeddingProvider`](runbook_domain::ports::EmbeddingProvider).

use async_trait::async_trait;
use runbook_domain::error::Result;
use runbook_domain::value_objects::{Document, EmbeddingRecord};

/// Embedding Store Port
#[async_trait]
pub trait EmbeddingStore: Send + Sync {
    /// Return the embedding for `document`, computing and caching it if the
    /// stored record is missing or stale relative to `document.content_hash`
    async fn get_or_compute(&self, document: &Document) -> Result<EmbeddingRecord>;

    /// Embed a raw query string (not cached; queries are rarely repeated verbatim)
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>>;

    /// Drop every cached record for a source, e.g. after a full `refreshIndex`
    async fn invalidate_source(&self, source_id: &str) -> Result<()>;
}
