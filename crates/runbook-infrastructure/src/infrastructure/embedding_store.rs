//! Embedding Store Implementation
//!
//! Caches per-document embeddings in memory, keyed by document id, and
//! regenerates them whenever a document's `content_hash` no longer matches
//! the cached record. The embedding runtime itself is a pluggable
//! [`EmbeddingProvider`] from `runbook-providers`.

use async_trait::async_trait;
use dashmap::DashMap;
use runbook_application::ports::EmbeddingStore;
use runbook_domain::error::Result;
use runbook_domain::ports::providers::EmbeddingProvider;
use runbook_domain::value_objects::{Document, EmbeddingRecord};
use std::sync::Arc;

/// In-memory, content-hash-keyed embedding cache over an [`EmbeddingProvider`]
pub struct EmbeddingStoreImpl {
    provider: Arc<dyn EmbeddingProvider>,
    records: DashMap<String, EmbeddingRecord>,
}

impl EmbeddingStoreImpl {
    /// Build a store over the given embedding provider
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            records: DashMap::new(),
        }
    }
}

#[async_trait]
impl EmbeddingStore for EmbeddingStoreImpl {
    async fn get_or_compute(&self, document: &Document) -> Result<EmbeddingRecord> {
        if let Some(record) = self.records.get(&document.id) {
            if !record.is_stale(&document.content_hash) {
                return Ok(record.clone());
            }
        }

        let embedding = self.provider.embed(&document.content).await?;
        let record = EmbeddingRecord {
            document_id: document.id.clone(),
            embedding,
            content_hash: document.content_hash.clone(),
            created_at: now_secs(),
        };
        self.records.insert(document.id.clone(), record.clone());
        Ok(record)
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        Ok(self.provider.embed(query).await?.vector)
    }

    async fn invalidate_source(&self, source_id: &str) -> Result<()> {
        self.records.retain(|_, record| {
            !record
                .document_id
                .starts_with(&format!("{source_id}:"))
        });
        Ok(())
    }
}

fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
