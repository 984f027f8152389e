//! Null embedding provider for testing and development
//!
//! Provides deterministic, hash-based embeddings for testing purposes.
//! No external dependencies - always works offline.

use async_trait::async_trait;

use runbook_domain::error::Result;
use runbook_domain::ports::providers::EmbeddingProvider;
use runbook_domain::value_objects::Embedding;

use crate::constants::EMBEDDING_DIMENSION_NULL;

/// Null embedding provider for testing
///
/// Returns fixed-size vectors filled with deterministic values based on
/// input text hash. Useful for unit tests and development without requiring
/// an actual embedding service.
///
/// # Example
///
/// ```rust
/// use runbook_providers::embedding::NullEmbeddingProvider;
/// use runbook_domain::ports::providers::EmbeddingProvider;
///
/// let provider = NullEmbeddingProvider::new();
/// assert_eq!(provider.dimensions(), 384);
/// assert_eq!(provider.provider_name(), "null");
/// ```
#[derive(Debug, Default)]
pub struct NullEmbeddingProvider;

impl NullEmbeddingProvider {
    /// Create a new null embedding provider
    pub fn new() -> Self {
        Self
    }

    fn embed_one(&self, i: usize, text: &str) -> Embedding {
        let hash = text.chars().map(|c| c as u32).sum::<u32>();
        let base_value = (hash % 1000) as f32 / 1000.0;

        let vector = (0..EMBEDDING_DIMENSION_NULL)
            .map(|j| {
                let variation = ((i as f32 + j as f32) * 0.01).sin();
                (base_value + variation * 0.1).clamp(0.0, 1.0)
            })
            .collect();

        Embedding {
            vector,
            model: self.model_name().to_string(),
            dimensions: EMBEDDING_DIMENSION_NULL,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(self.embed_one(0, text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, text)| self.embed_one(i, text))
            .collect())
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSION_NULL
    }

    fn model_name(&self) -> &str {
        "null-test"
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeds_with_declared_dimensions() {
        let provider = NullEmbeddingProvider::new();
        let embedding = provider.embed("incident: disk full").await.unwrap();
        assert_eq!(embedding.vector.len(), EMBEDDING_DIMENSION_NULL);
        assert_eq!(embedding.dimensions, EMBEDDING_DIMENSION_NULL);
    }

    #[tokio::test]
    async fn same_text_is_deterministic() {
        let provider = NullEmbeddingProvider::new();
        let a = provider.embed("same input").await.unwrap();
        let b = provider.embed("same input").await.unwrap();
        assert_eq!(a.vector, b.vector);
    }
}
