//! Embedding Provider Port
//!
//! Defines the contract for generating text embeddings, regardless of
//! whether the implementation runs a local model (FastEmbed) or calls out
//! to a hosted API (OpenAI, Voyage AI, Gemini, Ollama).

use crate::error::Result;
use crate::value_objects::Embedding;
use async_trait::async_trait;

/// Embedding Provider Port
///
/// Implementations must be safe to call concurrently; a local-model
/// implementation typically funnels calls through a single-threaded actor
/// internally rather than sharing `&mut` state across callers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single piece of text
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Generate embeddings for a batch of texts
    ///
    /// Implementations should batch internally where the underlying model
    /// or API benefits from it; the default here is a naive per-item loop.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    /// Dimensionality this provider produces
    fn dimensions(&self) -> usize;

    /// Name of the underlying model, used to detect dimension changes across restarts
    fn model_name(&self) -> &str;

    /// Name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
