//! Semantic Embedding Value Objects
//!
//! Value objects representing semantic embeddings and related
//! concepts for similarity search and text understanding.

use serde::{Deserialize, Serialize};

/// Value Object: Semantic Text Embedding
///
/// Represents a vector embedding of text content that captures semantic meaning.
/// Embeddings enable similarity search and are the foundation of the semantic
/// search capabilities.
///
/// ## Business Rules
///
/// - Vector must contain at least one element
/// - Dimensions must be positive
/// - Model name identifies the embedding generation method
///
/// ## Example
///
/// ```rust
/// use runbook_domain::value_objects::Embedding;
///
/// let embedding = Embedding {
///     vector: vec![0.1, 0.2, 0.3, 0.4, 0.5],
///     model: "text-embedding-ada-002".to_string(),
///     dimensions: 1536,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Name of the model that generated this embedding
    pub model: String,
    /// Dimensionality of the embedding vector
    pub dimensions: usize,
}

impl Embedding {
    /// Cosine similarity against another embedding of the same dimensionality.
    ///
    /// Returns `0.0` if either vector has zero magnitude.
    pub fn cosine_similarity(&self, other: &Embedding) -> f64 {
        let dot: f32 = self
            .vector
            .iter()
            .zip(other.vector.iter())
            .map(|(a, b)| a * b)
            .sum();
        let norm_a: f32 = self.vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        let norm_b: f32 = other.vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        (dot / (norm_a * norm_b)) as f64
    }
}

/// Value Object: Stored Embedding Record
///
/// Associates an [`Embedding`] with the document it was computed from and
/// the content hash it was computed at, so the embedding store can detect
/// staleness without re-embedding unchanged content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingRecord {
    /// Id of the document this embedding represents
    pub document_id: String,
    /// The embedding itself
    pub embedding: Embedding,
    /// Content hash of the document at the time this embedding was computed
    pub content_hash: String,
    /// Unix timestamp (seconds) this embedding was created
    pub created_at: i64,
}

impl EmbeddingRecord {
    /// Whether this record is stale relative to a document's current content hash
    pub fn is_stale(&self, current_content_hash: &str) -> bool {
        self.content_hash != current_content_hash
    }
}
