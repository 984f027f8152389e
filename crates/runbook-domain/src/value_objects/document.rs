//! Document Value Objects
//!
//! A [`Document`] is the normalized unit every source adapter produces,
//! regardless of where the underlying content actually lives (a file on
//! disk, a wiki page, a git repository, a database row).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category a document is classified into by an adapter or the indexing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A runbook: a structured incident-response procedure
    Runbook,
    /// General knowledge-base article, design doc, or reference material
    KnowledgeBase,
    /// Uncategorized content; callers should not assume structure
    Unclassified,
}

/// Value Object: Normalized Document
///
/// Represents a single retrievable unit of content, after an adapter has
/// translated it out of its source-specific representation.
///
/// ## Business Rules
///
/// - `content` must not exceed the configured maximum document size
/// - `source_id` identifies which adapter produced this document
/// - `content_hash` is used to detect whether re-embedding is required
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Stable identifier, unique within its source adapter
    pub id: String,
    /// Adapter (source) this document was retrieved from
    pub source_id: String,
    /// Human-readable title
    pub title: String,
    /// Normalized body content (markdown or plain text)
    pub content: String,
    /// Classification used to route tool calls (runbook vs. general KB)
    pub category: Category,
    /// Free-form tags supplied by the source or inferred during ingestion
    pub tags: Vec<String>,
    /// SHA-256 hex digest of `content`, used for change and staleness detection
    pub content_hash: String,
    /// Unix timestamp (seconds) the document was last modified at its source
    pub updated_at: i64,
    /// Arbitrary source-specific metadata (e.g. wiki space, repo path, db row id)
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Compute the `content_hash` for a given content string
    pub fn hash_content(content: &str) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Size of `content` in bytes
    pub fn content_bytes(&self) -> usize {
        self.content.len()
    }
}
