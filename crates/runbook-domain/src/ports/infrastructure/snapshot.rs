//! Document Snapshot Port
//!
//! Defines the contract for tracking which documents an adapter has seen
//! before, so a `refreshIndex` call can report only what actually changed
//! (added, modified, removed) instead of re-processing everything.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single entry in a [`DocumentSnapshot`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotEntry {
    /// Document id, unique within its source adapter
    pub document_id: String,
    /// Content hash at the time of this snapshot
    pub content_hash: String,
    /// Unix timestamp (seconds) the document was last modified at its source
    pub updated_at: i64,
}

/// Point-in-time record of every document an adapter has seen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentSnapshot {
    /// Adapter (source) this snapshot belongs to
    pub source_id: String,
    /// Entries, one per known document
    pub entries: Vec<SnapshotEntry>,
}

/// Result of comparing two [`DocumentSnapshot`]s
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnapshotChanges {
    /// Document ids present in the new snapshot but not the old one
    pub added: Vec<String>,
    /// Document ids present in both but with a different content hash
    pub modified: Vec<String>,
    /// Document ids present in the old snapshot but not the new one
    pub removed: Vec<String>,
}

impl SnapshotChanges {
    /// Whether any change was detected
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

/// Document Snapshot Provider Interface
///
/// Defines the contract for persisting and comparing document snapshots so
/// that adapters can report incremental changes on `refreshIndex`.
///
/// # Example
///
/// ```no_run
/// use runbook_domain::ports::infrastructure::snapshot::SnapshotProvider;
/// use std::sync::Arc;
///
/// async fn refresh(snapshot: Arc<dyn SnapshotProvider>, current: runbook_domain::ports::infrastructure::snapshot::DocumentSnapshot) -> runbook_domain::Result<()> {
///     let previous = snapshot.load_snapshot(&current.source_id).await?;
///     if let Some(previous) = previous {
///         let changes = snapshot.compare_snapshots(&previous, &current).await?;
///         println!("added={} modified={} removed={}", changes.added.len(), changes.modified.len(), changes.removed.len());
///     }
///     snapshot.save_snapshot(&current).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Persist a snapshot, replacing any previous snapshot for the same source
    async fn save_snapshot(&self, snapshot: &DocumentSnapshot) -> Result<()>;

    /// Load the most recently saved snapshot for a source, if any
    async fn load_snapshot(&self, source_id: &str) -> Result<Option<DocumentSnapshot>>;

    /// Compare two snapshots to find added, modified, and removed documents
    async fn compare_snapshots(
        &self,
        old_snapshot: &DocumentSnapshot,
        new_snapshot: &DocumentSnapshot,
    ) -> Result<SnapshotChanges>;
}
