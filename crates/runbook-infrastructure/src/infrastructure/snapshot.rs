//! Document snapshot providers
//!
//! Implementations of [`SnapshotProvider`] used to diff an adapter's
//! documents across `refreshIndex` calls.

use async_trait::async_trait;
use dashmap::DashMap;
use runbook_domain::error::Result;
use runbook_domain::ports::infrastructure::snapshot::{
    DocumentSnapshot, SnapshotChanges, SnapshotProvider,
};
use std::collections::HashSet;

/// In-memory snapshot store, keyed by source adapter id
///
/// Snapshots are lost on restart. Adequate for single-process deployments
/// where a full reindex on startup is acceptable; durable deployments
/// should back this with `CacheProvider` or a file-backed store instead.
#[derive(Debug, Default)]
pub struct InMemorySnapshotProvider {
    snapshots: DashMap<String, DocumentSnapshot>,
}

impl InMemorySnapshotProvider {
    /// Create an empty snapshot store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotProvider for InMemorySnapshotProvider {
    async fn save_snapshot(&self, snapshot: &DocumentSnapshot) -> Result<()> {
        self.snapshots
            .insert(snapshot.source_id.clone(), snapshot.clone());
        Ok(())
    }

    async fn load_snapshot(&self, source_id: &str) -> Result<Option<DocumentSnapshot>> {
        Ok(self.snapshots.get(source_id).map(|entry| entry.clone()))
    }

    async fn compare_snapshots(
        &self,
        old_snapshot: &DocumentSnapshot,
        new_snapshot: &DocumentSnapshot,
    ) -> Result<SnapshotChanges> {
        let old_ids: HashSet<&str> = old_snapshot
            .entries
            .iter()
            .map(|e| e.document_id.as_str())
            .collect();
        let new_ids: HashSet<&str> = new_snapshot
            .entries
            .iter()
            .map(|e| e.document_id.as_str())
            .collect();

        let added = new_ids
            .difference(&old_ids)
            .map(|id| id.to_string())
            .collect();
        let removed = old_ids
            .difference(&new_ids)
            .map(|id| id.to_string())
            .collect();

        let modified = new_snapshot
            .entries
            .iter()
            .filter_map(|new_entry| {
                old_snapshot
                    .entries
                    .iter()
                    .find(|old_entry| old_entry.document_id == new_entry.document_id)
                    .filter(|old_entry| old_entry.content_hash != new_entry.content_hash)
                    .map(|_| new_entry.document_id.clone())
            })
            .collect();

        Ok(SnapshotChanges {
            added,
            modified,
            removed,
        })
    }
}

/// Snapshot provider that never persists anything
///
/// Every `refreshIndex` call sees an empty previous snapshot, so adapters
/// report every document as added. Useful for tests and for adapters that
/// don't support incremental refresh.
#[derive(Debug, Default)]
pub struct NullSnapshotProvider;

impl NullSnapshotProvider {
    /// Create a new null snapshot provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SnapshotProvider for NullSnapshotProvider {
    async fn save_snapshot(&self, _snapshot: &DocumentSnapshot) -> Result<()> {
        Ok(())
    }

    async fn load_snapshot(&self, _source_id: &str) -> Result<Option<DocumentSnapshot>> {
        Ok(None)
    }

    async fn compare_snapshots(
        &self,
        _old_snapshot: &DocumentSnapshot,
        _new_snapshot: &DocumentSnapshot,
    ) -> Result<SnapshotChanges> {
        Ok(SnapshotChanges::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runbook_domain::ports::infrastructure::snapshot::SnapshotEntry;

    fn entry(id: &str, hash: &str) -> SnapshotEntry {
        SnapshotEntry {
            document_id: id.to_string(),
            content_hash: hash.to_string(),
            updated_at: 0,
        }
    }

    #[tokio::test]
    async fn detects_added_modified_removed() {
        let provider = InMemorySnapshotProvider::new();

        let old = DocumentSnapshot {
            source_id: "docs".to_string(),
            entries: vec![entry("a", "h1"), entry("b", "h2")],
        };
        let new = DocumentSnapshot {
            source_id: "docs".to_string(),
            entries: vec![entry("a", "h1-changed"), entry("c", "h3")],
        };

        let changes = provider.compare_snapshots(&old, &new).await.unwrap();
        assert_eq!(changes.added, vec!["c".to_string()]);
        assert_eq!(changes.modified, vec!["a".to_string()]);
        assert_eq!(changes.removed, vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn roundtrips_through_save_and_load() {
        let provider = InMemorySnapshotProvider::new();
        let snapshot = DocumentSnapshot {
            source_id: "docs".to_string(),
            entries: vec![entry("a", "h1")],
        };

        provider.save_snapshot(&snapshot).await.unwrap();
        let loaded = provider.load_snapshot("docs").await.unwrap();
        assert_eq!(loaded, Some(snapshot));
    }
}
