//! Relational Database Adapter
//!
//! Indexes rows of a single table as documents. The DSN is resolved through
//! [`CredentialResolver`] (never embedded in configuration), and only one
//! table/column pair is read per adapter instance — multiple tables mean
//! multiple configured adapters.

mod connection;

pub use connection::{ConnectionManager, ConnectionManagerOptions};

use async_trait::async_trait;
use dashmap::DashMap;
use runbook_domain::error::{Error, Result};
use runbook_domain::ports::providers::SourceAdapter;
use runbook_domain::ports::providers::adapter::RefreshOutcome;
use runbook_domain::search::query::{lexical_overlap, process_query};
use runbook_domain::value_objects::{AdapterConfig, AdapterHealth, AdapterHealthStatus, Category, Document};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

use super::CredentialResolver;
use super::runbook_detect::{self, RunbookSignals};

const DEFAULT_ROW_LIMIT: i64 = 5000;

/// Relational database source adapter
///
/// Reads `table`/`content_column` from [`AdapterConfig::Database`]. Rows are
/// expected to carry an `id` column (used as the document id/title fallback)
/// and optionally a `title` column; anything else in the row is ignored.
pub struct DatabaseAdapter {
    name: String,
    table: String,
    content_column: String,
    connection: Arc<ConnectionManager>,
    index: DashMap<String, Document>,
    refresh_lock: Mutex<()>,
    refresh_in_progress: AtomicBool,
    last_error: Mutex<Option<String>>,
    last_indexed_at: AtomicU64,
}

impl DatabaseAdapter {
    /// Build an adapter for the table described by `config`, resolving its
    /// DSN through `credentials`
    pub async fn new(
        config: &AdapterConfig,
        credentials: Arc<CredentialResolver>,
        options: ConnectionManagerOptions,
    ) -> Result<Self> {
        let (name, credential_ref, table, content_column) = match config {
            AdapterConfig::Database {
                name,
                credential_ref,
                table,
                content_column,
            } => (name.clone(), credential_ref.clone(), table.clone(), content_column.clone()),
            other => {
                return Err(Error::config(format!(
                    "DatabaseAdapter requires an AdapterConfig::Database, got kind '{}'",
                    other.kind()
                )));
            }
        };

        if !is_safe_identifier(&table) || !is_safe_identifier(&content_column) {
            return Err(Error::config(format!(
                "database adapter '{name}' has an unsafe table or column identifier"
            )));
        }

        let dsn = credentials.resolve(&credential_ref).await?;
        let connection = Arc::new(ConnectionManager::new(&dsn, options)?);
        connection.spawn_health_probe();

        Ok(Self {
            name,
            table,
            content_column,
            connection,
            index: DashMap::new(),
            refresh_lock: Mutex::new(()),
            refresh_in_progress: AtomicBool::new(false),
            last_error: Mutex::new(None),
            last_indexed_at: AtomicU64::new(0),
        })
    }

    fn document_id(&self, row_id: &str) -> String {
        Document::hash_content(&format!("{}::{}::{row_id}", self.name, self.table))
    }

    fn fuzzy_score(&self, query: &runbook_domain::value_objects::search::ProcessedQuery, doc: &Document) -> f64 {
        let title_overlap = lexical_overlap(query, &doc.title);
        let content_overlap = lexical_overlap(query, &doc.content);
        title_overlap * 0.4 + content_overlap * 0.6
    }
}

/// Guards against identifier injection since table/column names are
/// interpolated into the query text rather than bound as parameters
fn is_safe_identifier(ident: &str) -> bool {
    !ident.is_empty() && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl SourceAdapter for DatabaseAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&self, _config: &AdapterConfig) -> Result<()> {
        self.refresh_index().await.map(|_| ())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let processed = process_query(query);
        let mut scored: Vec<(f64, Document)> = self
            .index
            .iter()
            .map(|entry| (self.fuzzy_score(&processed, entry.value()), entry.value().clone()))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored.into_iter().take(limit).map(|(_, doc)| doc).collect())
    }

    async fn search_runbooks(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let results = self.search(query, usize::MAX).await?;
        Ok(results.into_iter().filter(|d| matches!(d.category, Category::Runbook)).take(limit).collect())
    }

    async fn get_document(&self, document_id: &str) -> Result<Option<Document>> {
        Ok(self.index.get(document_id).map(|e| e.value().clone()))
    }

    async fn health_check(&self) -> Result<AdapterHealth> {
        let status = if self.connection.is_healthy() {
            AdapterHealthStatus::Healthy
        } else if self.connection.consecutive_failures() < self.connection.options().health_failure_threshold {
            AdapterHealthStatus::Degraded
        } else {
            AdapterHealthStatus::Unhealthy
        };
        let mut details = HashMap::new();
        details.insert("table".to_string(), self.table.clone());
        details.insert("indexed_rows".to_string(), self.index.len().to_string());
        Ok(AdapterHealth {
            name: self.name.clone(),
            status,
            consecutive_failures: self.connection.consecutive_failures(),
            last_error: self.last_error.lock().await.clone(),
            details,
        })
    }

    async fn refresh_index(&self) -> Result<RefreshOutcome> {
        if self.refresh_in_progress.swap(true, Ordering::SeqCst) {
            return Ok(RefreshOutcome::default());
        }
        let _guard = self.refresh_lock.lock().await;

        let table = self.table.clone();
        let content_column = self.content_column.clone();
        let connection = Arc::clone(&self.connection);
        let query = format!("SELECT id, {content_column} FROM {table} LIMIT {DEFAULT_ROW_LIMIT}");

        let rows = tokio::task::spawn_blocking(move || {
            let mut conn = connection.get_connection()?;
            conn.query(query.as_str(), &[])
                .map_err(|e| Error::source_adapter("database", format!("query against '{table}' failed: {e}")))
        })
        .await
        .map_err(|e| Error::unknown(format!("database adapter blocking task panicked: {e}")))??;

        let mut outcome = RefreshOutcome::default();
        let mut seen_ids = std::collections::HashSet::new();

        for row in &rows {
            let row_id: String = row
                .try_get::<_, i64>(0)
                .map(|v| v.to_string())
                .or_else(|_| row.try_get::<_, String>(0))
                .unwrap_or_default();
            let content: String = row.try_get(1).unwrap_or_default();
            if row_id.is_empty() {
                continue;
            }

            let key = self.document_id(&row_id);
            seen_ids.insert(key.clone());
            let existed = self.index.contains_key(&key);

            let signals = RunbookSignals {
                title: &row_id,
                content: &content,
                source_category_runbook: false,
                tags: &[],
            };
            let category = runbook_detect::classify(&signals);

            let mut metadata = HashMap::new();
            metadata.insert("source_adapter".to_string(), self.name.clone());
            metadata.insert("table".to_string(), self.table.clone());
            metadata.insert("row_id".to_string(), row_id.clone());

            let doc = Document {
                id: key.clone(),
                source_id: self.name.clone(),
                title: row_id.clone(),
                content: content.clone(),
                category,
                tags: Vec::new(),
                content_hash: Document::hash_content(&content),
                updated_at: now_unix() as i64,
                metadata,
            };
            self.index.insert(key, doc);
            if existed {
                outcome.modified += 1;
            } else {
                outcome.added += 1;
            }
        }

        let stale: Vec<String> =
            self.index.iter().map(|e| e.key().clone()).filter(|k| !seen_ids.is_empty() && !seen_ids.contains(k)).collect();
        for key in stale {
            self.index.remove(&key);
            outcome.removed += 1;
        }

        self.last_indexed_at.store(now_unix(), Ordering::SeqCst);
        self.refresh_in_progress.store(false, Ordering::SeqCst);
        Ok(outcome)
    }

    async fn get_metadata(&self) -> Result<HashMap<String, String>> {
        let mut metadata = HashMap::new();
        metadata.insert("table".to_string(), self.table.clone());
        metadata.insert("content_column".to_string(), self.content_column.clone());
        metadata.insert("indexed_rows".to_string(), self.index.len().to_string());
        Ok(metadata)
    }

    async fn configure(&self, config: &AdapterConfig) -> Result<()> {
        match config {
            AdapterConfig::Database { .. } => Ok(()),
            other => Err(Error::config(format!(
                "DatabaseAdapter cannot reconfigure from kind '{}'",
                other.kind()
            ))),
        }
    }

    async fn cleanup(&self) -> Result<()> {
        self.index.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsafe_table_identifier() {
        assert!(!is_safe_identifier("runbooks; DROP TABLE users"));
        assert!(is_safe_identifier("runbooks"));
        assert!(is_safe_identifier("kb_articles_v2"));
    }
}
