//! Adapter Registry
//!
//! Holds one [`SourceAdapter`] per configured source and fans calls out to
//! all of them concurrently. A single adapter failing or timing out never
//! fails the whole call — its contribution is simply reported as an
//! [`AdapterOutcome`] with an error message.

use async_trait::async_trait;
use futures::future::join_all;
use runbook_application::ports::registry::{AdapterOutcome, AdapterRegistry};
use runbook_domain::error::Result;
use runbook_domain::ports::providers::SourceAdapter;
use runbook_domain::value_objects::{AdapterHealth, AdapterHealthStatus, Document};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Default per-adapter timeout for fan-out search calls
const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Concurrent, failure-tolerant adapter registry
///
/// Adapters are registered once at startup (`register`) and looked up by
/// name thereafter. Fan-out methods (`search_all`, `search_runbooks_all`,
/// `health_all`) run every adapter concurrently via `join_all`, each
/// bounded by `adapter_timeout` so one slow source cannot stall the rest.
pub struct DefaultAdapterRegistry {
    adapters: HashMap<String, Arc<dyn SourceAdapter>>,
    adapter_timeout: Duration,
}

impl DefaultAdapterRegistry {
    /// Create an empty registry with the default per-adapter timeout (10s)
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
        }
    }

    /// Create an empty registry with a custom per-adapter timeout
    pub fn with_timeout(adapter_timeout: Duration) -> Self {
        Self {
            adapters: HashMap::new(),
            adapter_timeout,
        }
    }

    /// Register an adapter under its own `name()`
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) {
        self.adapters.insert(adapter.name().to_string(), adapter);
    }

    /// Build from an already-assembled set of adapters
    pub fn from_adapters(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        let mut registry = Self::new();
        for adapter in adapters {
            registry.register(adapter);
        }
        registry
    }
}

impl Default for DefaultAdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultAdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAdapterRegistry")
            .field("adapters", &self.adapter_names())
            .finish()
    }
}

#[async_trait]
impl AdapterRegistry for DefaultAdapterRegistry {
    async fn search_all(&self, query: &str, limit_per_adapter: usize) -> Vec<AdapterOutcome> {
        let futures = self.adapters.values().map(|adapter| {
            let adapter = Arc::clone(adapter);
            let query = query.to_string();
            let timeout = self.adapter_timeout;
            async move {
                let name = adapter.name().to_string();
                match tokio::time::timeout(timeout, adapter.search(&query, limit_per_adapter))
                    .await
                {
                    Ok(Ok(documents)) => AdapterOutcome {
                        adapter: name,
                        documents,
                        error: None,
                    },
                    Ok(Err(e)) => {
                        warn!(adapter = %name, error = %e, "adapter search failed");
                        AdapterOutcome {
                            adapter: name,
                            documents: Vec::new(),
                            error: Some(e.to_string()),
                        }
                    }
                    Err(_) => {
                        warn!(adapter = %name, "adapter search timed out");
                        AdapterOutcome {
                            adapter: name,
                            documents: Vec::new(),
                            error: Some("search timed out".to_string()),
                        }
                    }
                }
            }
        });

        join_all(futures).await
    }

    async fn search_runbooks_all(
        &self,
        query: &str,
        limit_per_adapter: usize,
    ) -> Vec<AdapterOutcome> {
        let futures = self.adapters.values().map(|adapter| {
            let adapter = Arc::clone(adapter);
            let query = query.to_string();
            let timeout = self.adapter_timeout;
            async move {
                let name = adapter.name().to_string();
                match tokio::time::timeout(
                    timeout,
                    adapter.search_runbooks(&query, limit_per_adapter),
                )
                .await
                {
                    Ok(Ok(documents)) => AdapterOutcome {
                        adapter: name,
                        documents,
                        error: None,
                    },
                    Ok(Err(e)) => {
                        warn!(adapter = %name, error = %e, "adapter runbook search failed");
                        AdapterOutcome {
                            adapter: name,
                            documents: Vec::new(),
                            error: Some(e.to_string()),
                        }
                    }
                    Err(_) => {
                        warn!(adapter = %name, "adapter runbook search timed out");
                        AdapterOutcome {
                            adapter: name,
                            documents: Vec::new(),
                            error: Some("search timed out".to_string()),
                        }
                    }
                }
            }
        });

        join_all(futures).await
    }

    async fn get_document(&self, document_id: &str) -> Result<Option<Document>> {
        for adapter in self.adapters.values() {
            if let Some(document) = adapter.get_document(document_id).await? {
                return Ok(Some(document));
            }
        }
        Ok(None)
    }

    fn adapter_names(&self) -> Vec<String> {
        self.adapters.keys().cloned().collect()
    }

    fn adapter(&self, name: &str) -> Option<Arc<dyn SourceAdapter>> {
        self.adapters.get(name).cloned()
    }

    async fn health_all(&self) -> Vec<AdapterHealth> {
        let futures = self.adapters.values().map(|adapter| {
            let adapter = Arc::clone(adapter);
            async move {
                let name = adapter.name().to_string();
                adapter.health_check().await.unwrap_or_else(|e| AdapterHealth {
                    name,
                    status: AdapterHealthStatus::Unhealthy,
                    consecutive_failures: 0,
                    last_error: Some(e.to_string()),
                    details: HashMap::new(),
                })
            }
        });

        join_all(futures).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FileAdapter;
    use runbook_domain::value_objects::AdapterConfig;

    fn file_config(name: &str, path: &std::path::Path) -> AdapterConfig {
        AdapterConfig::File {
            name: name.to_string(),
            root: path.to_string_lossy().to_string(),
            include: vec!["**/*.md".to_string()],
            exclude: vec![],
        }
    }

    #[tokio::test]
    async fn fans_out_search_across_all_adapters() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        std::fs::write(dir_a.path().join("a.md"), "# Alpha runbook\nstep one").unwrap();
        std::fs::write(dir_b.path().join("b.md"), "# Beta runbook\nstep two").unwrap();

        let adapter_a = FileAdapter::new(&file_config("source-a", dir_a.path())).unwrap();
        let adapter_b = FileAdapter::new(&file_config("source-b", dir_b.path())).unwrap();

        let registry = DefaultAdapterRegistry::from_adapters(vec![
            Arc::new(adapter_a),
            Arc::new(adapter_b),
        ]);

        let outcomes = registry.search_all("runbook", 10).await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.error.is_none()));
    }

    #[tokio::test]
    async fn adapter_names_reflects_registrations() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = FileAdapter::new(&file_config("source-a", dir.path())).unwrap();
        let registry = DefaultAdapterRegistry::from_adapters(vec![Arc::new(adapter)]);

        assert_eq!(registry.adapter_names(), vec!["source-a".to_string()]);
        assert!(registry.adapter("source-a").is_some());
        assert!(registry.adapter("missing").is_none());
    }
}
