//! Sources Service Use Case
//!
//! Surfaces every configured source adapter and its current health, for
//! the `list_sources` tool and the `/sources` HTTP endpoint.

use crate::ports::registry::AdapterRegistry;
use crate::ports::services::SourcesServiceInterface;
use async_trait::async_trait;
use runbook_domain::error::Result;
use runbook_domain::value_objects::AdapterHealth;
use std::sync::Arc;

/// Sources service implementation
pub struct SourcesServiceImpl {
    registry: Arc<dyn AdapterRegistry>,
}

impl SourcesServiceImpl {
    /// Construct a new sources service over an adapter registry
    pub fn new(registry: Arc<dyn AdapterRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl SourcesServiceInterface for SourcesServiceImpl {
    async fn list_sources(&self) -> Result<Vec<AdapterHealth>> {
        Ok(self.registry.health_all().await)
    }
}
