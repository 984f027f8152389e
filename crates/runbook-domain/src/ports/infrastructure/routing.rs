//! Provider Routing Port
//!
//! Defines the contract for health-aware selection among interchangeable
//! backends: embedding providers and, most importantly, source adapters
//! during a fan-out search where one adapter failing must not block the
//! others.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Health status for a provider or adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderHealthStatus {
    /// Functioning normally
    #[default]
    Healthy,
    /// Experiencing issues but still usable
    Degraded,
    /// Not available
    Unhealthy,
}

/// Context for provider/adapter selection decisions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderContext {
    /// Type of operation being performed (e.g. "embedding", "search")
    pub operation_type: String,
    /// Preferred providers/adapters to try first (if healthy)
    pub preferred_providers: Vec<String>,
    /// Providers/adapters to exclude from selection
    pub excluded_providers: Vec<String>,
}

impl ProviderContext {
    /// Create a new provider context with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation type
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation_type = operation.into();
        self
    }

    /// Add a preferred provider
    pub fn prefer(mut self, provider: impl Into<String>) -> Self {
        self.preferred_providers.push(provider.into());
        self
    }

    /// Exclude a provider
    pub fn exclude(mut self, provider: impl Into<String>) -> Self {
        self.excluded_providers.push(provider.into());
        self
    }
}

/// Health-aware provider/adapter routing interface
///
/// Backs the adapter registry's fan-out: unhealthy adapters are skipped
/// rather than retried inline, so one failing source cannot stall a search
/// across the rest.
#[async_trait]
pub trait ProviderRouter: Send + Sync {
    /// Select the best embedding provider based on context
    async fn select_embedding_provider(&self, context: &ProviderContext) -> Result<String>;

    /// Current health status of a named provider/adapter
    async fn get_provider_health(&self, provider_id: &str) -> Result<ProviderHealthStatus>;

    /// Report a provider/adapter failure for health tracking
    async fn report_failure(&self, provider_id: &str, error: &str) -> Result<()>;

    /// Report a provider/adapter success for health tracking
    async fn report_success(&self, provider_id: &str) -> Result<()>;

    /// Health status of all known providers/adapters
    async fn get_all_health(&self) -> Result<HashMap<String, ProviderHealthStatus>>;

    /// Router statistics for monitoring
    async fn get_stats(&self) -> HashMap<String, serde_json::Value>;
}
