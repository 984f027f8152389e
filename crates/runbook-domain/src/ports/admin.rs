//! Administrative Interfaces
//!
//! Cross-cutting interfaces used by the health check, performance, and
//! lifecycle endpoints (§6 of the external interface contract) rather than
//! by any single adapter or provider.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coarse lifecycle state of a managed component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PortServiceState {
    /// Component has not finished initializing
    #[default]
    Starting,
    /// Component is serving requests normally
    Ready,
    /// Component is serving but degraded
    Degraded,
    /// Component is tearing down
    ShuttingDown,
    /// Component has stopped
    Stopped,
}

/// A component that participates in the composition root's ordered
/// startup/shutdown sequence
#[async_trait]
pub trait LifecycleManaged: Send + Sync {
    /// Component name, used in logs and the health response
    fn component_name(&self) -> &str;

    /// Perform any startup work (connection warm-up, index load, etc.)
    async fn start(&self) -> Result<()>;

    /// Perform graceful shutdown. Must be safe to call even if `start`
    /// never completed.
    async fn stop(&self) -> Result<()>;

    /// Current lifecycle state
    fn state(&self) -> PortServiceState;
}

/// Coordinates orderly shutdown of all registered [`LifecycleManaged`] components
///
/// Components are stopped in the reverse of their registration order, so
/// that components which depend on others at runtime are torn down first.
#[async_trait]
pub trait ShutdownCoordinator: Send + Sync {
    /// Trigger shutdown of all registered components, reverse-registration-order
    async fn shutdown_all(&self, timeout: Duration) -> Result<()>;
}

/// Health of a single dependency (an adapter, the cache, the embedding provider)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyHealth {
    /// Dependency name
    pub name: String,
    /// Whether the dependency is currently usable
    pub healthy: bool,
    /// Optional human-readable detail (error message, latency, etc.)
    pub message: Option<String>,
}

/// Anything that can report its own health for aggregation into `/health`
#[async_trait]
pub trait DependencyHealthCheck: Send + Sync {
    /// Perform a health check and report the result
    async fn health_check(&self) -> DependencyHealth;
}

/// Aggregated response for the `/health` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedHealthResponse {
    /// Overall healthy flag: true only if every dependency is healthy
    pub healthy: bool,
    /// Per-dependency breakdown
    pub dependencies: Vec<DependencyHealth>,
    /// Service uptime in seconds
    pub uptime_seconds: u64,
}

/// Snapshot of request-latency and cache-performance telemetry, used by
/// the `/performance` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PerformanceMetricsData {
    /// 50th percentile request latency, in milliseconds
    pub p50_latency_ms: f64,
    /// 95th percentile request latency, in milliseconds
    pub p95_latency_ms: f64,
    /// 99th percentile request latency, in milliseconds
    pub p99_latency_ms: f64,
    /// Total requests observed
    pub total_requests: u64,
    /// Tier-1 (in-process) cache hit rate, 0.0 to 1.0
    pub tier1_cache_hit_rate: f64,
    /// Tier-2 (external) cache hit rate, 0.0 to 1.0
    pub tier2_cache_hit_rate: f64,
}

/// Collects per-request latency samples and reports aggregated percentiles
#[async_trait]
pub trait PerformanceMetricsInterface: Send + Sync {
    /// Record a completed request's latency
    async fn record_latency(&self, operation: &str, duration: Duration);

    /// Snapshot current aggregated metrics
    async fn snapshot(&self) -> PerformanceMetricsData;
}
