//! Admin Service Implementations
//!
//! Real and null implementations of the domain's admin port traits
//! (`LifecycleManaged`, `ShutdownCoordinator`, `PerformanceMetricsInterface`).

use async_trait::async_trait;
use runbook_domain::ports::admin::{PerformanceMetricsData, PerformanceMetricsInterface};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Rolling-window latency tracker reporting p50/p95/p99 and cache hit rates.
///
/// Keeps the most recent `WINDOW` samples per operation and recomputes
/// percentiles on read; adequate for the request volumes this service
/// expects and avoids the complexity of a streaming quantile sketch.
pub struct AtomicPerformanceMetrics {
    start_time: Instant,
    total_requests: AtomicU64,
    tier1_hits: AtomicU64,
    tier1_total: AtomicU64,
    tier2_hits: AtomicU64,
    tier2_total: AtomicU64,
    samples: Mutex<HashMap<String, Vec<u64>>>,
}

const WINDOW: usize = 1000;

impl AtomicPerformanceMetrics {
    /// Create a new performance metrics tracker
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_requests: AtomicU64::new(0),
            tier1_hits: AtomicU64::new(0),
            tier1_total: AtomicU64::new(0),
            tier2_hits: AtomicU64::new(0),
            tier2_total: AtomicU64::new(0),
            samples: Mutex::new(HashMap::new()),
        }
    }

    /// Create as Arc for sharing across the composition root
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Record a tier-1 (in-process) cache lookup outcome
    pub fn record_tier1(&self, hit: bool) {
        self.tier1_total.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.tier1_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a tier-2 (external) cache lookup outcome
    pub fn record_tier2(&self, hit: bool) {
        self.tier2_total.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.tier2_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn rate(hits: &AtomicU64, total: &AtomicU64) -> f64 {
        let total = total.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        hits.load(Ordering::Relaxed) as f64 / total as f64
    }

    fn percentile(sorted: &[u64], pct: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let idx = ((sorted.len() - 1) as f64 * pct).round() as usize;
        sorted[idx.min(sorted.len() - 1)] as f64
    }
}

impl Default for AtomicPerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PerformanceMetricsInterface for AtomicPerformanceMetrics {
    async fn record_latency(&self, operation: &str, duration: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        let mut samples = self.samples.lock().expect("metrics lock poisoned");
        let bucket = samples.entry(operation.to_string()).or_default();
        bucket.push(duration.as_millis() as u64);
        if bucket.len() > WINDOW {
            bucket.remove(0);
        }
    }

    async fn snapshot(&self) -> PerformanceMetricsData {
        let mut all: Vec<u64> = {
            let samples = self.samples.lock().expect("metrics lock poisoned");
            samples.values().flatten().copied().collect()
        };
        all.sort_unstable();

        PerformanceMetricsData {
            p50_latency_ms: Self::percentile(&all, 0.50),
            p95_latency_ms: Self::percentile(&all, 0.95),
            p99_latency_ms: Self::percentile(&all, 0.99),
            total_requests: self.total_requests.load(Ordering::Relaxed),
            tier1_cache_hit_rate: Self::rate(&self.tier1_hits, &self.tier1_total),
            tier2_cache_hit_rate: Self::rate(&self.tier2_hits, &self.tier2_total),
        }
    }
}

/// Null implementation of [`PerformanceMetricsInterface`] for testing
#[derive(Default)]
pub struct NullPerformanceMetrics;

#[async_trait]
impl PerformanceMetricsInterface for NullPerformanceMetrics {
    async fn record_latency(&self, _operation: &str, _duration: Duration) {}

    async fn snapshot(&self) -> PerformanceMetricsData {
        PerformanceMetricsData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tracks_percentiles_and_hit_rates() {
        let metrics = AtomicPerformanceMetrics::new();
        for ms in [10, 20, 30, 40, 50] {
            metrics
                .record_latency("search", Duration::from_millis(ms))
                .await;
        }
        metrics.record_tier1(true);
        metrics.record_tier1(false);

        let snapshot = metrics.snapshot().await;
        assert_eq!(snapshot.total_requests, 5);
        assert!(snapshot.p50_latency_ms > 0.0);
        assert_eq!(snapshot.tier1_cache_hit_rate, 0.5);
    }
}
