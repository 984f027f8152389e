//! Infrastructure Service Ports
//!
//! Cross-cutting infrastructure contracts: authentication, the event bus,
//! distributed locking, system metrics, provider routing/health, snapshot
//! and change detection, and simple key-value state persistence.

/// Authentication service port
pub mod auth;
/// Event bus provider port
pub mod events;
/// Distributed lock provider port
pub mod lock;
/// System metrics collector port
pub mod metrics;
/// Provider routing and health-aware selection port
pub mod routing;
/// Document snapshot and change-detection port
pub mod snapshot;
/// Key-value state store port
pub mod state_store;

pub use auth::AuthServiceInterface;
pub use events::{DomainEventStream, EventBusProvider};
pub use lock::{LockGuard, LockProvider};
pub use metrics::{SystemMetrics, SystemMetricsCollectorInterface};
pub use routing::{ProviderContext, ProviderHealthStatus, ProviderRouter};
pub use snapshot::{DocumentSnapshot, SnapshotChanges, SnapshotProvider};
pub use state_store::StateStoreProvider;
