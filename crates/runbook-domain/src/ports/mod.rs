//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers.
//! Ports are organized by their purpose and enable dependency injection
//! with clear separation of concerns.
//!
//! ## Architecture
//!
//! Ports define the contracts that external layers must implement.
//! This follows the Dependency Inversion Principle:
//! - High-level modules (domain) define interfaces
//! - Low-level modules (providers, infrastructure) implement them
//!
//! ## Organization
//!
//! - **admin** - Administrative interfaces for health, performance, and lifecycle
//! - **infrastructure/** - Infrastructure services (auth, events, locking, routing, snapshots)
//! - **providers/** - External service provider ports (adapters, embeddings, cache, crypto)

/// Administrative interfaces for health, performance, and lifecycle management
pub mod admin;
/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

// Re-export commonly used port traits for convenience
pub use admin::{
    DependencyHealth, DependencyHealthCheck, ExtendedHealthResponse, LifecycleManaged,
    PerformanceMetricsData, PerformanceMetricsInterface, PortServiceState, ShutdownCoordinator,
};
pub use infrastructure::{
    AuthServiceInterface, DocumentSnapshot, DomainEventStream, EventBusProvider, LockGuard,
    LockProvider, ProviderContext, ProviderHealthStatus, ProviderRouter, SnapshotChanges,
    SnapshotProvider, StateStoreProvider, SystemMetrics, SystemMetricsCollectorInterface,
};
pub use providers::{
    CacheEntryConfig, CacheProvider, CacheStats, CryptoProvider, EmbeddingProvider, EncryptedData,
    RefreshOutcome, SourceAdapter, TaggedCacheProvider,
};
