//! Infrastructure Services
//!
//! Concrete implementations of port traits defined in `runbook-domain` and
//! `runbook-application` that don't belong in `runbook-providers` (which is
//! reserved for user-selectable, feature-gated providers). The composition
//! root in `runbook-server::init` wires these together at startup.

pub mod admin;
pub mod auth;
pub mod embedding_store;
pub mod lifecycle;
pub mod snapshot;
pub mod state_store;

pub use admin::{AtomicPerformanceMetrics, NullPerformanceMetrics};
pub use embedding_store::EmbeddingStoreImpl;
pub use lifecycle::DefaultShutdownCoordinator;
pub use state_store::{FileStateStoreProvider, InMemoryStateStoreProvider};
