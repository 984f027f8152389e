//! Application Port Interfaces
//!
//! Boundary contracts between the application layer and both its callers
//! (the MCP/HTTP handlers in `runbook-server`) and its dependencies (the
//! adapter registry and domain ports re-exported from `runbook-domain`).
//!
//! ## Organization
//!
//! - **services.rs** - application service interfaces (search, runbook, feedback, sources)
//! - **registry.rs** - the adapter registry port the search use case fans out through

/// Embedding store port
pub mod embedding_store;
/// Adapter registry port
pub mod registry;
/// Application service interfaces
pub mod services;

pub use embedding_store::EmbeddingStore;
pub use registry::{AdapterOutcome, AdapterRegistry};
pub use services::{
    FeedbackServiceInterface, RunbookServiceInterface, SearchServiceInterface,
    SourcesServiceInterface,
};
