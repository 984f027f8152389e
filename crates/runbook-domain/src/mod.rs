//! Domain layer for the runbook knowledge retrieval service.
//!
//! This crate holds the parts of the system that have no external
//! dependency on I/O: value objects, the closed error taxonomy, the hybrid
//! search scorer, and the port traits that every provider and adapter in
//! `runbook-providers`/`runbook-infrastructure` implements.

/// Domain-relevant numeric defaults (document size limits, score weights,
/// cache TTLs, adapter fan-out timeouts)
pub mod constants;
/// Closed error taxonomy and `Result` alias shared across the workspace
pub mod error;
/// Domain events and the publisher port
pub mod events;
/// Boundary contracts implemented by providers, adapters, and infrastructure
pub mod ports;
/// Pure hybrid search scoring logic
pub mod search;
/// Immutable value objects (documents, runbooks, embeddings, search results)
pub mod value_objects;

pub use error::{Error, Result, Severity};
