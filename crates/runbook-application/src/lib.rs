//! Application Layer - Runbook Knowledge Service
//!
//! This crate contains the application layer of the operational knowledge
//! retrieval service, implementing use cases and orchestrating business
//! logic according to Clean Architecture principles.
//!
//! ## Architecture
//!
//! The application layer:
//! - Contains use case implementations (application services)
//! - Defines ports (interfaces) for external dependencies
//! - Orchestrates domain entities and services
//! - Has no dependencies on infrastructure or external frameworks
//!
//! ## Use Cases
//!
//! - Hybrid search across configured source adapters
//! - Runbook structure resolution (decision trees, procedures, escalation paths)
//! - Resolution feedback recording
//! - Source adapter health reporting
//!
//! ## Ports (Interfaces)
//!
//! Defines contracts for external dependencies:
//! - `ports::registry`: fan-out across source adapters
//! - `ports::embedding_store`: content-hash-keyed embedding cache
//! - `ports::services` / `domain_services`: application service interfaces
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `runbook-domain`: for domain entities, value objects, and core business rules
//! - Pure Rust libraries for async, serialization, etc.

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;
