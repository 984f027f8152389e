//! # Runbook
//!
//! Operational knowledge retrieval service for incident response: finds
//! runbooks, procedures, decision trees, and escalation paths across
//! configured knowledge sources, over both MCP and HTTP.
//!
//! This crate is the public facade over the workspace's layered crates.
//!
//! ## Architecture
//!
//! The codebase follows Clean Architecture principles:
//!
//! - `domain` - core business logic and types (ports, entities, domain errors)
//! - `infrastructure` - config, logging, crypto, caching, state persistence
//! - `server` - MCP protocol server, HTTP transport, and tool dispatch
//!
//! Source adapters and concrete provider implementations live in
//! `runbook-providers`, pulled in for its `linkme` inventory registrations
//! but not re-exported here.

/// Domain layer - core business logic and types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use runbook_domain::*;
}

/// Server layer - MCP protocol server and handlers
///
/// Re-exports from the server crate for convenience
pub mod server {
    pub use runbook_server::*;
}

/// Infrastructure layer - config, logging, crypto, caching
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use runbook_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export main entry point at the crate root
pub use server::run_server;

// Re-export server types for convenience
pub use server::{McpServer, McpServerBuilder};
