//! MCP Transport Layer
//!
//! Transport implementations for the MCP protocol.
//!
//! ## Available Transports
//!
//! | Transport | Description | Use Case |
//! |-----------|-------------|----------|
//! | [`stdio`] | Standard I/O streams | CLI tools, IDE integrations |
//! | [`http`] | HTTP server (Rocket) | REST API clients |

pub mod http;
pub mod stdio;

// Re-export transport types
pub use http::{HttpTransport, HttpTransportConfig};
pub use stdio::StdioServerExt;

// Re-export TransportMode from infrastructure config (single source of truth)
pub use runbook_infrastructure::config::TransportMode;
