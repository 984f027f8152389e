// Clippy allows for complex patterns in server code
#![allow(clippy::io_other_error)]
#![allow(clippy::for_kv_map)]
#![allow(clippy::while_let_loop)]

//! # Runbook Server
//!
//! MCP protocol and HTTP transport layer for the operational knowledge
//! retrieval service: runbook/procedure/escalation lookup during incident
//! response, served over both the MCP tool protocol and a REST API.
//!
//! ## Features
//!
//! - **Hybrid Search**: combines dense embedding similarity with lexical overlap
//! - **Runbook Structure**: decision trees, procedures, and escalation paths
//!   parsed out of adapter documents
//! - **Multi-Source**: file, HTTP, wiki, repo, and database source adapters
//! - **Two Transports**: stdio MCP and an HTTP/Rocket REST API over the same services
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use runbook_server::run_server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Run with default config (XDG paths + environment)
//!     run_server(None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! This crate implements the transport and protocol layer. It depends on
//! application service ports and infrastructure while remaining independent
//! of specific adapter/provider implementations.
//!
//! ## Core Types
//!
//! The most important types for users:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`McpServer`] | Main server struct |
//! | [`McpServerBuilder`] | Builder for server configuration |
//!
//! ## Feature Flags
//!
//! - `fastembed`: Local embeddings via FastEmbed (default)
//! - `redis-cache`: Redis distributed caching
//! - `adapter-database`: PostgreSQL source adapter
//! - `full`: All features enabled

// Documentation configuration for docs.rs
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod args;
pub mod builder;
pub mod constants;
pub mod formatter;
pub mod handlers;
pub mod init;
pub mod mcp_server;
pub mod tools;
pub mod transport;

// Placeholder modules removed - functionality handled by infrastructure layer

// Re-export core types for public API
pub use builder::McpServerBuilder;
pub use init::run_server;
pub use mcp_server::McpServer;
