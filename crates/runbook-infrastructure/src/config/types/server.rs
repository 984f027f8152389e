//! Server configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Transport mode the server listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// MCP over stdio, for direct process-to-process invocation
    Stdio,
    /// HTTP + MCP tool endpoints, for networked clients
    Http,
}

impl Default for TransportMode {
    fn default() -> Self {
        Self::Http
    }
}

/// Network binding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerNetworkConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServerNetworkConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// TLS configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSslConfig {
    /// Serve over HTTPS
    pub https: bool,

    /// Path to the PEM certificate chain
    pub ssl_cert_path: Option<PathBuf>,

    /// Path to the PEM private key
    pub ssl_key_path: Option<PathBuf>,
}

/// Request and fan-out timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerTimeoutConfig {
    /// Overall per-request deadline in milliseconds; no tool call may exceed this
    pub request_timeout_ms: u64,

    /// Maximum number of queries executed concurrently across all connections
    pub max_concurrent_queries: u32,
}

impl Default for ServerTimeoutConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: REQUEST_TIMEOUT_SECS * 1000,
            max_concurrent_queries: 64,
        }
    }
}

/// CORS configuration for the HTTP transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCorsConfig {
    /// Enable CORS
    pub enabled: bool,

    /// Allowed origins; empty means same-origin only
    pub allowed_origins: Vec<String>,
}

impl Default for ServerCorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Transport mode
    pub transport: TransportMode,

    /// Network binding
    pub network: ServerNetworkConfig,

    /// TLS
    pub ssl: ServerSslConfig,

    /// Timeouts and concurrency limits
    pub timeout: ServerTimeoutConfig,

    /// CORS
    pub cors: ServerCorsConfig,
}
