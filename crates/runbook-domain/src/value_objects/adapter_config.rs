//! Source Adapter Configuration Value Objects
//!
//! Each configured source is described by an [`AdapterConfig`] tagged on
//! `kind`. The tag selects which adapter implementation in
//! `runbook-providers` is constructed for it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-source adapter configuration, tagged by adapter kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdapterConfig {
    /// Local or mounted filesystem tree of documents
    File {
        /// Unique name for this source
        name: String,
        /// Root directory to watch/scan
        root: String,
        /// Glob patterns for files to include
        include: Vec<String>,
        /// Glob patterns for files to exclude
        exclude: Vec<String>,
    },
    /// Generic HTTP(S) API source
    Http {
        /// Unique name for this source
        name: String,
        /// Base URL of the API
        base_url: String,
        /// Name of a credential (resolved via the credential store), if auth is required
        credential_ref: Option<String>,
    },
    /// Wiki-style source (e.g. Confluence, internal wiki)
    Wiki {
        /// Unique name for this source
        name: String,
        /// Base URL of the wiki instance
        base_url: String,
        /// Space/namespace key to restrict retrieval to
        space: Option<String>,
        /// Name of a credential (resolved via the credential store)
        credential_ref: Option<String>,
    },
    /// Git repository source (docs-as-code)
    Repo {
        /// Unique name for this source
        name: String,
        /// Clone URL
        url: String,
        /// Branch to track
        branch: String,
        /// Subdirectory within the repo to restrict retrieval to
        path_prefix: Option<String>,
    },
    /// Relational database source
    Database {
        /// Unique name for this source
        name: String,
        /// Name of a credential (resolved via the credential store) holding the DSN
        credential_ref: String,
        /// Table to read documents from
        table: String,
        /// Column containing document content
        content_column: String,
    },
}

impl AdapterConfig {
    /// Name configured for this source, regardless of adapter kind
    pub fn name(&self) -> &str {
        match self {
            AdapterConfig::File { name, .. }
            | AdapterConfig::Http { name, .. }
            | AdapterConfig::Wiki { name, .. }
            | AdapterConfig::Repo { name, .. }
            | AdapterConfig::Database { name, .. } => name,
        }
    }

    /// Short kind label, matching the `kind` tag used in configuration
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterConfig::File { .. } => "file",
            AdapterConfig::Http { .. } => "http",
            AdapterConfig::Wiki { .. } => "wiki",
            AdapterConfig::Repo { .. } => "repo",
            AdapterConfig::Database { .. } => "database",
        }
    }
}

/// Health status reported by a source adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealthStatus {
    /// Adapter is serving requests normally
    #[default]
    Healthy,
    /// Adapter is reachable but degraded (e.g. elevated latency, partial failures)
    Degraded,
    /// Adapter is not currently usable
    Unhealthy,
}

/// Point-in-time health report for a source adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterHealth {
    /// Adapter name
    pub name: String,
    /// Current status
    pub status: AdapterHealthStatus,
    /// Consecutive failure count since the last success
    pub consecutive_failures: u32,
    /// Last error message observed, if any
    pub last_error: Option<String>,
    /// Arbitrary adapter-reported diagnostic fields
    pub details: HashMap<String, String>,
}
