//! Source Adapter Implementations
//!
//! Concrete [`SourceAdapter`](runbook_domain::ports::providers::SourceAdapter)
//! implementations for every supported knowledge source, plus the fan-out
//! registry the application layer depends on.
//!
//! ## Available Adapters
//!
//! | Adapter | Source | Module |
//! |---------|--------|--------|
//! | File | Local/mounted filesystem tree | [`file`] |
//! | HTTP | Generic HTTP(S) API | [`http`] |
//! | Repo | Git-hosted docs-as-code | [`repo`] |
//! | Wiki | Confluence-style wiki API | [`wiki`] |
//! | Database | Relational/document database | [`database`] |

/// Filesystem tree adapter
pub mod file;
/// Generic HTTP(S) API adapter
pub mod http;
/// Repository (docs-as-code) adapter
pub mod repo;
/// Wiki adapter
pub mod wiki;

/// Database adapter: connection manager, query builder, schema detector, content processor
#[cfg(feature = "adapter-database")]
pub mod database;

/// Shared runbook-detection heuristic used by every adapter
pub mod runbook_detect;

/// Concurrent, failure-tolerant adapter registry
pub mod registry;

#[cfg(feature = "adapter-database")]
pub use database::DatabaseAdapter;
pub use file::FileAdapter;
pub use http::HttpAdapter;
pub use registry::DefaultAdapterRegistry;
pub use repo::RepoAdapter;
pub use wiki::WikiAdapter;

use runbook_domain::error::{Error, Result};
use runbook_domain::ports::providers::{CryptoProvider, EncryptedData};
use std::sync::Arc;

/// Resolves a named credential to its plaintext value.
///
/// Credentials for Repo/Wiki/Database adapters are never embedded in
/// configuration directly — only a `credential_ref` name is, and this
/// resolver looks the encrypted value up and decrypts it via the
/// configured [`CryptoProvider`]. The HTTP adapter's env-var auth variants
/// bypass this entirely and read the process environment instead, per
/// their documented auth contract.
#[derive(Clone)]
pub struct CredentialResolver {
    store: Arc<dyn runbook_domain::ports::infrastructure::StateStoreProvider>,
    crypto: Arc<dyn CryptoProvider>,
}

impl CredentialResolver {
    /// Build a resolver over the given state store and crypto provider
    pub fn new(
        store: Arc<dyn runbook_domain::ports::infrastructure::StateStoreProvider>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> Self {
        Self { store, crypto }
    }

    /// Resolve `credential_ref` to its plaintext value
    ///
    /// The state store holds the credential serialized as an
    /// [`EncryptedData`] JSON blob under key `credential:{credential_ref}`.
    pub async fn resolve(&self, credential_ref: &str) -> Result<String> {
        let key = format!("credential:{credential_ref}");
        let raw = self
            .store
            .load(&key)
            .await?
            .ok_or_else(|| Error::not_found(format!("credential '{credential_ref}'")))?;

        let encrypted: EncryptedData = serde_json::from_slice(&raw)?;
        let plaintext = self.crypto.decrypt(&encrypted)?;
        String::from_utf8(plaintext)
            .map_err(|e| Error::unknown(format!("credential '{credential_ref}' is not valid UTF-8: {e}")))
    }

    /// Store a plaintext credential, encrypting it at rest
    pub async fn store(&self, credential_ref: &str, plaintext: &str) -> Result<()> {
        let encrypted = self.crypto.encrypt(plaintext.as_bytes())?;
        let raw = serde_json::to_vec(&encrypted)?;
        let key = format!("credential:{credential_ref}");
        self.store.save(&key, &raw).await
    }
}

/// Read a named environment variable, mapping absence to a config error
///
/// Used by the HTTP adapter's `api_key`/`bearer_token`/`basic` auth variants,
/// which resolve credentials indirectly through env-var names per their
/// documented auth contract (never read directly from configuration).
pub(crate) fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::config(format!("environment variable '{name}' is not set")))
}
