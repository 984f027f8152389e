//! Authentication Service Adapter
//!
//! Null implementation of the authentication port, used when the service
//! runs without auth configured (local development, single-tenant
//! deployments behind a trusted proxy).

use async_trait::async_trait;
use runbook_domain::error::Result;
use runbook_domain::ports::AuthServiceInterface;

/// Null implementation: accepts every token and issues a placeholder one.
pub struct NullAuthService;

impl NullAuthService {
    /// Construct the null auth service
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullAuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthServiceInterface for NullAuthService {
    async fn validate_token(&self, _token: &str) -> Result<bool> {
        Ok(true)
    }

    async fn generate_token(&self, _subject: &str) -> Result<String> {
        Ok("null-token".to_string())
    }
}
