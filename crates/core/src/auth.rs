//! Port interface for request authentication
//!
//! The identity provider itself is external; the service only verifies an
//! opaque bearer token and resolves the owning user.

use async_trait::async_trait;
use pomora_domain::{Result, UserId};

/// Trait for resolving bearer tokens to user identities.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve a bearer token to its owning user.
    ///
    /// # Errors
    /// Returns `PomoraError::Auth` for unknown or malformed tokens, so
    /// callers can always distinguish authentication failures from other
    /// errors.
    async fn authenticate(&self, token: &str) -> Result<UserId>;
}
