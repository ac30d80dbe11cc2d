//! Port interface for the timer's session persistence calls
//!
//! The engine issues exactly one call per lifecycle edge: a create on
//! Start and a finalize patch on Complete/Reset. The credential belongs to
//! the gateway implementation; the engine never sees it.

use async_trait::async_trait;
use pomora_domain::{NewSession, Result, Session, SessionPatch};

/// Trait for the session store as seen from the timer.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Create an open session; the returned record carries the
    /// server-assigned identifier the engine binds to.
    ///
    /// # Errors
    /// `PomoraError::Auth` must be distinguishable from transient
    /// failures so the engine can present a login prompt instead of a
    /// generic error.
    async fn create_session(&self, session: NewSession) -> Result<Session>;

    /// Apply the terminal finalize patch.
    async fn finalize_session(&self, id: &str, patch: SessionPatch) -> Result<Session>;
}
