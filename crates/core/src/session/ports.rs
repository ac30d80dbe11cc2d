//! Port interfaces for session persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations. Every operation is scoped to the
//! owning user; rows belonging to other users are invisible through the
//! port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pomora_domain::{NewSession, Result, Session, SessionPatch, UserId};

/// Trait for persisting session records
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new open session and return the stored record, including
    /// its server-assigned identifier.
    async fn create(&self, user: &UserId, session: NewSession) -> Result<Session>;

    /// Apply the terminal finalize patch to a session.
    ///
    /// # Errors
    /// Returns `PomoraError::NotFound` when the id does not exist or
    /// belongs to a different user.
    async fn finalize(&self, user: &UserId, id: &str, patch: SessionPatch) -> Result<Session>;

    /// Fetch a single session by id.
    async fn find_by_id(&self, user: &UserId, id: &str) -> Result<Option<Session>>;

    /// Fetch all of the user's sessions with `started_at >= since`,
    /// newest first.
    async fn find_started_since(&self, user: &UserId, since: DateTime<Utc>)
        -> Result<Vec<Session>>;
}
