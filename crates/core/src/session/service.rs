//! Session lifecycle service - core business logic

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pomora_domain::{NewSession, PomoraError, Result, Session, SessionPatch, UserId};
use tracing::debug;

use super::ports::SessionRepository;

/// Session lifecycle service
///
/// Validates lifecycle requests before they reach persistence and enforces
/// the at-most-once finalization contract. Ownership scoping is delegated
/// to the repository port, which never exposes foreign rows.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
}

impl SessionService {
    /// Create a new session service
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Create a new open session for the user.
    ///
    /// # Errors
    /// Returns `PomoraError::InvalidInput` when the planned duration is not
    /// positive or the pause metrics are negative.
    pub async fn create(&self, user: &UserId, session: NewSession) -> Result<Session> {
        if session.duration_secs <= 0 {
            return Err(PomoraError::InvalidInput(
                "session duration must be greater than zero".to_string(),
            ));
        }
        if session.pause_count < 0 || session.paused_secs < 0 {
            return Err(PomoraError::InvalidInput(
                "pause metrics must be non-negative".to_string(),
            ));
        }

        let created = self.repository.create(user, session).await?;
        debug!(session_id = %created.id, kind = created.kind.as_str(), "session created");
        Ok(created)
    }

    /// Finalize a session exactly once.
    ///
    /// Both terminal transitions (complete and reset) share this path; the
    /// patch's `completed` flag carries the distinction.
    ///
    /// # Errors
    /// Returns `PomoraError::NotFound` for an unknown or foreign id and
    /// `PomoraError::InvalidInput` when the row was already finalized or
    /// the patch metrics are negative.
    pub async fn finalize(&self, user: &UserId, id: &str, patch: SessionPatch) -> Result<Session> {
        if patch.extra_secs < 0 || patch.pause_count < 0 || patch.paused_secs < 0 {
            return Err(PomoraError::InvalidInput(
                "finalize metrics must be non-negative".to_string(),
            ));
        }

        let existing = self
            .repository
            .find_by_id(user, id)
            .await?
            .ok_or_else(|| PomoraError::NotFound(format!("session not found: {id}")))?;

        if existing.is_finalized() {
            return Err(PomoraError::InvalidInput(format!("session already finalized: {id}")));
        }

        let updated = self.repository.finalize(user, id, patch).await?;
        debug!(session_id = %updated.id, completed = updated.completed, "session finalized");
        Ok(updated)
    }

    /// Fetch the user's sessions started at or after `since`, newest first.
    pub async fn list_started_since(
        &self,
        user: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Session>> {
        self.repository.find_started_since(user, since).await
    }
}
