//! Mock port implementations for testing
//!
//! Provides in-memory mocks for the session repository and gateway ports,
//! enabling deterministic tests without database or network dependencies.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use pomora_core::{SessionGateway, SessionRepository};
use pomora_domain::{
    NewSession, PomoraError, Result as DomainResult, Session, SessionPatch, UserId,
};

/// In-memory mock for `SessionRepository`.
///
/// Stores sessions in insertion order and applies the same ownership
/// scoping the real store does.
#[derive(Default, Clone)]
pub struct MockSessionRepository {
    sessions: Arc<Mutex<Vec<Session>>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with an existing session row.
    pub fn with_session(self, session: Session) -> Self {
        self.sessions.lock().push(session);
        self
    }

    /// All stored rows, for assertions.
    pub fn rows(&self) -> Vec<Session> {
        self.sessions.lock().clone()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, user: &UserId, session: NewSession) -> DomainResult<Session> {
        let stored = Session {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user.clone(),
            kind: session.kind,
            started_at: session.started_at,
            ended_at: None,
            duration_secs: session.duration_secs,
            completed: session.completed,
            extra_secs: 0,
            pause_count: session.pause_count,
            paused_secs: session.paused_secs,
        };
        self.sessions.lock().push(stored.clone());
        Ok(stored)
    }

    async fn finalize(
        &self,
        user: &UserId,
        id: &str,
        patch: SessionPatch,
    ) -> DomainResult<Session> {
        let mut sessions = self.sessions.lock();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id && &s.user_id == user)
            .ok_or_else(|| PomoraError::NotFound(format!("session not found: {id}")))?;

        session.completed = patch.completed;
        session.ended_at = Some(patch.ended_at);
        session.extra_secs = patch.extra_secs;
        session.pause_count = patch.pause_count;
        session.paused_secs = patch.paused_secs;
        Ok(session.clone())
    }

    async fn find_by_id(&self, user: &UserId, id: &str) -> DomainResult<Option<Session>> {
        Ok(self
            .sessions
            .lock()
            .iter()
            .find(|s| s.id == id && &s.user_id == user)
            .cloned())
    }

    async fn find_started_since(
        &self,
        user: &UserId,
        since: DateTime<Utc>,
    ) -> DomainResult<Vec<Session>> {
        let mut rows: Vec<Session> = self
            .sessions
            .lock()
            .iter()
            .filter(|s| &s.user_id == user && s.started_at >= since)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(rows)
    }
}

/// Failure injected into [`MockSessionGateway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayFailure {
    /// Reject every call as unauthenticated.
    Auth,
    /// Fail every call with a transient network error.
    Network,
}

/// In-memory mock for the timer's `SessionGateway` port.
///
/// Backed by a [`MockSessionRepository`] under a fixed test user, with an
/// optional injected failure mode.
#[derive(Clone)]
pub struct MockSessionGateway {
    repository: MockSessionRepository,
    user: UserId,
    failure: Arc<Mutex<Option<GatewayFailure>>>,
}

impl MockSessionGateway {
    pub fn new() -> Self {
        Self {
            repository: MockSessionRepository::new(),
            user: UserId::from("test-user"),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Inject or clear a failure mode for subsequent calls.
    pub fn fail_with(&self, failure: Option<GatewayFailure>) {
        *self.failure.lock() = failure;
    }

    /// All rows the gateway persisted, for assertions.
    pub fn rows(&self) -> Vec<Session> {
        self.repository.rows()
    }

    fn check_failure(&self) -> DomainResult<()> {
        match *self.failure.lock() {
            Some(GatewayFailure::Auth) => {
                Err(PomoraError::Auth("missing credentials".to_string()))
            }
            Some(GatewayFailure::Network) => {
                Err(PomoraError::Network("connection refused".to_string()))
            }
            None => Ok(()),
        }
    }
}

impl Default for MockSessionGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionGateway for MockSessionGateway {
    async fn create_session(&self, session: NewSession) -> DomainResult<Session> {
        self.check_failure()?;
        self.repository.create(&self.user, session).await
    }

    async fn finalize_session(&self, id: &str, patch: SessionPatch) -> DomainResult<Session> {
        self.check_failure()?;
        self.repository.finalize(&self.user, id, patch).await
    }
}

/// Build a finalized session row for aggregation-oriented tests.
pub fn finished_session(
    user: &UserId,
    kind: pomora_domain::SessionKind,
    started_at: DateTime<Utc>,
    duration_secs: i64,
    completed: bool,
) -> Session {
    Session {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.clone(),
        kind,
        started_at,
        ended_at: Some(started_at + chrono::Duration::seconds(duration_secs)),
        duration_secs,
        completed,
        extra_secs: 0,
        pause_count: 0,
        paused_secs: 0,
    }
}
