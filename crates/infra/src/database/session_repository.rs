//! SQLite-backed implementation of the `SessionRepository` port.
//!
//! Provides async persistence for session lifecycle records. All queries
//! are issued through the shared `DbManager` pool and scoped by the owning
//! user; rows belonging to other users are invisible through this type.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pomora_core::SessionRepository as SessionRepositoryPort;
use pomora_domain::{
    NewSession, PomoraError, Result as DomainResult, Session, SessionKind, SessionPatch, UserId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use crate::errors::{map_join_error, InfraError};

const SESSION_COLUMNS: &str =
    "id, user_id, kind, started_at, ended_at, duration_secs, completed, extra_secs, pause_count, paused_secs";

/// SQLite-backed session repository.
pub struct SqliteSessionRepository {
    db: Arc<DbManager>,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepositoryPort for SqliteSessionRepository {
    async fn create(&self, user: &UserId, session: NewSession) -> DomainResult<Session> {
        let db = Arc::clone(&self.db);
        let user = user.clone();

        task::spawn_blocking(move || -> DomainResult<Session> {
            let conn = db.get_connection()?;
            let id = Uuid::new_v4().to_string();

            conn.execute(
                "INSERT INTO sessions (id, user_id, kind, started_at, ended_at, duration_secs, completed, extra_secs, pause_count, paused_secs)
                 VALUES (?, ?, ?, ?, NULL, ?, ?, 0, ?, ?)",
                params![
                    id,
                    user.as_str(),
                    session.kind.as_str(),
                    session.started_at.timestamp(),
                    session.duration_secs,
                    session.completed,
                    session.pause_count,
                    session.paused_secs,
                ],
            )
            .map_err(InfraError::from)?;

            fetch_session(&conn, &user, &id)?
                .ok_or_else(|| PomoraError::Internal(format!("created session vanished: {id}")))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn finalize(
        &self,
        user: &UserId,
        id: &str,
        patch: SessionPatch,
    ) -> DomainResult<Session> {
        let db = Arc::clone(&self.db);
        let user = user.clone();
        let id = id.to_owned();

        task::spawn_blocking(move || -> DomainResult<Session> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE sessions
                     SET completed = ?, ended_at = ?, extra_secs = ?, pause_count = ?, paused_secs = ?
                     WHERE id = ? AND user_id = ?",
                    params![
                        patch.completed,
                        patch.ended_at.timestamp(),
                        patch.extra_secs,
                        patch.pause_count,
                        patch.paused_secs,
                        id,
                        user.as_str(),
                    ],
                )
                .map_err(InfraError::from)?;

            if changed == 0 {
                return Err(PomoraError::NotFound(format!("session not found: {id}")));
            }

            fetch_session(&conn, &user, &id)?
                .ok_or_else(|| PomoraError::Internal(format!("finalized session vanished: {id}")))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_id(&self, user: &UserId, id: &str) -> DomainResult<Option<Session>> {
        let db = Arc::clone(&self.db);
        let user = user.clone();
        let id = id.to_owned();

        task::spawn_blocking(move || -> DomainResult<Option<Session>> {
            let conn = db.get_connection()?;
            fetch_session(&conn, &user, &id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_started_since(
        &self,
        user: &UserId,
        since: DateTime<Utc>,
    ) -> DomainResult<Vec<Session>> {
        let db = Arc::clone(&self.db);
        let user = user.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<Session>> {
            let conn = db.get_connection()?;
            let sql = format!(
                "SELECT {SESSION_COLUMNS} FROM sessions
                 WHERE user_id = ? AND started_at >= ?
                 ORDER BY started_at DESC"
            );
            let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
            let rows = stmt
                .query_map(params![user.as_str(), since.timestamp()], map_session_row)
                .map_err(InfraError::from)?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(InfraError::from)?;
            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn fetch_session(conn: &Connection, user: &UserId, id: &str) -> DomainResult<Option<Session>> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ? AND user_id = ?");
    conn.prepare(&sql)
        .map_err(InfraError::from)?
        .query_row(params![id, user.as_str()], map_session_row)
        .optional()
        .map_err(|err| InfraError::from(err).into())
}

fn map_session_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    let kind_raw: String = row.get("kind")?;
    let kind = SessionKind::parse(&kind_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown session kind: {kind_raw}").into(),
        )
    })?;

    let started_at: i64 = row.get("started_at")?;
    let ended_at: Option<i64> = row.get("ended_at")?;

    Ok(Session {
        id: row.get("id")?,
        user_id: UserId::new(row.get::<_, String>("user_id")?),
        kind,
        started_at: Utc.timestamp_opt(started_at, 0).single().ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Integer,
                format!("invalid timestamp: {started_at}").into(),
            )
        })?,
        ended_at: match ended_at {
            Some(secs) => Some(Utc.timestamp_opt(secs, 0).single().ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Integer,
                    format!("invalid timestamp: {secs}").into(),
                )
            })?),
            None => None,
        },
        duration_secs: row.get("duration_secs")?,
        completed: row.get("completed")?,
        extra_secs: row.get("extra_secs")?,
        pause_count: row.get("pause_count")?,
        paused_secs: row.get("paused_secs")?,
    })
}
