//! Session lifecycle endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use pomora_domain::{NewSession, Session, SessionPatch};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::AuthenticatedUser;

/// `POST /api/sessions` - create an open session for the caller.
pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<NewSession>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let created = ctx.sessions.create(&user, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/sessions/{id}` - finalize a session exactly once.
pub async fn finalize(
    State(ctx): State<Arc<AppContext>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
    Json(body): Json<SessionPatch>,
) -> Result<Json<Session>, ApiError> {
    let updated = ctx.sessions.finalize(&user, &id, body).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Inclusive lower bound on `started_at`; defaults to the epoch.
    pub since: Option<DateTime<Utc>>,
}

/// `GET /api/sessions?since=<rfc3339>` - the caller's sessions, newest
/// first.
pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let since = params.since.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    let sessions = ctx.sessions.list_started_since(&user, since).await?;
    Ok(Json(sessions))
}
