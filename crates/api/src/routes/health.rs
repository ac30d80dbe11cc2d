//! Health endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// `GET /api/health` - liveness plus database reachability. Unauthenticated.
pub async fn check(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let db = Arc::clone(&ctx.db);
    tokio::task::spawn_blocking(move || db.health_check())
        .await
        .map_err(|err| {
            ApiError(pomora_domain::PomoraError::Internal(format!("health task failed: {err}")))
        })?
        .map_err(ApiError)?;

    Ok(Json(HealthResponse { status: "ok", database: "reachable" }))
}
