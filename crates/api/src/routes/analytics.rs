//! Analytics endpoint

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use pomora_domain::{AnalyticsSnapshot, Timeframe};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    #[serde(default)]
    pub timeframe: Timeframe,
}

/// `GET /api/analytics?timeframe=day|week` - recompute the caller's
/// snapshot over the requested window.
pub async fn snapshot(
    State(ctx): State<Arc<AppContext>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsSnapshot>, ApiError> {
    let snapshot = ctx.analytics.snapshot(&user, params.timeframe).await?;
    Ok(Json(snapshot))
}
