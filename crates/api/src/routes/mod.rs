//! HTTP routes

pub mod analytics;
pub mod health;
pub mod sessions;

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::context::AppContext;

/// Build the application router.
///
/// Everything under `/api` except `/api/health` requires a valid bearer
/// token, enforced per-handler by the `AuthenticatedUser` extractor.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/sessions", post(sessions::create).get(sessions::list))
        .route("/api/sessions/{id}", patch(sessions::finalize))
        .route("/api/analytics", get(analytics::snapshot))
        .route("/api/health", get(health::check))
        .with_state(ctx)
}
