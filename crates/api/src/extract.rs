//! Request extractors

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pomora_domain::{PomoraError, UserId};

use crate::context::AppContext;
use crate::error::ApiError;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header.
///
/// Rejections are always `401` with the `auth` taxonomy label, so clients
/// can distinguish a login problem from every other failure.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequestParts<Arc<AppContext>> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError(PomoraError::Auth("missing authorization header".to_string()))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(PomoraError::Auth("authorization header is not a bearer token".to_string()))
        })?;

        let user = state.authenticator.authenticate(token).await.map_err(ApiError)?;
        Ok(AuthenticatedUser(user))
    }
}
