//! HTTP-based implementations of the client-side gateway ports.
//!
//! Thin reqwest wrapper with bearer authentication and status-to-error
//! mapping. A 401 always maps to `PomoraError::Auth` so callers can
//! present a login prompt instead of a generic failure; there are no
//! retries and no request cancellation, matching the consuming flow.

use std::time::Duration;

use async_trait::async_trait;
use pomora_core::{AnalyticsGateway, SessionGateway};
use pomora_domain::{
    AnalyticsSnapshot, NewSession, PomoraError, Result, Session, SessionPatch, Timeframe,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the service (e.g. `http://localhost:8787`).
    pub base_url: String,
    /// Timeout for API requests.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8787".to_string(), timeout: Duration::from_secs(30) }
    }
}

/// Shared request plumbing for the concrete gateways.
struct HttpApi {
    http: reqwest::Client,
    config: ApiClientConfig,
    token: String,
}

impl HttpApi {
    fn new(config: ApiClientConfig, token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PomoraError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config, token })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        self.http.request(method, url).bearer_auth(&self.token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| PomoraError::Network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| PomoraError::Network(format!("failed to parse response: {e}")))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(%method, path, "api request");
        self.send(self.request(method, path).json(body)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "api request");
        self.send(self.request(Method::GET, path)).await
    }
}

fn map_status_error(status: StatusCode, body: &str) -> PomoraError {
    let detail = if body.is_empty() { status.to_string() } else { body.to_string() };
    match status {
        StatusCode::UNAUTHORIZED => PomoraError::Auth(detail),
        StatusCode::NOT_FOUND => PomoraError::NotFound(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            PomoraError::InvalidInput(detail)
        }
        _ => PomoraError::Network(format!("unexpected status {status}: {detail}")),
    }
}

/// HTTP implementation of the timer's [`SessionGateway`] port.
pub struct HttpSessionGateway {
    api: HttpApi,
}

impl HttpSessionGateway {
    /// Create a gateway bound to a service and bearer token.
    pub fn new(config: ApiClientConfig, token: impl Into<String>) -> Result<Self> {
        Ok(Self { api: HttpApi::new(config, token.into())? })
    }
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
    async fn create_session(&self, session: NewSession) -> Result<Session> {
        self.api.send_json(Method::POST, "/api/sessions", &session).await
    }

    async fn finalize_session(&self, id: &str, patch: SessionPatch) -> Result<Session> {
        self.api.send_json(Method::PATCH, &format!("/api/sessions/{id}"), &patch).await
    }
}

/// HTTP implementation of the [`AnalyticsGateway`] port.
pub struct HttpAnalyticsGateway {
    api: HttpApi,
}

impl HttpAnalyticsGateway {
    /// Create a gateway bound to a service and bearer token.
    pub fn new(config: ApiClientConfig, token: impl Into<String>) -> Result<Self> {
        Ok(Self { api: HttpApi::new(config, token.into())? })
    }
}

#[async_trait]
impl AnalyticsGateway for HttpAnalyticsGateway {
    async fn fetch(&self, timeframe: Timeframe) -> Result<AnalyticsSnapshot> {
        self.api.get(&format!("/api/analytics?timeframe={}", timeframe.as_str())).await
    }
}
