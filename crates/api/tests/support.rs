//! Shared helpers for endpoint integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pomora_api::{router, AppContext};
use pomora_domain::{Config, UserId};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Shared context for integration tests that drive the full router.
pub struct TestContext {
    pub app: Router,
    pub ctx: Arc<AppContext>,
    pub user: UserId,
    pub token: String,
    /// Keep temporary directory alive for the lifetime of the context.
    _temp_dir: TempDir,
}

/// Create a new test context with a fresh database and one issued token.
pub async fn setup_test_context() -> TestContext {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");

    let mut config = Config::default();
    config.database.path =
        temp_dir.path().join("pomora.db").to_string_lossy().into_owned();
    config.database.pool_size = 2;

    let ctx = Arc::new(AppContext::new(config).expect("failed to initialise context"));

    let user = UserId::from("test-user");
    let token = ctx.tokens.issue_token(&user, "tests").await.expect("token issued");

    TestContext { app: router(Arc::clone(&ctx)), ctx, user, token, _temp_dir: temp_dir }
}

impl TestContext {
    /// Issue a request against the router and decode the JSON response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request built"),
            None => builder.body(Body::empty()).expect("request built"),
        };

        let response =
            self.app.clone().oneshot(request).await.expect("router handled request");
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collected");
        // Framework rejections (bad query strings, malformed JSON) carry
        // plain-text bodies; represent those as null.
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    /// Create a session through the API and return its identifier.
    pub async fn create_session(&self, kind: &str, duration_secs: i64) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/sessions",
                Some(&self.token),
                Some(serde_json::json!({
                    "kind": kind,
                    "startedAt": chrono::Utc::now().to_rfc3339(),
                    "durationSecs": duration_secs,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["id"].as_str().expect("created id").to_string()
    }

    /// Finalize a session through the API.
    pub async fn finalize_session(
        &self,
        id: &str,
        completed: bool,
        extra_secs: i64,
    ) -> (StatusCode, Value) {
        self.request(
            Method::PATCH,
            &format!("/api/sessions/{id}"),
            Some(&self.token),
            Some(serde_json::json!({
                "completed": completed,
                "endedAt": chrono::Utc::now().to_rfc3339(),
                "extraSecs": extra_secs,
                "pauseCount": 0,
                "pausedSecs": 0,
            })),
        )
        .await
    }
}
