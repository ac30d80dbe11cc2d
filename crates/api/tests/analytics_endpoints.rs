//! Analytics and health endpoint integration tests.

mod support;

use axum::http::{Method, StatusCode};
use support::setup_test_context;

#[tokio::test]
async fn test_analytics_requires_authentication() {
    let ctx = setup_test_context().await;

    let (status, body) =
        ctx.request(Method::GET, "/api/analytics?timeframe=day", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "auth");
}

#[tokio::test]
async fn test_empty_window_yields_zeroed_snapshot() {
    // Scenario: no sessions in range.
    let ctx = setup_test_context().await;

    let (status, body) = ctx
        .request(Method::GET, "/api/analytics?timeframe=day", Some(&ctx.token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeframe"], "day");
    assert_eq!(body["totalPomodoroSessions"], 0);
    assert_eq!(body["completedSessions"], 0);
    assert_eq!(body["completionRate"], 0);
    assert_eq!(body["completedVsIncompleteRatio"], 0.0);
    assert_eq!(body["focusTimeRatio"], 0.0);
}

#[tokio::test]
async fn test_all_completed_yields_infinite_sentinel() {
    // Scenario: 3 completed pomodoros, 0 incomplete.
    let ctx = setup_test_context().await;

    for _ in 0..3 {
        let id = ctx.create_session("pomodoro", 1500).await;
        let (status, _) = ctx.finalize_session(&id, true, 0).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = ctx
        .request(Method::GET, "/api/analytics?timeframe=day", Some(&ctx.token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completedSessions"], 3);
    assert_eq!(body["incompleteSessions"], 0);
    assert_eq!(body["completedVsIncompleteRatio"], "Infinity");
    assert_eq!(body["completionRate"], 100);
    assert_eq!(body["totalFocusMinutes"], 75);
}

#[tokio::test]
async fn test_mixed_outcomes_produce_finite_ratio() {
    let ctx = setup_test_context().await;

    let completed = ctx.create_session("pomodoro", 1500).await;
    ctx.finalize_session(&completed, true, 0).await;

    let abandoned = ctx.create_session("pomodoro", 1500).await;
    ctx.finalize_session(&abandoned, false, 0).await;

    let (status, body) = ctx
        .request(Method::GET, "/api/analytics?timeframe=day", Some(&ctx.token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completedSessions"], 1);
    assert_eq!(body["incompleteSessions"], 1);
    assert_eq!(body["completedVsIncompleteRatio"], 1.0);
    assert_eq!(body["completionRate"], 50);
}

#[tokio::test]
async fn test_overtime_feeds_average_extra() {
    let ctx = setup_test_context().await;

    let id = ctx.create_session("shortBreak", 300).await;
    ctx.finalize_session(&id, true, 10).await;

    let (status, body) = ctx
        .request(Method::GET, "/api/analytics?timeframe=day", Some(&ctx.token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shortBreaks"], 1);
    assert_eq!(body["averageExtraSecs"], 10);
    // 310 seconds rounds to 5 minutes of break time.
    assert_eq!(body["totalBreakMinutes"], 5);
}

#[tokio::test]
async fn test_timeframe_defaults_to_day_and_accepts_week() {
    let ctx = setup_test_context().await;

    let (status, body) =
        ctx.request(Method::GET, "/api/analytics", Some(&ctx.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeframe"], "day");

    let (status, body) = ctx
        .request(Method::GET, "/api/analytics?timeframe=week", Some(&ctx.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeframe"], "week");
}

#[tokio::test]
async fn test_invalid_timeframe_is_a_client_error() {
    let ctx = setup_test_context().await;

    let (status, _body) = ctx
        .request(Method::GET, "/api/analytics?timeframe=month", Some(&ctx.token), None)
        .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_analytics_is_scoped_to_the_caller() {
    let ctx = setup_test_context().await;

    // Another user's session must not leak into this caller's snapshot.
    let other = pomora_domain::UserId::from("someone-else");
    let other_token = ctx.ctx.tokens.issue_token(&other, "tests").await.expect("token issued");

    let id = ctx.create_session("pomodoro", 1500).await;
    ctx.finalize_session(&id, true, 0).await;

    let (status, body) = ctx
        .request(Method::GET, "/api/analytics?timeframe=day", Some(&other_token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPomodoroSessions"], 0);
}

#[tokio::test]
async fn test_health_does_not_require_authentication() {
    let ctx = setup_test_context().await;

    let (status, body) = ctx.request(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "reachable");
}
