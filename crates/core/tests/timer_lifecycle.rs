//! Timer engine lifecycle tests
//!
//! Exercises the engine against an in-memory gateway: the persisted rows
//! are asserted directly, the way the session store would see them.

mod support;

use std::sync::Arc;
use std::time::Duration;

use pomora_core::{RefreshBus, TimerEngine, TimerNotification, TimerPhase};
use pomora_domain::{PomoraError, SessionKind, TimerConfig};
use support::{GatewayFailure, MockSessionGateway};

fn engine_with(gateway: MockSessionGateway) -> TimerEngine {
    TimerEngine::new(Arc::new(gateway), RefreshBus::new(), TimerConfig::default())
}

#[tokio::test]
async fn test_start_then_complete_immediately() {
    // Scenario: a pomodoro completed with no elapsed overtime.
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    let created = engine.start().await.unwrap();
    assert_eq!(created.duration_secs, 1500);
    assert_eq!(created.kind, SessionKind::Pomodoro);

    let finalized = engine.complete().await.unwrap();
    assert!(finalized.completed);
    assert_eq!(finalized.extra_secs, 0);
    assert_eq!(finalized.pause_count, 0);
    assert_eq!(finalized.paused_secs, 0);
    assert!(finalized.ended_at.is_some());

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.state.phase, TimerPhase::Idle);
    assert!(!snapshot.state.is_bound());
    assert_eq!(snapshot.state.remaining_secs, 1500);
}

#[tokio::test(start_paused = true)]
async fn test_overtime_accrues_and_is_notified_once() {
    // Scenario: a short break run 10 seconds past its planned duration.
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());
    let mut notifications = engine.notifications();

    engine.change_kind(SessionKind::ShortBreak).await;
    engine.start().await.unwrap();

    // Virtual time: the 1 Hz ticker runs 300 planned + 10 overtime ticks.
    tokio::time::sleep(Duration::from_millis(310_500)).await;

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.state.remaining_secs, -10);
    assert!(snapshot.state.overtime);
    assert!(snapshot.display.starts_with('-'));

    let finalized = engine.complete().await.unwrap();
    assert!(finalized.completed);
    assert_eq!(finalized.extra_secs, 10);

    assert_eq!(notifications.recv().await.unwrap(), TimerNotification::OvertimeEntered);
    // Exactly one overtime notification per session.
    assert!(notifications.try_recv().is_err());
}

#[tokio::test]
async fn test_pause_metrics_flow_into_the_patch() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    engine.start().await.unwrap();
    engine.pause().await;
    assert_eq!(engine.snapshot().await.state.phase, TimerPhase::Paused);
    engine.resume().await;

    let finalized = engine.complete().await.unwrap();
    assert_eq!(finalized.pause_count, 1);
    // The pause was resumed immediately; no measurable paused time.
    assert_eq!(finalized.paused_secs, 0);
}

#[tokio::test]
async fn test_reset_on_idle_timer_is_a_no_op() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    assert!(engine.reset().await.unwrap().is_none());
    assert!(gateway.rows().is_empty());
    assert_eq!(engine.snapshot().await.state.phase, TimerPhase::Idle);
}

#[tokio::test]
async fn test_reset_finalizes_incomplete() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    engine.start().await.unwrap();
    let finalized = engine.reset().await.unwrap().unwrap();

    assert!(!finalized.completed);
    assert!(finalized.ended_at.is_some());
    assert_eq!(engine.snapshot().await.state.phase, TimerPhase::Idle);
}

#[tokio::test]
async fn test_start_is_rejected_while_active() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    engine.start().await.unwrap();
    let err = engine.start().await.unwrap_err();
    assert!(matches!(err, PomoraError::InvalidInput(_)));
    assert_eq!(gateway.rows().len(), 1);
}

#[tokio::test]
async fn test_auth_rejection_on_start_leaves_state_unchanged() {
    let gateway = MockSessionGateway::new();
    gateway.fail_with(Some(GatewayFailure::Auth));
    let engine = engine_with(gateway.clone());
    let mut notifications = engine.notifications();

    let err = engine.start().await.unwrap_err();
    assert!(matches!(err, PomoraError::Auth(_)));

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.state.phase, TimerPhase::Idle);
    assert!(!snapshot.state.is_bound());
    assert!(snapshot.state.auth_required);
    assert_eq!(notifications.recv().await.unwrap(), TimerNotification::AuthRequired);
    assert!(gateway.rows().is_empty());
}

#[tokio::test]
async fn test_transient_failure_on_complete_keeps_local_reset() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());
    let mut notifications = engine.notifications();

    engine.start().await.unwrap();
    gateway.fail_with(Some(GatewayFailure::Network));

    let err = engine.complete().await.unwrap_err();
    assert!(matches!(err, PomoraError::Network(_)));

    // The local terminal transition committed before the write failed.
    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.state.phase, TimerPhase::Idle);
    assert!(!snapshot.state.auth_required);
    assert!(matches!(
        notifications.recv().await.unwrap(),
        TimerNotification::PersistFailed(_)
    ));
}

#[tokio::test]
async fn test_complete_fires_refresh_signal() {
    let gateway = MockSessionGateway::new();
    let refresh = RefreshBus::new();
    let mut refreshes = refresh.subscribe();
    let engine = TimerEngine::new(Arc::new(gateway), refresh.clone(), TimerConfig::default());

    engine.start().await.unwrap();
    engine.complete().await.unwrap();

    assert!(refreshes.recv().await.is_ok());
}

#[tokio::test]
async fn test_change_kind_completes_running_session_first() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    engine.start().await.unwrap();
    engine.change_kind(SessionKind::ShortBreak).await;

    let rows = gateway.rows();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].completed);

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.state.kind, SessionKind::ShortBreak);
    assert_eq!(snapshot.state.remaining_secs, 300);
    assert_eq!(snapshot.state.phase, TimerPhase::Idle);
}

#[tokio::test]
async fn test_change_kind_resets_bound_paused_session() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    engine.start().await.unwrap();
    engine.pause().await;
    engine.change_kind(SessionKind::LongBreak).await;

    let rows = gateway.rows();
    assert_eq!(rows.len(), 1);
    // Paused, not actively running: finalized as a reset.
    assert!(!rows[0].completed);
    assert_eq!(rows[0].pause_count, 1);

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.state.kind, SessionKind::LongBreak);
    assert_eq!(snapshot.state.remaining_secs, 900);
}

#[tokio::test]
async fn test_change_kind_without_session_switches_immediately() {
    let gateway = MockSessionGateway::new();
    let engine = engine_with(gateway.clone());

    engine.change_kind(SessionKind::LongBreak).await;

    assert!(gateway.rows().is_empty());
    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.state.kind, SessionKind::LongBreak);
    assert_eq!(snapshot.state.remaining_secs, 900);
}
