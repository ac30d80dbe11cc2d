//! Analytics service tests over the in-memory repository
//!
//! Window selection and ownership scoping are exercised here; the
//! field-level formulas are covered by the aggregator's unit tests.

mod support;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pomora_core::AnalyticsService;
use pomora_domain::{Ratio, SessionKind, Timeframe, UserId};
use support::{finished_session, MockSessionRepository};

#[tokio::test]
async fn test_empty_window_yields_zeroed_snapshot() {
    // Scenario: no sessions in range.
    let repository = MockSessionRepository::new();
    let service = AnalyticsService::new(Arc::new(repository), chrono_tz::UTC);
    let now = Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0).unwrap();

    let snapshot =
        service.snapshot_at(&UserId::from("u-1"), Timeframe::Day, now).await.unwrap();

    assert_eq!(snapshot.total_pomodoro_sessions, 0);
    assert_eq!(snapshot.completed_sessions, 0);
    assert_eq!(snapshot.completion_rate, 0);
    assert_eq!(snapshot.completed_vs_incomplete_ratio, Ratio::ZERO);
}

#[tokio::test]
async fn test_all_completed_yields_infinite_ratio() {
    // Scenario: three completed pomodoros, zero incomplete.
    let user = UserId::from("u-1");
    let now = Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0).unwrap();
    let morning = Utc.with_ymd_and_hms(2026, 1, 7, 8, 0, 0).unwrap();

    let mut repository = MockSessionRepository::new();
    for _ in 0..3 {
        repository =
            repository.with_session(finished_session(&user, SessionKind::Pomodoro, morning, 1500, true));
    }
    let service = AnalyticsService::new(Arc::new(repository), chrono_tz::UTC);

    let snapshot = service.snapshot_at(&user, Timeframe::Day, now).await.unwrap();

    assert_eq!(snapshot.completed_sessions, 3);
    assert_eq!(snapshot.incomplete_sessions, 0);
    assert!(snapshot.completed_vs_incomplete_ratio.is_infinite());
    assert_eq!(snapshot.completion_rate, 100);
    assert_eq!(snapshot.total_focus_minutes, 75);
}

#[tokio::test]
async fn test_day_window_excludes_yesterday() {
    let user = UserId::from("u-1");
    let now = Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0).unwrap();
    let today = Utc.with_ymd_and_hms(2026, 1, 7, 9, 0, 0).unwrap();
    let yesterday = Utc.with_ymd_and_hms(2026, 1, 6, 9, 0, 0).unwrap();

    let repository = MockSessionRepository::new()
        .with_session(finished_session(&user, SessionKind::Pomodoro, today, 1500, true))
        .with_session(finished_session(&user, SessionKind::Pomodoro, yesterday, 1500, true));
    let service = AnalyticsService::new(Arc::new(repository), chrono_tz::UTC);

    let day = service.snapshot_at(&user, Timeframe::Day, now).await.unwrap();
    assert_eq!(day.total_pomodoro_sessions, 1);

    // The week window (since Sunday the 4th) sees both.
    let week = service.snapshot_at(&user, Timeframe::Week, now).await.unwrap();
    assert_eq!(week.total_pomodoro_sessions, 2);
}

#[tokio::test]
async fn test_sessions_are_scoped_to_the_caller() {
    let user = UserId::from("u-1");
    let other = UserId::from("u-2");
    let now = Utc.with_ymd_and_hms(2026, 1, 7, 12, 0, 0).unwrap();
    let morning = Utc.with_ymd_and_hms(2026, 1, 7, 8, 0, 0).unwrap();

    let repository = MockSessionRepository::new()
        .with_session(finished_session(&user, SessionKind::Pomodoro, morning, 1500, true))
        .with_session(finished_session(&other, SessionKind::Pomodoro, morning, 1500, true));
    let service = AnalyticsService::new(Arc::new(repository), chrono_tz::UTC);

    let snapshot = service.snapshot_at(&user, Timeframe::Day, now).await.unwrap();
    assert_eq!(snapshot.total_pomodoro_sessions, 1);
}
