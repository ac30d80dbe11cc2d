//! Pure aggregation from session rows to an analytics snapshot
//!
//! Every field is a function of the input slice alone; fetching and window
//! selection happen in the service. Formulas:
//! - counts partition pomodoro sessions by completion flag, so
//!   completed + incomplete == total always holds
//! - credited time for a completed session is planned + overtime
//! - incomplete focus time is wall-clock minus pauses, finalized rows only
//! - ratios follow the `Ratio` sentinel policy (never NaN, never negative)

use pomora_domain::{AnalyticsSnapshot, Ratio, Session, Timeframe};

/// Aggregate a user's sessions for one window into a snapshot.
pub fn aggregate(timeframe: Timeframe, sessions: &[Session]) -> AnalyticsSnapshot {
    let pomodoros: Vec<&Session> =
        sessions.iter().filter(|s| !s.kind.is_break()).collect();

    let total_pomodoro_sessions = pomodoros.len() as i64;
    let completed_sessions = pomodoros.iter().filter(|s| s.completed).count() as i64;
    let incomplete_sessions = total_pomodoro_sessions - completed_sessions;

    let short_breaks = sessions
        .iter()
        .filter(|s| s.kind == pomora_domain::SessionKind::ShortBreak && s.completed)
        .count() as i64;
    let long_breaks = sessions
        .iter()
        .filter(|s| s.kind == pomora_domain::SessionKind::LongBreak && s.completed)
        .count() as i64;

    let completion_rate = if total_pomodoro_sessions == 0 {
        0
    } else {
        percentage(completed_sessions, total_pomodoro_sessions)
    };

    let completed_focus_secs: i64 =
        pomodoros.iter().filter(|s| s.completed).map(|s| s.credited_secs()).sum();
    let incomplete_focus_secs: i64 =
        pomodoros.iter().filter(|s| !s.completed).map(|s| s.active_secs()).sum();
    let break_secs: i64 = sessions
        .iter()
        .filter(|s| s.kind.is_break() && s.completed)
        .map(|s| s.credited_secs())
        .sum();

    let total_pauses: i64 = pomodoros.iter().map(|s| s.pause_count).sum();
    let paused_secs: i64 = pomodoros.iter().map(|s| s.paused_secs).sum();
    let completed_pauses: i64 =
        pomodoros.iter().filter(|s| s.completed).map(|s| s.pause_count).sum();

    let average_pauses_per_completed = if completed_sessions == 0 {
        0.0
    } else {
        round_one_decimal(completed_pauses as f64 / completed_sessions as f64)
    };

    let overtime_sessions: Vec<i64> =
        sessions.iter().filter(|s| s.extra_secs > 0).map(|s| s.extra_secs).collect();
    let average_extra_secs = if overtime_sessions.is_empty() {
        0
    } else {
        let sum: i64 = overtime_sessions.iter().sum();
        (sum as f64 / overtime_sessions.len() as f64).round() as i64
    };

    AnalyticsSnapshot {
        timeframe,
        completed_sessions,
        incomplete_sessions,
        total_pomodoro_sessions,
        short_breaks,
        long_breaks,
        completion_rate,
        total_focus_minutes: minutes(completed_focus_secs),
        total_break_minutes: minutes(break_secs),
        incomplete_focus_minutes: minutes(incomplete_focus_secs),
        completed_vs_incomplete_ratio: Ratio::of(
            completed_sessions as f64,
            incomplete_sessions as f64,
        ),
        focus_time_ratio: Ratio::of(completed_focus_secs as f64, incomplete_focus_secs as f64),
        total_pauses,
        average_pauses_per_completed,
        total_pause_minutes: minutes(paused_secs),
        average_extra_secs,
    }
}

/// Convert seconds to minutes, rounded to the nearest integer.
fn minutes(secs: i64) -> i64 {
    (secs as f64 / 60.0).round() as i64
}

fn percentage(part: i64, whole: i64) -> i64 {
    (part as f64 / whole as f64 * 100.0).round() as i64
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
