//! Session records and lifecycle payloads
//!
//! A session is one timed interval (focus period or break) with a planned
//! duration fixed at creation. Pause metrics accumulate client-side and are
//! flushed only by the terminal finalize patch; after finalization the row
//! is immutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::user::UserId;

/// Kind of timed interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SessionKind {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Stable identifier used for persistence and wire payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Pomodoro => "pomodoro",
            SessionKind::ShortBreak => "shortBreak",
            SessionKind::LongBreak => "longBreak",
        }
    }

    /// Parse the persisted identifier back into a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pomodoro" => Some(SessionKind::Pomodoro),
            "shortBreak" => Some(SessionKind::ShortBreak),
            "longBreak" => Some(SessionKind::LongBreak),
            _ => None,
        }
    }

    /// Whether this kind is a break (short or long).
    pub fn is_break(&self) -> bool {
        matches!(self, SessionKind::ShortBreak | SessionKind::LongBreak)
    }
}

/// One persisted timed interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Server-assigned opaque identifier (UUID v4).
    pub id: String,
    /// Owning user; all queries and mutations are scoped by it.
    pub user_id: UserId,
    pub kind: SessionKind,
    pub started_at: DateTime<Utc>,
    /// Set exactly once, by the finalize patch.
    pub ended_at: Option<DateTime<Utc>>,
    /// Planned length in whole seconds; immutable after creation.
    pub duration_secs: i64,
    pub completed: bool,
    /// Seconds accrued past the planned duration. Non-zero only when the
    /// session ran past its planned length before finalization.
    pub extra_secs: i64,
    pub pause_count: i64,
    /// Total paused duration in seconds.
    pub paused_secs: i64,
}

impl Session {
    /// A session is finalized once its end timestamp is recorded; no
    /// further mutation is accepted afterwards.
    pub fn is_finalized(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Wall-clock seconds actually spent in the session, excluding pauses.
    ///
    /// Returns 0 for sessions that were never finalized: an open row
    /// carries no trustworthy elapsed figure.
    pub fn active_secs(&self) -> i64 {
        match self.ended_at {
            Some(ended) => {
                let elapsed = (ended - self.started_at).num_seconds() - self.paused_secs;
                elapsed.max(0)
            }
            None => 0,
        }
    }

    /// Planned plus overtime seconds; the time credited to a completed
    /// session.
    pub fn credited_secs(&self) -> i64 {
        self.duration_secs + self.extra_secs
    }
}

/// Create-request payload for `POST /api/sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub kind: SessionKind,
    pub started_at: DateTime<Utc>,
    pub duration_secs: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub pause_count: i64,
    #[serde(default)]
    pub paused_secs: i64,
}

/// Finalize-request payload for `PATCH /api/sessions/{id}`.
///
/// Shared by the Complete and Reset transitions; they differ only in the
/// `completed` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub completed: bool,
    pub ended_at: DateTime<Utc>,
    #[serde(default)]
    pub extra_secs: i64,
    #[serde(default)]
    pub pause_count: i64,
    #[serde(default)]
    pub paused_secs: i64,
}
