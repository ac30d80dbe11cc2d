//! Pure timer state machine
//!
//! All transitions are synchronous mutations; the async engine wraps this
//! state in a lock and drives `tick` once per second. Durations are whole
//! seconds throughout; the remaining counter goes negative in overtime.

use chrono::{DateTime, Utc};
use pomora_domain::constants::PROGRESS_CAP_PERCENT;
use pomora_domain::{SessionKind, SessionPatch};
use serde::Serialize;

/// Lifecycle phase of the timer.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

/// Event produced by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The countdown crossed zero on this tick; raised exactly once per
    /// session.
    EnteredOvertime,
}

/// Snapshot-able timer state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub phase: TimerPhase,
    pub kind: SessionKind,
    /// Identifier bound from the create response; `None` until the create
    /// succeeds and again after every terminal transition.
    pub session_id: Option<String>,
    /// Planned duration for the current kind, seconds.
    pub planned_secs: i64,
    /// Countdown value; negative while in overtime.
    pub remaining_secs: i64,
    pub overtime: bool,
    /// Seconds accrued past the planned duration.
    pub extra_secs: i64,
    pub pause_count: i64,
    pub paused_secs: i64,
    pub started_at: Option<DateTime<Utc>>,
    /// Set when persistence was rejected for missing authentication; the
    /// timer keeps working locally but persistence-dependent actions are
    /// disabled until the caller re-authenticates.
    pub auth_required: bool,
    #[serde(skip)]
    pause_started_at: Option<DateTime<Utc>>,
}

impl TimerState {
    /// A fresh idle timer armed for `kind`.
    pub fn new(kind: SessionKind, planned_secs: i64) -> Self {
        Self {
            phase: TimerPhase::Idle,
            kind,
            session_id: None,
            planned_secs,
            remaining_secs: planned_secs,
            overtime: false,
            extra_secs: 0,
            pause_count: 0,
            paused_secs: 0,
            started_at: None,
            auth_required: false,
            pause_started_at: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Bind a created session and begin counting down.
    pub fn begin(&mut self, session_id: String, started_at: DateTime<Utc>) {
        self.phase = TimerPhase::Running;
        self.session_id = Some(session_id);
        self.remaining_secs = self.planned_secs;
        self.overtime = false;
        self.extra_secs = 0;
        self.pause_count = 0;
        self.paused_secs = 0;
        self.started_at = Some(started_at);
        self.pause_started_at = None;
    }

    /// Advance the countdown by one second.
    ///
    /// Only meaningful while running; the engine's ticker stops in any
    /// other phase. The zero-to-negative crossing flips the overtime flag
    /// and reports it exactly once; from then on the extra-time counter
    /// tracks the (negative) remaining value in lockstep.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs < 0 {
            self.extra_secs = -self.remaining_secs;
            if !self.overtime {
                self.overtime = true;
                return Some(TickEvent::EnteredOvertime);
            }
        }
        None
    }

    /// Freeze the countdown. Increments the pause counter and records the
    /// pause instant; no network call is made (pause metrics flush with
    /// the terminal patch).
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.phase != TimerPhase::Running {
            return;
        }
        self.phase = TimerPhase::Paused;
        self.pause_count += 1;
        self.pause_started_at = Some(now);
    }

    /// Resume the countdown, folding the elapsed pause into the paused
    /// total. Overtime status is preserved.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.phase != TimerPhase::Paused {
            return;
        }
        self.fold_open_pause(now);
        self.phase = TimerPhase::Running;
    }

    /// Build the terminal finalize patch from the accrued metrics, closing
    /// any open pause first.
    pub fn finalize_patch(&mut self, completed: bool, now: DateTime<Utc>) -> SessionPatch {
        self.fold_open_pause(now);
        SessionPatch {
            completed,
            ended_at: now,
            extra_secs: self.extra_secs,
            pause_count: self.pause_count,
            paused_secs: self.paused_secs,
        }
    }

    /// Return to idle, re-armed with the planned duration for the current
    /// kind. Clears the bound session and all accrued metrics; the
    /// auth-required flag survives (it describes the credential, not the
    /// session).
    pub fn clear_to_idle(&mut self) {
        let auth_required = self.auth_required;
        *self = Self::new(self.kind, self.planned_secs);
        self.auth_required = auth_required;
    }

    /// Switch to a new kind while idle and unbound.
    pub fn arm(&mut self, kind: SessionKind, planned_secs: i64) {
        let auth_required = self.auth_required;
        *self = Self::new(kind, planned_secs);
        self.auth_required = auth_required;
    }

    /// Progress ring percentage.
    ///
    /// Within the planned window this is the elapsed fraction; past it,
    /// the ring keeps growing proportionally to overtime relative to half
    /// the planned duration, capped for rendering.
    pub fn progress_percent(&self) -> f64 {
        if self.planned_secs <= 0 {
            return 0.0;
        }
        if self.remaining_secs >= 0 {
            let elapsed = self.planned_secs - self.remaining_secs;
            elapsed as f64 / self.planned_secs as f64 * 100.0
        } else {
            let half_planned = self.planned_secs as f64 / 2.0;
            let over = 100.0 + self.extra_secs as f64 / half_planned * 100.0;
            over.min(PROGRESS_CAP_PERCENT)
        }
    }

    /// Clock display for the remaining value, with a sign in overtime
    /// (`-1:05`).
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    fn fold_open_pause(&mut self, now: DateTime<Utc>) {
        if let Some(pause_started) = self.pause_started_at.take() {
            self.paused_secs += (now - pause_started).num_seconds().max(0);
        }
    }
}

/// Format whole seconds as `m:ss`, emitting a sign for negative values.
pub fn format_clock(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let abs = secs.abs();
    format!("{}{}:{:02}", sign, abs / 60, abs % 60)
}
