//! Async timer engine
//!
//! Wraps the pure [`TimerState`] in a lock, drives the 1 Hz ticker, and
//! issues the lifecycle calls to the session store through the
//! [`SessionGateway`] port. User actions are synchronous state transitions
//! under the lock; the next tick observes whatever they left behind.
//!
//! Terminal transitions commit locally before the remote write. A failed
//! write is surfaced as a notification and never rolls local state back,
//! so the countdown stays usable through backend outages.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::Utc;
use pomora_domain::constants::{NOTIFICATION_CHANNEL_CAPACITY, TICK_INTERVAL_SECS};
use pomora_domain::{
    NewSession, PomoraError, Result, Session, SessionKind, TimerConfig,
};
use serde::Serialize;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

use super::ports::SessionGateway;
use super::state::{TickEvent, TimerPhase, TimerState};
use crate::events::RefreshBus;

/// Point-in-time view of the timer for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    /// Signed clock display (`-1:05` in overtime).
    pub display: String,
    /// Progress ring percentage, capped for rendering.
    pub progress_percent: f64,
}

impl TimerSnapshot {
    fn of(state: &TimerState) -> Self {
        Self {
            display: state.display(),
            progress_percent: state.progress_percent(),
            state: state.clone(),
        }
    }
}

/// Side-channel notifications emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerNotification {
    /// The countdown crossed zero; raised once per session.
    OvertimeEntered,
    /// Persistence was rejected for missing authentication; prompt login.
    AuthRequired,
    /// A persistence call failed transiently; local state is unaffected.
    PersistFailed(String),
}

/// Timer engine orchestrating local state and session persistence.
pub struct TimerEngine {
    state: Arc<Mutex<TimerState>>,
    gateway: Arc<dyn SessionGateway>,
    refresh: RefreshBus,
    durations: TimerConfig,
    ticker: StdMutex<Option<JoinHandle<()>>>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    notify_tx: broadcast::Sender<TimerNotification>,
}

impl TimerEngine {
    /// Create an engine idle on a pomodoro, armed with the configured
    /// planned durations.
    pub fn new(gateway: Arc<dyn SessionGateway>, refresh: RefreshBus, durations: TimerConfig) -> Self {
        let state = TimerState::new(SessionKind::Pomodoro, durations.pomodoro_secs);
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::of(&state));
        let (notify_tx, _) = broadcast::channel(NOTIFICATION_CHANNEL_CAPACITY);

        Self {
            state: Arc::new(Mutex::new(state)),
            gateway,
            refresh,
            durations,
            ticker: StdMutex::new(None),
            snapshot_tx,
            notify_tx,
        }
    }

    /// Observe timer snapshots (one per transition and per tick).
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Observe side-channel notifications.
    pub fn notifications(&self) -> broadcast::Receiver<TimerNotification> {
        self.notify_tx.subscribe()
    }

    /// Current snapshot.
    pub async fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::of(&*self.state.lock().await)
    }

    /// Planned duration for a kind, from configuration.
    pub fn planned_for(&self, kind: SessionKind) -> i64 {
        match kind {
            SessionKind::Pomodoro => self.durations.pomodoro_secs,
            SessionKind::ShortBreak => self.durations.short_break_secs,
            SessionKind::LongBreak => self.durations.long_break_secs,
        }
    }

    /// Start a session for the currently armed kind.
    ///
    /// # Errors
    /// `PomoraError::InvalidInput` when a session is already active;
    /// `PomoraError::Auth` when the store rejects the credential (the
    /// machine is left unchanged - no session is considered open).
    pub async fn start(&self) -> Result<Session> {
        let (kind, planned_secs) = {
            let state = self.state.lock().await;
            if state.is_bound() || state.phase != TimerPhase::Idle {
                return Err(PomoraError::InvalidInput("timer already active".to_string()));
            }
            (state.kind, state.planned_secs)
        };

        let started_at = Utc::now();
        let new_session = NewSession {
            kind,
            started_at,
            duration_secs: planned_secs,
            completed: false,
            pause_count: 0,
            paused_secs: 0,
        };

        match self.gateway.create_session(new_session).await {
            Ok(session) => {
                {
                    let mut state = self.state.lock().await;
                    state.auth_required = false;
                    state.begin(session.id.clone(), started_at);
                }
                self.spawn_ticker();
                self.emit_snapshot().await;
                debug!(session_id = %session.id, kind = kind.as_str(), "timer started");
                Ok(session)
            }
            Err(PomoraError::Auth(reason)) => {
                self.enter_auth_required().await;
                Err(PomoraError::Auth(reason))
            }
            Err(err) => {
                warn!(error = %err, "session create failed");
                self.notify(TimerNotification::PersistFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Freeze the countdown. Local only; no network call.
    pub async fn pause(&self) {
        {
            let mut state = self.state.lock().await;
            state.pause(Utc::now());
        }
        self.emit_snapshot().await;
    }

    /// Resume the countdown, preserving overtime.
    pub async fn resume(&self) {
        let resumed = {
            let mut state = self.state.lock().await;
            let was_paused = state.phase == TimerPhase::Paused;
            state.resume(Utc::now());
            was_paused
        };
        if resumed {
            // The ticker exits whenever the phase leaves Running.
            self.spawn_ticker();
        }
        self.emit_snapshot().await;
    }

    /// Complete the bound session. The local transition to idle commits
    /// first; the finalize patch follows, and success fires the analytics
    /// refresh signal.
    ///
    /// # Errors
    /// `PomoraError::InvalidInput` with no bound session; gateway errors
    /// propagate after being reported as notifications.
    pub async fn complete(&self) -> Result<Session> {
        let (id, patch) = {
            let mut state = self.state.lock().await;
            let id = state
                .session_id
                .clone()
                .ok_or_else(|| {
                    PomoraError::InvalidInput("no active session to complete".to_string())
                })?;
            let patch = state.finalize_patch(true, Utc::now());
            state.clear_to_idle();
            (id, patch)
        };

        self.cancel_ticker();
        self.emit_snapshot().await;

        match self.gateway.finalize_session(&id, patch).await {
            Ok(session) => {
                self.refresh.notify();
                debug!(session_id = %session.id, "session completed");
                Ok(session)
            }
            Err(PomoraError::Auth(reason)) => {
                self.enter_auth_required().await;
                Err(PomoraError::Auth(reason))
            }
            Err(err) => {
                warn!(session_id = %id, error = %err, "session complete patch failed");
                self.notify(TimerNotification::PersistFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Reset the timer. With a bound session, the same patch shape as
    /// Complete is sent with `completed = false`; local state returns to
    /// idle regardless of the patch outcome. With no bound session and an
    /// idle timer this is a strict no-op.
    pub async fn reset(&self) -> Result<Option<Session>> {
        let bound = {
            let mut state = self.state.lock().await;
            if !state.is_bound() && state.phase == TimerPhase::Idle {
                return Ok(None);
            }
            let bound = state
                .session_id
                .clone()
                .map(|id| (id, state.finalize_patch(false, Utc::now())));
            state.clear_to_idle();
            bound
        };

        self.cancel_ticker();
        self.emit_snapshot().await;

        let Some((id, patch)) = bound else {
            return Ok(None);
        };

        match self.gateway.finalize_session(&id, patch).await {
            Ok(session) => {
                debug!(session_id = %session.id, "session reset");
                Ok(Some(session))
            }
            Err(PomoraError::Auth(_)) => {
                // The local reset already happened; report and move on.
                self.enter_auth_required().await;
                Ok(None)
            }
            Err(err) => {
                warn!(session_id = %id, error = %err, "session reset patch failed");
                self.notify(TimerNotification::PersistFailed(err.to_string()));
                Ok(None)
            }
        }
    }

    /// Switch the armed kind. An active session is finalized first:
    /// Complete when running (including overtime), Reset when merely
    /// bound. Finalization failures are already reported as notifications
    /// and do not block the switch.
    pub async fn change_kind(&self, kind: SessionKind) {
        let (bound, running) = {
            let state = self.state.lock().await;
            (state.is_bound(), state.is_running())
        };

        if bound {
            let outcome =
                if running { self.complete().await.map(Some) } else { self.reset().await };
            if let Err(err) = outcome {
                debug!(error = %err, "finalization before kind switch failed");
            }
        }

        {
            let mut state = self.state.lock().await;
            state.arm(kind, self.planned_for(kind));
        }
        self.emit_snapshot().await;
    }

    /// Cancel the ticker; called on teardown so no tick outlives the
    /// owning view.
    pub fn shutdown(&self) {
        self.cancel_ticker();
    }

    async fn enter_auth_required(&self) {
        {
            let mut state = self.state.lock().await;
            state.auth_required = true;
        }
        self.emit_snapshot().await;
        self.notify(TimerNotification::AuthRequired);
    }

    fn spawn_ticker(&self) {
        let state = Arc::clone(&self.state);
        let snapshot_tx = self.snapshot_tx.clone();
        let notify_tx = self.notify_tx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(TICK_INTERVAL_SECS));
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;

                let (snapshot, event) = {
                    let mut guard = state.lock().await;
                    if !guard.is_running() {
                        break;
                    }
                    let event = guard.tick();
                    (TimerSnapshot::of(&guard), event)
                };

                let _ = snapshot_tx.send(snapshot);
                if event == Some(TickEvent::EnteredOvertime) {
                    let _ = notify_tx.send(TimerNotification::OvertimeEntered);
                }
            }
        });

        if let Ok(mut guard) = self.ticker.lock() {
            if let Some(previous) = guard.replace(handle) {
                previous.abort();
            }
        }
    }

    fn cancel_ticker(&self) {
        if let Ok(mut guard) = self.ticker.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }

    async fn emit_snapshot(&self) {
        let snapshot = TimerSnapshot::of(&*self.state.lock().await);
        let _ = self.snapshot_tx.send(snapshot);
    }

    fn notify(&self, notification: TimerNotification) {
        let _ = self.notify_tx.send(notification);
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
