//! Analytics service - core business logic

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use pomora_domain::{AnalyticsSnapshot, Result, Timeframe, UserId};
use tracing::debug;

use super::aggregate::aggregate;
use super::window::window_start;
use crate::session::ports::SessionRepository;

/// Analytics service
///
/// Recomputes the snapshot from the session table on every request; nothing
/// derived is persisted.
pub struct AnalyticsService {
    repository: Arc<dyn SessionRepository>,
    timezone: Tz,
}

impl AnalyticsService {
    /// Create a new analytics service anchored in the given timezone.
    pub fn new(repository: Arc<dyn SessionRepository>, timezone: Tz) -> Self {
        Self { repository, timezone }
    }

    /// Compute the snapshot for the user's sessions in the timeframe.
    pub async fn snapshot(
        &self,
        user: &UserId,
        timeframe: Timeframe,
    ) -> Result<AnalyticsSnapshot> {
        self.snapshot_at(user, timeframe, Utc::now()).await
    }

    /// Deterministic variant used by tests: the window is anchored at the
    /// supplied instant instead of the wall clock.
    pub async fn snapshot_at(
        &self,
        user: &UserId,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsSnapshot> {
        let since = window_start(timeframe, now, self.timezone);
        let sessions = self.repository.find_started_since(user, since).await?;

        debug!(
            user = %user,
            timeframe = timeframe.as_str(),
            window_start = %since,
            session_count = sessions.len(),
            "analytics snapshot computed"
        );

        Ok(aggregate(timeframe, &sessions))
    }
}
