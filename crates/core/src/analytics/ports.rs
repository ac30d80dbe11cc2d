//! Port interfaces for analytics consumption
//!
//! The server-side aggregator reads through `SessionRepository`; this port
//! is the client-side view, fetching a finished snapshot over the wire.

use async_trait::async_trait;
use pomora_domain::{AnalyticsSnapshot, Result, Timeframe};

/// Trait for fetching analytics snapshots from the service.
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// Fetch the snapshot for a timeframe.
    ///
    /// # Errors
    /// Returns `PomoraError::Auth` when the caller is unauthenticated;
    /// any other error is a generic retryable failure.
    async fn fetch(&self, timeframe: Timeframe) -> Result<AnalyticsSnapshot>;
}
