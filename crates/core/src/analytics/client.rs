//! Client-side analytics consumption
//!
//! Wraps an [`AnalyticsGateway`] with the view-model behavior the UI
//! relies on: an in-flight guard that drops overlapping fetches, a closed
//! flag that discards results after teardown, and a watch channel carrying
//! the latest view. Requests are never cancelled mid-flight; staleness is
//! filtered on arrival.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pomora_domain::{AnalyticsSnapshot, PomoraError, Timeframe};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::ports::AnalyticsGateway;

/// Renderable state of the analytics panel.
#[derive(Debug, Clone)]
pub enum AnalyticsView {
    /// Nothing fetched yet.
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// Latest snapshot.
    Ready(AnalyticsSnapshot),
    /// The service rejected the caller's credentials; prompt login.
    Unauthorized,
    /// Generic retryable failure.
    Failed(String),
}

/// Analytics fetcher with overlap and teardown guards.
pub struct AnalyticsClient {
    gateway: Arc<dyn AnalyticsGateway>,
    in_flight: AtomicBool,
    closed: AtomicBool,
    view_tx: watch::Sender<AnalyticsView>,
}

impl AnalyticsClient {
    /// Create a new client over the given gateway.
    pub fn new(gateway: Arc<dyn AnalyticsGateway>) -> Self {
        let (view_tx, _) = watch::channel(AnalyticsView::Idle);
        Self { gateway, in_flight: AtomicBool::new(false), closed: AtomicBool::new(false), view_tx }
    }

    /// Observe view changes.
    pub fn subscribe(&self) -> watch::Receiver<AnalyticsView> {
        self.view_tx.subscribe()
    }

    /// Current view.
    pub fn view(&self) -> AnalyticsView {
        self.view_tx.borrow().clone()
    }

    /// Fetch the snapshot for a timeframe.
    ///
    /// Returns `false` when the request was dropped because another fetch
    /// is outstanding. A manual retry is the same call again.
    pub async fn refresh(&self, timeframe: Timeframe) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!(timeframe = timeframe.as_str(), "analytics fetch dropped: one outstanding");
            return false;
        }

        self.publish(AnalyticsView::Loading);

        let result = self.gateway.fetch(timeframe).await;

        // Results that land after teardown are discarded, matching the
        // unmounted-component guard in the original flow.
        if !self.closed.load(Ordering::SeqCst) {
            match result {
                Ok(snapshot) => self.publish(AnalyticsView::Ready(snapshot)),
                Err(PomoraError::Auth(reason)) => {
                    warn!(%reason, "analytics fetch unauthorized");
                    self.publish(AnalyticsView::Unauthorized);
                }
                Err(err) => {
                    warn!(error = %err, "analytics fetch failed");
                    self.publish(AnalyticsView::Failed(err.to_string()));
                }
            }
        }

        self.in_flight.store(false, Ordering::SeqCst);
        true
    }

    /// Tear the client down; late results are discarded from here on.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn publish(&self, view: AnalyticsView) {
        let _ = self.view_tx.send(view);
    }
}
