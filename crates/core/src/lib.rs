//! # Pomora Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits)
//! - The session lifecycle service and analytics aggregator
//! - The client-resident timer state machine and engine
//!
//! ## Architecture Principles
//! - Only depends on `pomora-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod analytics;
pub mod auth;
pub mod events;
pub mod session;
pub mod timer;

// Re-export specific items to avoid ambiguity
pub use analytics::ports::AnalyticsGateway;
pub use analytics::{aggregate, window_start, AnalyticsClient, AnalyticsService};
pub use auth::Authenticator;
pub use events::RefreshBus;
pub use session::ports::SessionRepository;
pub use session::SessionService;
pub use timer::ports::SessionGateway;
pub use timer::{TimerEngine, TimerNotification, TimerPhase, TimerSnapshot, TimerState};
