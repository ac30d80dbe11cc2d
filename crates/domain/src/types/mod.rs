//! Domain data types
//!
//! Organized by subsystem:
//! - `session`: timed interval records and their lifecycle payloads
//! - `analytics`: derived aggregate snapshot and window selection
//! - `user`: ownership identifiers

pub mod analytics;
pub mod session;
pub mod user;

pub use analytics::{AnalyticsSnapshot, Ratio, Timeframe};
pub use session::{NewSession, Session, SessionKind, SessionPatch};
pub use user::UserId;
