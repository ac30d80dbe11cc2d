//! Analytics: window computation, aggregation, service, and client

pub mod aggregate;
pub mod client;
pub mod ports;
pub mod service;
pub mod window;

pub use aggregate::aggregate;
pub use client::{AnalyticsClient, AnalyticsView};
pub use service::AnalyticsService;
pub use window::window_start;
