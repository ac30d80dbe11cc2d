//! HTTP gateway implementations for the client-resident timer
//!
//! These adapters let the timer engine and analytics client talk to a
//! remote Pomora service over its public API.

pub mod http;

pub use http::{ApiClientConfig, HttpAnalyticsGateway, HttpSessionGateway};
