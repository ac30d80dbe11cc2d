//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Planned durations per session kind (seconds)
pub const DEFAULT_POMODORO_SECS: i64 = 1500;
pub const DEFAULT_SHORT_BREAK_SECS: i64 = 300;
pub const DEFAULT_LONG_BREAK_SECS: i64 = 900;

// Timer engine configuration
pub const TICK_INTERVAL_SECS: u64 = 1;
pub const PROGRESS_CAP_PERCENT: f64 = 120.0;

// Server defaults
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8787;
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

// Event channel capacities
pub const NOTIFICATION_CHANNEL_CAPACITY: usize = 16;
pub const REFRESH_CHANNEL_CAPACITY: usize = 8;
