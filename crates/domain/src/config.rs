//! Configuration structures
//!
//! Deserialized from environment variables or a config file by the infra
//! loader. All sections carry serde defaults so a minimal config is valid.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DB_POOL_SIZE, DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, DEFAULT_LONG_BREAK_SECS,
    DEFAULT_POMODORO_SECS, DEFAULT_SHORT_BREAK_SECS,
};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub timer: TimerConfig,
}

/// HTTP server bind settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// SQLite database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path. `:memory:` is accepted for tests.
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path(), pool_size: default_pool_size() }
    }
}

/// Analytics window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// IANA timezone used to anchor `day`/`week` window boundaries.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { timezone: default_timezone() }
    }
}

/// Planned durations offered by the timer, per session kind (seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_pomodoro_secs")]
    pub pomodoro_secs: i64,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: i64,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: i64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            pomodoro_secs: default_pomodoro_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HTTP_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn default_db_path() -> String {
    "pomora.db".to_string()
}

fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

fn default_timezone() -> Tz {
    chrono_tz::UTC
}

fn default_pomodoro_secs() -> i64 {
    DEFAULT_POMODORO_SECS
}

fn default_short_break_secs() -> i64 {
    DEFAULT_SHORT_BREAK_SECS
}

fn default_long_break_secs() -> i64 {
    DEFAULT_LONG_BREAK_SECS
}
