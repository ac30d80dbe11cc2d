//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. If no file exists either, uses built-in defaults
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `POMORA_DB_PATH`: Database file path (anchor variable; env loading is
//!   attempted only when it is set)
//! - `POMORA_DB_POOL_SIZE`: Connection pool size
//! - `POMORA_HTTP_HOST` / `POMORA_HTTP_PORT`: Server bind address
//! - `POMORA_TIMEZONE`: IANA timezone for analytics windows
//! - `POMORA_POMODORO_SECS` / `POMORA_SHORT_BREAK_SECS` /
//!   `POMORA_LONG_BREAK_SECS`: Planned timer durations
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `pomora.{json,toml}` in the
//! working directory, then up to two parent directories.

use std::path::{Path, PathBuf};

use pomora_domain::{Config, PomoraError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the anchor
/// variable is missing, falls back to a config file; with no file present
/// the built-in defaults apply.
///
/// # Errors
/// Returns `PomoraError::Config` if a present source is malformed.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No configuration found; using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// `POMORA_DB_PATH` must be present; every other variable falls back to
/// its default when unset.
///
/// # Errors
/// Returns `PomoraError::Config` if the anchor variable is missing or any
/// present variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.database.path = env_var("POMORA_DB_PATH")?;
    if let Some(pool_size) = env_parse::<u32>("POMORA_DB_POOL_SIZE")? {
        config.database.pool_size = pool_size;
    }

    if let Ok(host) = std::env::var("POMORA_HTTP_HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_parse::<u16>("POMORA_HTTP_PORT")? {
        config.server.port = port;
    }

    if let Ok(tz) = std::env::var("POMORA_TIMEZONE") {
        config.analytics.timezone = tz
            .parse()
            .map_err(|_| PomoraError::Config(format!("Invalid timezone: {tz}")))?;
    }

    if let Some(secs) = env_parse::<i64>("POMORA_POMODORO_SECS")? {
        config.timer.pomodoro_secs = secs;
    }
    if let Some(secs) = env_parse::<i64>("POMORA_SHORT_BREAK_SECS")? {
        config.timer.short_break_secs = secs;
    }
    if let Some(secs) = env_parse::<i64>("POMORA_LONG_BREAK_SECS")? {
        config.timer.long_break_secs = secs;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports both JSON
/// and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PomoraError::Config` if the file is missing or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PomoraError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PomoraError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PomoraError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PomoraError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PomoraError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PomoraError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for base in [&cwd, &cwd.join(".."), &cwd.join("../..")] {
            candidates.extend([
                base.join("config.json"),
                base.join("config.toml"),
                base.join("pomora.json"),
                base.join("pomora.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PomoraError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional environment variable, erroring only on bad values.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| PomoraError::Config(format!("Invalid value for {key}: {raw}"))),
        Err(_) => Ok(None),
    }
}
