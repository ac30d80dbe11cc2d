//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Pomora
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PomoraError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PomoraError {
    /// Stable label for the error variant, suitable for metrics and wire
    /// payloads.
    pub fn label(&self) -> &'static str {
        match self {
            PomoraError::Database(_) => "database",
            PomoraError::Config(_) => "config",
            PomoraError::Network(_) => "network",
            PomoraError::Auth(_) => "auth",
            PomoraError::NotFound(_) => "not_found",
            PomoraError::InvalidInput(_) => "invalid_input",
            PomoraError::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Pomora operations
pub type Result<T> = std::result::Result<T, PomoraError>;
