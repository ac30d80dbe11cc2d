//! SQLite-backed bearer token verification.
//!
//! Tokens are opaque strings minted out-of-band; only their blake3 hashes
//! are stored. Verification is a single indexed lookup, implementing the
//! `Authenticator` port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pomora_core::Authenticator;
use pomora_domain::{PomoraError, Result as DomainResult, UserId};
use rand::RngCore;
use rusqlite::{params, OptionalExtension};
use tokio::task;

use super::manager::DbManager;
use crate::errors::{map_join_error, InfraError};

/// SQLite-backed token repository.
pub struct SqliteTokenRepository {
    db: Arc<DbManager>,
}

impl SqliteTokenRepository {
    /// Create a new repository backed by the shared `DbManager`.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Mint a token for a user and store its hash.
    ///
    /// Returns the plaintext token exactly once; it cannot be recovered
    /// afterwards.
    pub async fn issue_token(&self, user: &UserId, label: &str) -> DomainResult<String> {
        let db = Arc::clone(&self.db);
        let user = user.clone();
        let label = label.to_owned();

        task::spawn_blocking(move || -> DomainResult<String> {
            let mut bytes = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut bytes);
            let token = hex::encode(bytes);

            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO api_tokens (token_hash, user_id, label, created_at) VALUES (?, ?, ?, ?)",
                params![hash_token(&token), user.as_str(), label, Utc::now().timestamp()],
            )
            .map_err(InfraError::from)?;

            Ok(token)
        })
        .await
        .map_err(map_join_error)?
    }

    /// Revoke every token issued to a user.
    pub async fn revoke_user_tokens(&self, user: &UserId) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);
        let user = user.clone();

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            let removed = conn
                .execute("DELETE FROM api_tokens WHERE user_id = ?", params![user.as_str()])
                .map_err(InfraError::from)?;
            Ok(removed)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl Authenticator for SqliteTokenRepository {
    async fn authenticate(&self, token: &str) -> DomainResult<UserId> {
        if token.is_empty() {
            return Err(PomoraError::Auth("empty bearer token".to_string()));
        }

        let db = Arc::clone(&self.db);
        let hash = hash_token(token);

        task::spawn_blocking(move || -> DomainResult<UserId> {
            let conn = db.get_connection()?;
            let user_id: Option<String> = conn
                .query_row(
                    "SELECT user_id FROM api_tokens WHERE token_hash = ?",
                    params![hash],
                    |row| row.get(0),
                )
                .optional()
                .map_err(InfraError::from)?;

            user_id
                .map(UserId::new)
                .ok_or_else(|| PomoraError::Auth("unknown bearer token".to_string()))
        })
        .await
        .map_err(map_join_error)?
    }
}

fn hash_token(token: &str) -> String {
    blake3::hash(token.as_bytes()).to_hex().to_string()
}
