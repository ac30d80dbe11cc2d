//! Application context - dependency injection container

use std::sync::Arc;

use pomora_core::{AnalyticsService, Authenticator, RefreshBus, SessionService};
use pomora_domain::{Config, Result};
use pomora_infra::database::{DbManager, SqliteSessionRepository, SqliteTokenRepository};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub sessions: Arc<SessionService>,
    pub analytics: Arc<AnalyticsService>,
    pub authenticator: Arc<dyn Authenticator>,
    pub tokens: Arc<SqliteTokenRepository>,
    pub refresh: RefreshBus,
}

impl AppContext {
    /// Build the full context from configuration: open the database, run
    /// migrations, and wire repositories into services.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let session_repository = Arc::new(SqliteSessionRepository::new(Arc::clone(&db)));
        let tokens = Arc::new(SqliteTokenRepository::new(Arc::clone(&db)));

        let sessions = Arc::new(SessionService::new(session_repository.clone()));
        let analytics =
            Arc::new(AnalyticsService::new(session_repository, config.analytics.timezone));

        info!(
            db_path = %config.database.path,
            timezone = %config.analytics.timezone,
            "application context initialised"
        );

        Ok(Self {
            config,
            db,
            sessions,
            analytics,
            authenticator: tokens.clone(),
            tokens,
            refresh: RefreshBus::new(),
        })
    }
}
