//! SQLite-backed persistence
//!
//! All repositories share the pooled [`DbManager`] and issue their queries
//! through `spawn_blocking`, keeping rusqlite off the async executor.

pub mod manager;
pub mod session_repository;
pub mod token_repository;

pub use manager::DbManager;
pub use session_repository::SqliteSessionRepository;
pub use token_repository::SqliteTokenRepository;
