//! Conversions from external infrastructure errors into domain errors.

use pomora_domain::PomoraError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PomoraError);

impl From<InfraError> for PomoraError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PomoraError> for InfraError {
    fn from(value: PomoraError) -> Self {
        InfraError(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(error: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;

        let domain_error = match error {
            SqlError::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => PomoraError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        PomoraError::Database("database is locked".into())
                    }
                    ErrorCode::ConstraintViolation => {
                        PomoraError::Database(format!("constraint violation: {message}"))
                    }
                    _ => PomoraError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            SqlError::QueryReturnedNoRows => {
                PomoraError::NotFound("no rows returned by query".into())
            }
            SqlError::FromSqlConversionFailure(_, _, cause) => {
                PomoraError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            SqlError::InvalidColumnType(_, _, ty) => {
                PomoraError::Database(format!("invalid column type: {ty}"))
            }
            other => PomoraError::Database(other.to_string()),
        };

        InfraError(domain_error)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(error: r2d2::Error) -> Self {
        InfraError(PomoraError::Database(format!("connection pool error: {error}")))
    }
}

/// Map a tokio join error from `spawn_blocking` into the domain error.
pub fn map_join_error(error: tokio::task::JoinError) -> PomoraError {
    PomoraError::Internal(format!("blocking task failed: {error}"))
}
