//! Record store failures.
//!
//! Store implementations report failures through [`StoreError`]; callers
//! decide how each class surfaces to clients.

use isml_core::AppError;
use thiserror::Error;

/// SQLSTATE `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached in time: pool timeout, closed pool, I/O.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// A write lost a race: uniqueness or serialization violation.
    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }

    /// Maps the failure class onto the HTTP-facing error taxonomy.
    pub fn into_app_error(self) -> AppError {
        match self {
            StoreError::Unavailable(reason) => AppError::store_unavailable(anyhow::anyhow!(reason)),
            StoreError::Conflict(reason) => AppError::allocation_conflict(anyhow::anyhow!(reason)),
            StoreError::Other(err) => AppError::internal(err),
        }
    }
}

/// Shorthand for services that talk to the pool directly.
pub fn db_error(err: sqlx::Error) -> AppError {
    StoreError::from(err).into_app_error()
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    || db_err.code().as_deref() == Some(SERIALIZATION_FAILURE) =>
            {
                StoreError::Conflict(db_err.message().to_string())
            }
            _ => StoreError::Other(anyhow::Error::from(err)),
        }
    }
}
