//! Persistence error types

use thiserror::Error;

/// Errors from the request log
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Database driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
