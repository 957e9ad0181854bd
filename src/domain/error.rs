//! Application error types with proper error chaining.

use thiserror::Error;

/// Failures originating in the persistence layer.
#[derive(Error, Debug, Clone)]
pub enum DatabaseError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("query execution failed: {0}")]
    Query(String),
    #[error("duplicate record: {0}")]
    Duplicate(String),
    #[error("pool exhausted: {0}")]
    PoolExhausted(String),
    #[error("migration failed: {0}")]
    Migration(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Top-level error taxonomy.
///
/// `Validation`, `NotFound`, and `Conflict` carry the user-facing message
/// verbatim; the controllers map them onto HTTP statuses. Everything in
/// `Database` is a persistence failure the client cannot fix.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted("pool timed out".to_string()),
            sqlx::Error::PoolClosed => DatabaseError::Connection("pool closed".to_string()),
            sqlx::Error::Io(io_err) => DatabaseError::Connection(io_err.to_string()),
            sqlx::Error::Database(db_err) => {
                // 23505 = unique_violation
                if db_err.code().is_some_and(|code| code == "23505") {
                    return DatabaseError::Duplicate(db_err.message().to_string());
                }
                DatabaseError::Query(db_err.message().to_string())
            }
            _ => DatabaseError::Query(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(DatabaseError::from(err))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(DatabaseError::Migration(err.to_string()))
    }
}
