//! PostgreSQL persistence gateway.
//!
//! The gateway owns the connection pool and is constructed once at process
//! start, then injected into the repositories. Mutations obtain a scoped
//! transaction through [`PostgresGateway::begin`]; sqlx commits explicitly
//! and rolls back on drop, so every exit path releases the connection.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::{AppError, DatabaseError, HealthProbe};

/// PostgreSQL connection pool configuration.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Connection-pooled gateway to PostgreSQL.
pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    /// Connect with custom pool configuration. Connection failure is fatal
    /// to the caller; there is no retry.
    pub async fn connect(database_url: &str, config: PostgresConfig) -> Result<Self, AppError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Connect with default pool configuration.
    pub async fn with_defaults(database_url: &str) -> Result<Self, AppError> {
        Self::connect(database_url, PostgresConfig::default()).await
    }

    /// Apply embedded schema migrations. Called once at startup, before the
    /// server starts accepting requests.
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Open a unit-of-work bound to one pooled connection.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        self.pool.begin().await.map_err(AppError::from)
    }

    /// The underlying pool, for read-only queries outside a transaction.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drain the pool at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl HealthProbe for PostgresGateway {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        Ok(())
    }
}
