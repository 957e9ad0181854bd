//! Process configuration read from the environment.

use std::time::Duration;

use crate::domain::ConfigError;
use crate::infra::PostgresConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Startup configuration. `DATABASE_URL` is required; everything else
/// has a default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub postgres: PostgresConfig,
}

impl AppConfig {
    /// Reads configuration from the environment (after `dotenvy` has loaded
    /// any `.env` file).
    ///
    /// # Errors
    ///
    /// `MissingEnvVar` when `DATABASE_URL` is unset, `InvalidValue` when a
    /// numeric override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let mut postgres = PostgresConfig::default();
        if let Some(max) = read_parsed("DB_MAX_CONNECTIONS")? {
            postgres.max_connections = max;
        }
        if let Some(min) = read_parsed("DB_MIN_CONNECTIONS")? {
            postgres.min_connections = min;
        }
        if let Some(secs) = read_parsed("DB_ACQUIRE_TIMEOUT_SECS")? {
            postgres.acquire_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            database_url,
            bind_addr,
            postgres,
        })
    }
}

fn read_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("could not parse '{raw}'"),
            }),
        Err(_) => Ok(None),
    }
}
