//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{AppError, AppResult, DatabaseConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Connection settings for the users database
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set but unparsable values are
    /// reported instead of silently ignored.
    pub fn from_env() -> AppResult<Self> {
        let defaults = DatabaseConfig::default();

        let database = DatabaseConfig {
            url: env::var("USER_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or(defaults.url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(defaults.max_connections),
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                .unwrap_or(defaults.min_connections),
            sqlx_logging: parse_var("DATABASE_SQLX_LOGGING")?.unwrap_or(defaults.sqlx_logging),
        };

        if database.min_connections > database.max_connections {
            return Err(AppError::config(format!(
                "DATABASE_MIN_CONNECTIONS ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                database.min_connections, database.max_connections
            )));
        }

        Ok(Self { database })
    }
}

fn parse_var<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}
