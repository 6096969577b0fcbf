use crate::core::{AppError, Result};
use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::time::Duration;

/// Connection settings for the record database
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connections kept open while idle
    pub pool_size: u32,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| AppError::Configuration("DATABASE_URL not set".to_string()))?,
            pool_size: parse_or("DATABASE_POOL_SIZE", 5)?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
        })
    }

    /// Create the MySQL pool reports read from
    ///
    /// The pool connects lazily, so the server can start while the database
    /// is still coming up; reports fail with `SourceUnavailable` until it does.
    pub fn create_pool(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_lazy(&self.url)
            .map_err(AppError::Database)
    }
}

fn parse_or(name: &str, default: u32) -> Result<u32> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
