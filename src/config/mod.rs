use crate::core::timezone::{reporting_offset, MAX_OFFSET_MINUTES, MIN_OFFSET_MINUTES};
use crate::core::{AppError, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
    /// Offset from UTC whose calendar defines `today`, `month` and `year`
    pub report_utc_offset_minutes: i32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            report_utc_offset_minutes: env::var("REPORT_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid REPORT_UTC_OFFSET_MINUTES".to_string())
                })?,
        })
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.app.report_utc_offset_minutes) {
            return Err(AppError::Configuration(format!(
                "REPORT_UTC_OFFSET_MINUTES must be between {} and {}",
                MIN_OFFSET_MINUTES, MAX_OFFSET_MINUTES
            )));
        }

        if !["pretty", "json"]
            .iter()
            .any(|f| self.app.log_format.eq_ignore_ascii_case(f))
        {
            return Err(AppError::Configuration(format!(
                "Unknown LOG_FORMAT '{}'",
                self.app.log_format
            )));
        }

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::Configuration(
                "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn report_timezone(&self) -> Result<FixedOffset> {
        reporting_offset(self.app.report_utc_offset_minutes)
    }
}
