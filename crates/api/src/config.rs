//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Bakeshop API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `BAKERY_TIMEZONE`: IANA timezone slots are computed in (default: "Europe/London")
//! - `MAINTENANCE_MODE`: Closes the `/api` routes when true (default: false)
//! - `MAINTENANCE_PIN_HASH`: Argon2 hash of the PIN that bypasses maintenance mode
//! - `CONTACT_EMAIL`: Address shown to customers while the shop is closed

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

use crate::middleware::maintenance::MaintenanceConfig;

pub const DEFAULT_TIMEZONE: &str = "Europe/London";
pub const DEFAULT_CONTACT_EMAIL: &str = "orders@bakeshop.local";

/// Configuration for the Bakeshop API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use bakeshop_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Timezone the bakery trades in
    pub timezone: Tz,

    pub maintenance: MaintenanceConfig,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The BAKERY_TIMEZONE value is not a known timezone
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Bakery settings
        let timezone = parse_timezone(
            &env::var("BAKERY_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
        )?;

        let maintenance = MaintenanceConfig {
            enabled: env::var("MAINTENANCE_MODE")
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
            pin_hash: env::var("MAINTENANCE_PIN_HASH")
                .ok()
                .filter(|hash| !hash.trim().is_empty()),
            contact_email: env::var("CONTACT_EMAIL")
                .unwrap_or_else(|_| DEFAULT_CONTACT_EMAIL.to_string()),
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            timezone,
            maintenance,
        })
    }

    /// Returns the server address as a string, e.g. "127.0.0.1:8080"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level. Unknown values mean `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn parse_timezone(value: &str) -> Result<Tz> {
    let name = value.trim();
    name.parse::<Tz>()
        .map_err(|err| eyre!("Invalid BAKERY_TIMEZONE value '{}': {}", name, err))
}

/// Reads a boolean environment flag. Anything but a truthy word is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
