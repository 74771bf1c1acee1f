//! # Gateway Configuration Module
//!
//! This module handles loading and managing configuration for the Kairo
//! gateway. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `KAIRO_ENV`: "development" or "production" (default: "development")
//! - `KAIRO_BACKEND_URL`: Scheduling backend base URL (default depends on `KAIRO_ENV`)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)

use eyre::{eyre, Result, WrapErr};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// Deployment environment, which decides where `/api/*` is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Backend address used when `KAIRO_BACKEND_URL` is not set.
    pub fn default_backend_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:8000",
            Environment::Production => "http://backend:8000",
        }
    }
}

impl FromStr for Environment {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(eyre!("Unknown environment '{}'", other)),
        }
    }
}

/// Parses a log level name, falling back to INFO for anything unknown.
pub fn parse_log_level(raw: &str) -> Level {
    match raw {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Configuration for the Kairo gateway
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use kairo_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Forwarding /api to {}", config.backend_url);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the gateway (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the gateway to listen on
    pub port: u16,

    /// Deployment environment
    pub environment: Environment,

    /// Base URL of the scheduling backend
    pub backend_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

/// Headroom left between the backend call timing out and the whole request
/// timing out, so a slow backend surfaces as 502 rather than 408.
const BACKEND_TIMEOUT_MARGIN: Duration = Duration::from_secs(2);

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a new ApiConfig from any key/value source
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - The KAIRO_ENV value is not a known environment
    /// - The API_REQUEST_TIMEOUT_SECONDS value is not a positive integer
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Backend settings
        let environment = match lookup("KAIRO_ENV") {
            Some(raw) => raw.parse().wrap_err("Invalid KAIRO_ENV value")?,
            None => Environment::default(),
        };
        let backend_url = lookup("KAIRO_BACKEND_URL")
            .unwrap_or_else(|| environment.default_backend_url().to_string());

        // Logging settings
        let log_level = parse_log_level(&lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()));

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout: u64 = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .wrap_err("Invalid API_REQUEST_TIMEOUT_SECONDS value")?;
        if request_timeout == 0 {
            return Err(eyre!("API_REQUEST_TIMEOUT_SECONDS must be at least 1"));
        }

        Ok(Self {
            host,
            port,
            environment,
            backend_url,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Deadline for a whole gateway request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Deadline for a single backend call, always shorter than
    /// [`ApiConfig::request_timeout`]
    pub fn backend_timeout(&self) -> Duration {
        let request = self.request_timeout();
        request.saturating_sub(BACKEND_TIMEOUT_MARGIN).max(request / 2)
    }
}
