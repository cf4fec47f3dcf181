//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be present and
//! valid or the service refuses to start with a clear error.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default listen address.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default log filter directive.
const DEFAULT_LOG_FILTER: &str = "info,campus=debug";

/// Default upper bound for a single store transaction, in milliseconds.
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {name}: {message}")]
    InvalidVar {
        name: &'static str,
        message: String,
    },
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection URL.
    pub database_url: String,

    /// Address the HTTP server binds to.
    pub listen_addr: String,

    /// Log filter directive for the tracing subscriber.
    pub log_filter: String,

    /// Upper bound for a single store transaction.
    pub store_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `DATABASE_URL` is absent or any optional
    /// variable carries an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

        let log_filter = env::var("LOG_FILTER").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        let store_timeout_ms = match env::var("STORE_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidVar {
                name: "STORE_TIMEOUT_MS",
                message: e.to_string(),
            })?,
            Err(_) => DEFAULT_STORE_TIMEOUT_MS,
        };
        if store_timeout_ms == 0 {
            return Err(ConfigError::InvalidVar {
                name: "STORE_TIMEOUT_MS",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            database_url,
            listen_addr,
            log_filter,
            store_timeout: Duration::from_millis(store_timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_LISTEN_ADDR, "0.0.0.0:8080");
        assert_eq!(DEFAULT_STORE_TIMEOUT_MS, 5000);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::MissingVar("DATABASE_URL");
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = ConfigError::InvalidVar {
            name: "STORE_TIMEOUT_MS",
            message: "invalid digit".to_string(),
        };
        assert!(err.to_string().contains("STORE_TIMEOUT_MS"));
    }
}
