//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Storefront API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// SQLite database file path
    pub database_path: String,

    /// Directory image blobs are stored under
    pub blob_root: String,

    /// JWT secret key for signing session tokens
    pub jwt_secret: String,

    /// Session token lifetime in seconds
    pub session_lifetime_secs: i64,

    /// Whether session cookies carry the Secure attribute.
    /// Disable only for plain-HTTP local development.
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./freshmart.db".to_string()),

            blob_root: env::var("BLOB_ROOT").unwrap_or_else(|_| "./blobs".to_string()),

            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                // In production this MUST be set via environment variable
                "freshmart-dev-secret-change-in-production".to_string()
            }),

            session_lifetime_secs: env::var("SESSION_LIFETIME_SECS")
                .unwrap_or_else(|_| "86400".to_string()) // 1 day
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_LIFETIME_SECS".to_string()))?,

            secure_cookies: env::var("SECURE_COOKIES")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        // Only assert on fields no test environment is expected to override
        let config = ApiConfig::load().unwrap();
        assert!(config.session_lifetime_secs > 0);
        assert!(!config.jwt_secret.is_empty());
    }
}
