//! Storefront API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Catalog rules (page size, size range) live here and are
//! handed to the services at construction - nothing reads them from
//! globals later.

use std::env;

use serde::{Deserialize, Serialize};
use stride_core::types::SizeRange;
use thiserror::Error;

/// Storefront API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Fixed number of products per page (never user-controlled)
    pub page_size: i64,

    /// Smallest stocked shoe size (inclusive)
    pub size_min: i64,

    /// Largest stocked shoe size (inclusive)
    pub size_max: i64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT"))?,

            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "stride.db".to_string()),

            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PAGE_SIZE"))?,

            size_min: env::var("SIZE_MIN")
                .unwrap_or_else(|_| "35".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SIZE_MIN"))?,

            size_max: env::var("SIZE_MAX")
                .unwrap_or_else(|_| "42".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SIZE_MAX"))?,
        };

        if config.page_size < 1 {
            return Err(ConfigError::InvalidValue("PAGE_SIZE"));
        }
        if config.size_min > config.size_max {
            return Err(ConfigError::InvalidValue("SIZE_MIN/SIZE_MAX"));
        }

        Ok(config)
    }

    /// The stocked size range as a core type.
    pub fn size_range(&self) -> SizeRange {
        SizeRange::new(self.size_min, self.size_max)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 8080,
            database_path: "stride.db".to_string(),
            page_size: 12,
            size_min: 35,
            size_max: 42,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.size_range(), SizeRange::new(35, 42));
    }
}
