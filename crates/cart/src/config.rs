//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the product/stock catalog API
//!
//! ## Optional
//! - `CATALOG_API_TOKEN` - Bearer token for the catalog API
//! - `CART_STORAGE_DIR` - Directory for the durable cart slot (default: ./data)
//! - `PRODUCT_CACHE_TTL_SECS` - Product lookup cache TTL (default: 300)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory holding the durable cart slot
    pub storage_dir: String,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (e.g., <http://localhost:3333>)
    pub base_url: Url,
    /// Optional bearer token for the catalog API
    pub api_token: Option<SecretString>,
    /// TTL in seconds for cached product lookups (stock is never cached)
    pub product_cache_ttl_secs: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("product_cache_ttl_secs", &self.product_cache_ttl_secs)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            catalog: CatalogConfig::from_env()?,
            storage_dir: get_env_or_default("CART_STORAGE_DIR", "./data"),
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("CATALOG_BASE_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string())
        })?;

        let product_cache_ttl_secs = get_env_or_default("PRODUCT_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PRODUCT_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            api_token: get_optional_env("CATALOG_API_TOKEN").map(SecretString::from),
            product_cache_ttl_secs,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog_config(token: Option<&str>) -> CatalogConfig {
        CatalogConfig {
            base_url: Url::parse("http://localhost:3333").unwrap(),
            api_token: token.map(SecretString::from),
            product_cache_ttl_secs: 300,
        }
    }

    #[test]
    fn test_catalog_config_debug_redacts_token() {
        let config = catalog_config(Some("kc_live_9f8e7d6c5b4a"));
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("http://localhost:3333"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kc_live_9f8e7d6c5b4a"));
    }

    #[test]
    fn test_catalog_config_debug_without_token() {
        let config = catalog_config(None);
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("None"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("CATALOG_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: CATALOG_BASE_URL"
        );

        let err = ConfigError::InvalidEnvVar(
            "PRODUCT_CACHE_TTL_SECS".to_string(),
            "invalid digit".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Invalid environment variable PRODUCT_CACHE_TTL_SECS: invalid digit"
        );
    }
}
