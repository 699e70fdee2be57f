//! Environment-driven service configuration with defaults.

use crate::error::{Result, TestOrdersError};

/// Top-level configuration for the test-orders service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Postgres connection string.
    pub database_url: String,
    /// Per-request timeout applied by the web layer.
    pub request_timeout_ms: u64,
    /// Base URL used to build gateway redirect targets.
    pub return_url_base: String,
    pub auth: AuthConfig,
}

/// Authentication settings for the admin API.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// When false, both the api key check and action-token check are skipped.
    pub enabled: bool,
    /// Shared bearer key protecting the `/v1` surface.
    pub api_key: String,
    /// HS256 secret for purge action tokens.
    pub token_secret: String,
    /// Action-token lifetime in seconds.
    pub token_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            database_url: "postgresql://localhost/test_orders_development".to_string(),
            request_timeout_ms: 30_000,
            return_url_base: "http://localhost:8080/checkout".to_string(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            token_secret: String::new(),
            token_ttl_secs: 12 * 60 * 60,
        }
    }
}

impl ServiceConfig {
    /// Build configuration from `TEST_ORDERS_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(bind) = std::env::var("TEST_ORDERS_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(timeout) = std::env::var("TEST_ORDERS_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms = timeout.parse().map_err(|e| {
                TestOrdersError::configuration(format!("Invalid request_timeout_ms: {e}"))
            })?;
        }

        if let Ok(base) = std::env::var("TEST_ORDERS_RETURN_URL_BASE") {
            config.return_url_base = base;
        }

        if let Ok(enabled) = std::env::var("TEST_ORDERS_AUTH_ENABLED") {
            config.auth.enabled = enabled.parse().map_err(|e| {
                TestOrdersError::configuration(format!("Invalid auth_enabled: {e}"))
            })?;
        }

        if let Ok(api_key) = std::env::var("TEST_ORDERS_API_KEY") {
            config.auth.api_key = api_key;
        }

        if let Ok(secret) = std::env::var("TEST_ORDERS_TOKEN_SECRET") {
            config.auth.token_secret = secret;
        }

        if let Ok(ttl) = std::env::var("TEST_ORDERS_TOKEN_TTL_SECS") {
            config.auth.token_ttl_secs = ttl.parse().map_err(|e| {
                TestOrdersError::configuration(format!("Invalid token_ttl_secs: {e}"))
            })?;
        }

        if config.auth.enabled {
            if config.auth.api_key.is_empty() {
                return Err(TestOrdersError::configuration(
                    "Auth enabled but TEST_ORDERS_API_KEY is not set",
                ));
            }
            if config.auth.token_secret.is_empty() {
                return Err(TestOrdersError::configuration(
                    "Auth enabled but TEST_ORDERS_TOKEN_SECRET is not set",
                ));
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert!(!config.auth.enabled);
        assert_eq!(config.auth.token_ttl_secs, 43_200);
    }
}
