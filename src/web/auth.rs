//! # Action Tokens
//!
//! Short-lived HS256 tokens that authorize exactly one administrative action.
//! The purge endpoint refuses to touch the store unless the request carries a
//! valid token for the delete-test-orders action.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::AuthConfig;

/// Token issuance and validation errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid or expired action token")]
    InvalidToken,

    #[error("Token issued for a different action")]
    ActionMismatch,

    #[error("JWT processing error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by an action token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActionClaims {
    /// The action this token authorizes.
    pub sub: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// A freshly issued token plus its expiry, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Issues and validates action tokens from the configured shared secret.
#[derive(Clone)]
pub struct ActionTokenIssuer {
    enabled: bool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for ActionTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionTokenIssuer")
            .field("enabled", &self.enabled)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ActionTokenIssuer {
    /// Create an issuer from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.enabled && config.token_secret.is_empty() {
            return Err(AuthError::ConfigurationError(
                "Action token secret not configured".to_string(),
            ));
        }

        let ttl = Duration::seconds(config.token_ttl_secs as i64);
        Ok(Self {
            enabled: config.enabled,
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            ttl,
        })
    }

    /// Issue a token for the given action.
    pub fn issue(&self, action: &str) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = (now + self.ttl).timestamp();
        let claims = ActionClaims {
            sub: action.to_string(),
            iat: now.timestamp(),
            exp: expires_at,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;

        debug!(action, expires_at, "Issued action token");
        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token for the given action.
    ///
    /// When authentication is disabled, every token (including an empty one)
    /// is accepted.
    pub fn verify(&self, token: &str, action: &str) -> Result<(), AuthError> {
        if !self.enabled {
            return Ok(());
        }

        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<ActionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        if data.claims.sub != action {
            return Err(AuthError::ActionMismatch);
        }

        Ok(())
    }
}
