//! # API Key Middleware
//!
//! Bearer api-key check protecting the `/v1` admin surface. The purge action
//! token is validated separately inside the purge handler; this middleware is
//! the outer "is an operator at all" gate.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::web::response_types::ApiError;
use crate::web::state::AppState;

/// Require a valid bearer api key on protected endpoints.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Skip auth if disabled in configuration
    if !state.config.auth.enabled {
        debug!("Authentication disabled - allowing request");
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get("authorization")
        .ok_or_else(|| ApiError::auth_error("Missing authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::auth_error("Invalid authorization header format"))?;

    let token = extract_bearer_token(auth_str)?;

    if token != state.config.auth.api_key {
        warn!("Rejected request with invalid api key");
        return Err(ApiError::auth_error("Invalid api key"));
    }

    Ok(next.run(request).await)
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(auth_header: &str) -> Result<&str, ApiError> {
    if !auth_header.starts_with("Bearer ") {
        return Err(ApiError::auth_error(
            "Authorization header must use Bearer scheme",
        ));
    }

    let token = &auth_header[7..];
    if token.is_empty() {
        return Err(ApiError::auth_error("Empty Bearer token"));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123").unwrap(), "abc123");

        assert!(extract_bearer_token("Basic abc123").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("abc123").is_err());
    }
}
