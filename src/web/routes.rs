//! HTTP route definitions for the admin API.

use axum::routing::{get, post, put};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Create API v1 routes
///
/// All v1 routes are prefixed with `/v1` and protected by the api-key
/// middleware:
/// - Purge API - scan-and-delete step plus action-token issuance
/// - Settings API - gateway settings read/write
/// - Checkout API - test-gateway payment processing and order lookups
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Purge API
        .route("/test-orders/purge", post(handlers::purge::purge_step))
        .route(
            "/test-orders/purge/token",
            get(handlers::purge::issue_purge_token),
        )
        // Settings API
        .route("/settings", get(handlers::settings::get_settings))
        .route("/settings", put(handlers::settings::put_settings))
        // Checkout API
        .route("/checkout", post(handlers::checkout::checkout))
        .route(
            "/orders/{order_id}/payment-method",
            get(handlers::checkout::get_order_payment_method),
        )
}

/// Create health routes; always public.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::basic_health))
}
