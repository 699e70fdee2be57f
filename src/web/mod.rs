//! # Web API Module
//!
//! Axum-based admin API for the test-orders service.
//!
//! - [`routes`] - HTTP route definitions
//! - [`handlers`] - request handlers per endpoint group
//! - [`middleware`] - api-key and request-id middleware
//! - [`auth`] - action-token issuance and validation
//! - [`state`] - shared application state
//! - [`response_types`] - API errors and the JSON envelope

pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod routes;
pub mod state;

use axum::Router;

use state::AppState;

/// Create the main Axum application with all routes and middleware.
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = std::time::Duration::from_millis(app_state.config.request_timeout_ms);

    // Health probes never require auth.
    let public_routes = Router::new().merge(routes::health_routes());

    let protected_routes = Router::new()
        .nest("/v1", routes::api_v1_routes())
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ))
        .layer(tower_http::timeout::TimeoutLayer::new(request_timeout))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}
