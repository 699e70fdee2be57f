//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::web::state::AppState;

/// Basic health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Basic health check endpoint: GET /health
///
/// Returns OK if the service is running; always unauthenticated.
pub async fn basic_health(_state: State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
