//! # Purge Handlers
//!
//! The scan-and-delete step endpoint and action-token issuance. The step
//! handler validates the action token before touching the store; a failed
//! check aborts the request with no side effects.

use axum::extract::State;
use axum::Json;
use tracing::{info, warn};

use crate::constants::PURGE_ACTION;
use crate::purge::{run_step, StepRequest, StepResult};
use crate::web::auth::IssuedToken;
use crate::web::response_types::{ApiResult, Envelope};
use crate::web::state::AppState;

/// Step request as received over the wire: the client's run state plus the
/// delete-test-orders action token.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PurgeRequest {
    #[serde(flatten)]
    pub step: StepRequest,
    #[serde(default)]
    pub token: String,
}

/// Execute one purge step: POST /v1/test-orders/purge
pub async fn purge_step(
    State(state): State<AppState>,
    Json(request): Json<PurgeRequest>,
) -> ApiResult<Json<Envelope<StepResult>>> {
    state
        .tokens
        .verify(&request.token, PURGE_ACTION)
        .map_err(|e| {
            warn!(error = %e, "Rejected purge step with invalid action token");
            e
        })?;

    info!(
        offset = request.step.offset,
        total_deleted = request.step.total_deleted,
        total_scanned = request.step.total_scanned,
        "Executing purge step"
    );

    let result = run_step(state.orders.as_ref(), request.step).await?;
    Ok(Envelope::success(result))
}

/// Issue a fresh purge action token: GET /v1/test-orders/purge/token
pub async fn issue_purge_token(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<IssuedToken>>> {
    let issued = state.tokens.issue(PURGE_ACTION)?;
    Ok(Envelope::success(issued))
}
