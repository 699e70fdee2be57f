//! Gateway settings handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::gateway::{FormField, PaymentGateway, TestOrderGateway};
use crate::models::order::OrderStatus;
use crate::models::settings::GatewaySettings;
use crate::web::response_types::{ApiResult, Envelope};
use crate::web::state::AppState;

/// Settings payload: the stored values plus the gateway's admin form fields.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: GatewaySettings,
    pub fields: Vec<FormField>,
}

/// Read gateway settings: GET /v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<SettingsResponse>>> {
    let settings = GatewaySettings::load(state.settings.as_ref()).await?;
    let gateway = TestOrderGateway::new(settings, state.config.return_url_base.clone());

    Ok(Envelope::success(SettingsResponse {
        settings,
        fields: gateway.form_fields(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub order_status: OrderStatus,
    pub reduce_stock: bool,
}

/// Save gateway settings: PUT /v1/settings
pub async fn put_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<Envelope<GatewaySettings>>> {
    let settings = GatewaySettings {
        order_status: request.order_status,
        reduce_stock: request.reduce_stock,
    };

    settings.save(state.settings.as_ref()).await?;

    info!(
        order_status = %settings.order_status,
        reduce_stock = settings.reduce_stock,
        "Saved gateway settings"
    );

    Ok(Envelope::success(settings))
}
