//! Checkout handlers: test-gateway payment processing and the payment-method
//! lookup.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::gateway::{DiscardCart, PaymentGateway, PaymentResult, TestOrderGateway};
use crate::models::settings::GatewaySettings;
use crate::web::response_types::{ApiError, ApiResult, Envelope};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub order_id: i64,
}

/// Process an order through the test gateway: POST /v1/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> ApiResult<Json<Envelope<PaymentResult>>> {
    let settings = GatewaySettings::load(state.settings.as_ref()).await?;
    let gateway = TestOrderGateway::new(settings, state.config.return_url_base.clone());

    let result = gateway
        .process_payment(state.orders.as_ref(), &DiscardCart, request.order_id)
        .await?;

    info!(order_id = request.order_id, "Checkout completed via test gateway");
    Ok(Envelope::success(result))
}

#[derive(Debug, Serialize)]
pub struct PaymentMethodResponse {
    pub order_id: i64,
    pub payment_method: Option<String>,
    pub payment_method_title: Option<String>,
}

/// Look up the payment method recorded on an order:
/// GET /v1/orders/{order_id}/payment-method
pub async fn get_order_payment_method(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<Json<Envelope<PaymentMethodResponse>>> {
    let order = state
        .orders
        .find_order(order_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Envelope::success(PaymentMethodResponse {
        order_id: order.order_id,
        payment_method: order.payment_method,
        payment_method_title: order.payment_method_title,
    }))
}
