//! # Test Order Payment Gateway
//!
//! A zero-payment gateway: instead of charging, it stamps the order with the
//! test-order marker, applies the configured status, optionally reduces
//! stock, and empties the cart. The gateway capability is a trait rather than
//! a base class: initialize settings, describe admin fields, process a
//! payment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{
    PURGEABLE_STATUSES, SETTING_ORDER_STATUS, SETTING_REDUCE_STOCK, TEST_ORDER_METHOD_TITLE,
    TEST_ORDER_PAYMENT_METHOD,
};
use crate::error::{Result, TestOrdersError};
use crate::models::settings::GatewaySettings;
use crate::store::OrderStore;

/// Shopper cart attached to the checkout in progress.
///
/// The service does not own cart state; callers supply whichever session
/// implementation their storefront uses. [`DiscardCart`] is the stand-in for
/// flows with no live cart.
pub trait CartSession: Send + Sync {
    fn empty_cart(&self);
}

/// Cart stand-in that drops the request's cart contents without ceremony.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardCart;

impl CartSession for DiscardCart {
    fn empty_cart(&self) {}
}

/// Successful payment outcome: a redirect to the order-received page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub result: String,
    pub redirect: String,
}

/// Description of one admin settings field, serialized for settings clients.
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub options: Vec<&'static str>,
    pub default: &'static str,
}

/// Capability contract for payment gateways.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// The gateway's current settings.
    fn settings(&self) -> &GatewaySettings;

    /// Admin form fields this gateway exposes.
    fn form_fields(&self) -> Vec<FormField>;

    /// Process a payment for an existing order.
    async fn process_payment(
        &self,
        store: &dyn OrderStore,
        cart: &dyn CartSession,
        order_id: i64,
    ) -> Result<PaymentResult>;
}

/// The zero-payment test gateway.
#[derive(Debug, Clone)]
pub struct TestOrderGateway {
    settings: GatewaySettings,
    return_url_base: String,
}

impl TestOrderGateway {
    pub fn new(settings: GatewaySettings, return_url_base: impl Into<String>) -> Self {
        Self {
            settings,
            return_url_base: return_url_base.into(),
        }
    }

    fn return_url(&self, order_id: i64) -> String {
        format!(
            "{}/order-received/{order_id}",
            self.return_url_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl PaymentGateway for TestOrderGateway {
    fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField {
                key: SETTING_ORDER_STATUS,
                label: "Order Status",
                kind: "select",
                options: PURGEABLE_STATUSES.iter().map(|s| s.as_str()).collect(),
                default: "completed",
            },
            FormField {
                key: SETTING_REDUCE_STOCK,
                label: "Reduce Stock",
                kind: "select",
                options: vec!["yes", "no"],
                default: "yes",
            },
        ]
    }

    async fn process_payment(
        &self,
        store: &dyn OrderStore,
        cart: &dyn CartSession,
        order_id: i64,
    ) -> Result<PaymentResult> {
        let order = store
            .find_order(order_id)
            .await?
            .ok_or(TestOrdersError::OrderNotFound(order_id))?;

        store
            .set_payment_method(
                order.order_id,
                TEST_ORDER_PAYMENT_METHOD,
                TEST_ORDER_METHOD_TITLE,
            )
            .await?;

        store
            .update_status(
                order.order_id,
                self.settings.order_status,
                "Test order processed.",
            )
            .await?;

        if self.settings.reduce_stock {
            store.reduce_stock(order.order_id).await?;
        }

        cart.empty_cart();

        info!(
            order_id = order.order_id,
            status = %self.settings.order_status,
            reduce_stock = self.settings.reduce_stock,
            "Processed test order"
        );

        Ok(PaymentResult {
            result: "success".to_string(),
            redirect: self.return_url(order.order_id),
        })
    }
}

/// Look up the payment-method title recorded on an order.
///
/// Returns `None` when the order does not exist or no payment method has been
/// recorded yet.
pub async fn order_payment_method(
    store: &dyn OrderStore,
    order_id: i64,
) -> Result<Option<String>> {
    Ok(store
        .find_order(order_id)
        .await?
        .and_then(|order| order.payment_method_title))
}
