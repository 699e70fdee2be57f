//! Shared helpers for integration tests.

use test_orders::config::{AuthConfig, ServiceConfig};
use test_orders::constants::TEST_ORDER_PAYMENT_METHOD;
use test_orders::models::order::{NewOrder, OrderStatus};
use test_orders::store::{MemoryStore, OrderStore};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_TOKEN_SECRET: &str = "test-token-secret";

/// Config with authentication enabled and test credentials.
pub fn auth_config() -> ServiceConfig {
    ServiceConfig {
        auth: AuthConfig {
            enabled: true,
            api_key: TEST_API_KEY.to_string(),
            token_secret: TEST_TOKEN_SECRET.to_string(),
            token_ttl_secs: 60,
        },
        ..ServiceConfig::default()
    }
}

/// Seed `n` completed orders carrying the test-order marker.
pub async fn seed_test_orders(store: &MemoryStore, n: usize) {
    for _ in 0..n {
        store
            .create_order(NewOrder {
                status: OrderStatus::Completed,
                payment_method: Some(TEST_ORDER_PAYMENT_METHOD.to_string()),
                payment_method_title: Some("Test Order".to_string()),
            })
            .await
            .unwrap();
    }
}
