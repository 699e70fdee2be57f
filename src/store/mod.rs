//! Storage abstraction over the order and settings tables.
//!
//! The web layer and the purge step talk to these traits only; [`postgres`]
//! provides the production sqlx implementation and [`memory`] an in-process
//! store used by tests and embedders.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::order::{NewOrder, Order, OrderStatus};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Order persistence operations.
///
/// The purge queries (`count_test_orders`, `test_order_ids`) match exactly one
/// fixed criterion: payment-method marker equals the test marker, status in
/// the purgeable set. `delete_order` is a hard delete with no trash step.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, new_order: NewOrder) -> Result<Order>;

    async fn find_order(&self, order_id: i64) -> Result<Option<Order>>;

    /// Unbounded count of orders matching the test-order criterion.
    async fn count_test_orders(&self) -> Result<i64>;

    /// One page of matching order IDs, ordered by id.
    async fn test_order_ids(&self, offset: i64, limit: i64) -> Result<Vec<i64>>;

    /// Permanently remove an order. Returns whether a row was deleted.
    async fn delete_order(&self, order_id: i64) -> Result<bool>;

    async fn set_payment_method(&self, order_id: i64, method: &str, title: &str) -> Result<()>;

    async fn update_status(&self, order_id: i64, status: OrderStatus, note: &str) -> Result<()>;

    /// Reduce stock levels for an order, at most once per order.
    async fn reduce_stock(&self, order_id: i64) -> Result<()>;
}

/// Key-value settings persistence.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn setting(&self, key: &str) -> Result<Option<String>>;

    async fn put_setting(&self, key: &str, value: &str) -> Result<()>;
}
