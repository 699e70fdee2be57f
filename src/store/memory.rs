//! In-memory store used by tests and embedders.
//!
//! Mirrors the Postgres implementation's semantics, including hard deletes
//! and the at-most-once stock reduction guard.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::constants::{PURGEABLE_STATUSES, TEST_ORDER_PAYMENT_METHOD};
use crate::error::{Result, TestOrdersError};
use crate::models::order::{NewOrder, Order, OrderStatus};
use crate::store::{OrderStore, SettingsStore};

#[derive(Debug, Default)]
struct Inner {
    orders: BTreeMap<i64, Order>,
    settings: HashMap<String, String>,
    next_id: i64,
}

/// Cloneable handle to a shared in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders currently held, regardless of matching criteria.
    pub fn order_count(&self) -> usize {
        self.inner.lock().orders.len()
    }

    fn matches_purge_criteria(order: &Order) -> bool {
        order.payment_method.as_deref() == Some(TEST_ORDER_PAYMENT_METHOD)
            && PURGEABLE_STATUSES.contains(&order.status)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, new_order: NewOrder) -> Result<Order> {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let now = chrono::Utc::now().naive_utc();
        let order = Order {
            order_id: inner.next_id,
            status: new_order.status,
            payment_method: new_order.payment_method,
            payment_method_title: new_order.payment_method_title,
            stock_reduced: false,
            note: None,
            created_at: now,
            updated_at: now,
        };
        inner.orders.insert(order.order_id, order.clone());
        Ok(order)
    }

    async fn find_order(&self, order_id: i64) -> Result<Option<Order>> {
        Ok(self.inner.lock().orders.get(&order_id).cloned())
    }

    async fn count_test_orders(&self) -> Result<i64> {
        let inner = self.inner.lock();
        Ok(inner
            .orders
            .values()
            .filter(|o| Self::matches_purge_criteria(o))
            .count() as i64)
    }

    async fn test_order_ids(&self, offset: i64, limit: i64) -> Result<Vec<i64>> {
        let inner = self.inner.lock();
        Ok(inner
            .orders
            .values()
            .filter(|o| Self::matches_purge_criteria(o))
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|o| o.order_id)
            .collect())
    }

    async fn delete_order(&self, order_id: i64) -> Result<bool> {
        Ok(self.inner.lock().orders.remove(&order_id).is_some())
    }

    async fn set_payment_method(&self, order_id: i64, method: &str, title: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        let order = inner
            .orders
            .get_mut(&order_id)
            .ok_or(TestOrdersError::OrderNotFound(order_id))?;
        order.payment_method = Some(method.to_string());
        order.payment_method_title = Some(title.to_string());
        order.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus, note: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        let order = inner
            .orders
            .get_mut(&order_id)
            .ok_or(TestOrdersError::OrderNotFound(order_id))?;
        order.status = status;
        order.note = Some(note.to_string());
        order.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }

    async fn reduce_stock(&self, order_id: i64) -> Result<()> {
        let mut inner = self.inner.lock();
        let order = inner
            .orders
            .get_mut(&order_id)
            .ok_or(TestOrdersError::OrderNotFound(order_id))?;
        order.stock_reduced = true;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.lock().settings.get(key).cloned())
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .lock()
            .settings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
