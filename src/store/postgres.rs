//! sqlx/Postgres implementation of the store traits.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::constants::{PURGEABLE_STATUSES, TEST_ORDER_PAYMENT_METHOD};
use crate::error::{Result, TestOrdersError};
use crate::models::order::{NewOrder, Order, OrderStatus};
use crate::store::{OrderStore, SettingsStore};

const ORDER_COLUMNS: &str = "order_id, status, payment_method, payment_method_title, \
                             stock_reduced, note, created_at, updated_at";

/// Postgres-backed store. Cheap to clone; wraps a connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run pending migrations from the crate's `migrations/` directory.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TestOrdersError::configuration(format!("Migration failed: {e}")))?;
        Ok(())
    }

    fn purgeable_statuses() -> Vec<String> {
        PURGEABLE_STATUSES
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }
}

fn order_from_row(row: &PgRow) -> Result<Order> {
    let status: String = row.try_get("status")?;
    Ok(Order {
        order_id: row.try_get("order_id")?,
        status: status.parse::<OrderStatus>()?,
        payment_method: row.try_get("payment_method")?,
        payment_method_title: row.try_get("payment_method_title")?,
        stock_reduced: row.try_get("stock_reduced")?,
        note: row.try_get("note")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl OrderStore for PgStore {
    async fn create_order(&self, new_order: NewOrder) -> Result<Order> {
        let row = sqlx::query(&format!(
            "INSERT INTO orders (status, payment_method, payment_method_title) \
             VALUES ($1, $2, $3) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new_order.status.as_str())
        .bind(&new_order.payment_method)
        .bind(&new_order.payment_method_title)
        .fetch_one(&self.pool)
        .await?;

        order_from_row(&row)
    }

    async fn find_order(&self, order_id: i64) -> Result<Option<Order>> {
        let row = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(order_from_row).transpose()
    }

    async fn count_test_orders(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE payment_method = $1 AND status = ANY($2)",
        )
        .bind(TEST_ORDER_PAYMENT_METHOD)
        .bind(Self::purgeable_statuses())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn test_order_ids(&self, offset: i64, limit: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT order_id FROM orders \
             WHERE payment_method = $1 AND status = ANY($2) \
             ORDER BY order_id OFFSET $3 LIMIT $4",
        )
        .bind(TEST_ORDER_PAYMENT_METHOD)
        .bind(Self::purgeable_statuses())
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn delete_order(&self, order_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        debug!(order_id, deleted = result.rows_affected() > 0, "Hard-deleted order");
        Ok(result.rows_affected() > 0)
    }

    async fn set_payment_method(&self, order_id: i64, method: &str, title: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE orders SET payment_method = $2, payment_method_title = $3, \
             updated_at = NOW() WHERE order_id = $1",
        )
        .bind(order_id)
        .bind(method)
        .bind(title)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TestOrdersError::OrderNotFound(order_id));
        }
        Ok(())
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus, note: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE orders SET status = $2, note = $3, updated_at = NOW() WHERE order_id = $1",
        )
        .bind(order_id)
        .bind(status.as_str())
        .bind(note)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TestOrdersError::OrderNotFound(order_id));
        }
        Ok(())
    }

    async fn reduce_stock(&self, order_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE orders SET stock_reduced = TRUE, updated_at = NOW() \
             WHERE order_id = $1 AND stock_reduced = FALSE",
        )
        .bind(order_id)
        .execute(&self.pool)
        .await?;

        // Zero rows means either the order is missing or stock was already
        // reduced; only the former is an error.
        if result.rows_affected() == 0 && self.find_order(order_id).await?.is_none() {
            return Err(TestOrdersError::OrderNotFound(order_id));
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for PgStore {
    async fn setting(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
