//! # Order Model
//!
//! An order record as seen by this service. The only attribute that marks an
//! order as a test order is its payment-method marker; nothing else
//! distinguishes it from an order placed through a real gateway.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::TestOrdersError;

/// Order lifecycle status.
///
/// The four "open" statuses are the ones the purge scans; `Cancelled` and
/// `Refunded` orders are never touched by the purge query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = TestOrdersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "on-hold" => Ok(OrderStatus::OnHold),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            other => Err(TestOrdersError::validation(format!(
                "Unknown order status: {other}"
            ))),
        }
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub status: OrderStatus,
    /// Gateway identifier recorded at payment time, e.g. `test_order`.
    pub payment_method: Option<String>,
    /// Human-readable gateway title recorded at payment time.
    pub payment_method_title: Option<String>,
    /// Whether stock levels have already been reduced for this order.
    pub stock_reduced: bool,
    /// Most recent status note.
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields for order creation; generated columns are filled by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub status: OrderStatus,
    pub payment_method: Option<String>,
    pub payment_method_title: Option<String>,
}

impl Default for NewOrder {
    fn default() -> Self {
        Self {
            status: OrderStatus::Pending,
            payment_method: None,
            payment_method_title: None,
        }
    }
}
