//! Fixed markers, option keys, and batch parameters shared across the crate.

use crate::models::order::OrderStatus;

/// Payment-method marker written onto orders placed through the test gateway.
/// The purge query matches on exactly this value.
pub const TEST_ORDER_PAYMENT_METHOD: &str = "test_order";

/// Human-readable payment-method title shown at checkout and in order lookups.
pub const TEST_ORDER_METHOD_TITLE: &str = "Test Order";

/// Fixed page size for the scan-and-delete step.
pub const PURGE_BATCH_SIZE: i64 = 10;

/// Action name bound into purge action tokens.
pub const PURGE_ACTION: &str = "delete_test_orders";

/// Settings key for the status applied to test orders at payment time.
pub const SETTING_ORDER_STATUS: &str = "test_order_status";

/// Settings key for whether the gateway reduces stock levels.
pub const SETTING_REDUCE_STOCK: &str = "test_order_reduce_stock";

/// Statuses the purge scans; orders outside this set are never touched.
pub const PURGEABLE_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Completed,
    OrderStatus::Processing,
    OrderStatus::OnHold,
    OrderStatus::Pending,
];
