//! # Scan-and-Delete Step
//!
//! One request/response cycle of the purge workflow. The step is stateless:
//! every input it needs arrives in the request, and everything the next call
//! needs goes back out in the result. The driving loop lives client-side in
//! [`crate::client::coordinator`].
//!
//! On the first call of a run (offset 0, or an unknown scanned total) the step
//! establishes the grand total with an unbounded count query. That total is
//! then treated as immutable for the rest of the run: deletions shrink the
//! live result set, but `next_offset` still advances by the full batch size
//! every call and termination compares it against the original total.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::constants::PURGE_BATCH_SIZE;
use crate::error::Result;
use crate::store::OrderStore;

/// Terminal message for an empty matching set.
pub const MSG_NONE_FOUND: &str = "No test orders found.";

/// Message accompanying every page that performed deletions.
pub const MSG_DELETING: &str = "Deleting test orders...";

/// Client-supplied run state. All fields default to 0 when absent, and
/// non-numeric or negative input is treated as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRequest {
    #[serde(default, deserialize_with = "lenient_count")]
    pub offset: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_deleted: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_scanned: i64,
}

/// Outcome of one step, echoed back to the client as its next input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub deleted_count: i64,
    pub total_deleted: i64,
    pub total_scanned: i64,
    pub next_offset: i64,
    pub has_more: bool,
    pub progress_percentage: i64,
    pub message: String,
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(parsed.max(0))
}

fn progress_percentage(total_deleted: i64, total_scanned: i64) -> i64 {
    if total_scanned <= 0 {
        return 0;
    }
    ((total_deleted as f64 / total_scanned as f64) * 100.0).round() as i64
}

/// Execute one scan-and-delete step against the store.
///
/// Establishes the run's scanned total when needed, hard-deletes one page of
/// matching orders, and reports the updated totals plus a continuation flag.
pub async fn run_step<S>(store: &S, request: StepRequest) -> Result<StepResult>
where
    S: OrderStore + ?Sized,
{
    let StepRequest {
        offset,
        total_deleted,
        mut total_scanned,
    } = request;

    // The scanned total is computed exactly once per run.
    if offset == 0 || total_scanned == 0 {
        total_scanned = store.count_test_orders().await?;
        debug!(total_scanned, "Established test order count for purge run");
    }

    if total_scanned == 0 {
        return Ok(StepResult {
            deleted_count: 0,
            total_deleted: 0,
            total_scanned: 0,
            next_offset: 0,
            has_more: false,
            progress_percentage: 100,
            message: MSG_NONE_FOUND.to_string(),
        });
    }

    // Pages [0, offset) were deleted by earlier steps of this run, so the
    // record at original position `offset` is now the head of the live
    // matching set. Fetching from the head keeps coverage complete while
    // `next_offset` still advances by the fixed batch size.
    let page = store.test_order_ids(0, PURGE_BATCH_SIZE).await?;

    let mut deleted_count = 0;
    for order_id in page {
        // Every fetched ID counts as deleted; per-record failures are not
        // tracked separately.
        store.delete_order(order_id).await?;
        deleted_count += 1;
    }

    let total_deleted = total_deleted + deleted_count;
    // The offset advances by the full batch size regardless of how many rows
    // the page actually held.
    let next_offset = offset + PURGE_BATCH_SIZE;
    let has_more = next_offset < total_scanned;

    info!(
        offset,
        deleted_count, total_deleted, total_scanned, has_more, "Purge step completed"
    );

    Ok(StepResult {
        deleted_count,
        total_deleted,
        total_scanned,
        next_offset,
        has_more,
        progress_percentage: progress_percentage(total_deleted, total_scanned),
        message: MSG_DELETING.to_string(),
    })
}
