//! # Batch Coordinator
//!
//! The client-side driver of a purge run. Owns the transient run state for
//! the lifetime of one operator-initiated run, invokes the scan-and-delete
//! step strictly sequentially, threads each result back into the next
//! request, and terminates on the step's continuation flag.
//!
//! There is no retry and no resumption: a transport failure halts the loop
//! with partial deletions left in place, and abandoning the process simply
//! discards the run state.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;
use crate::purge::StepResult;

/// Generic failure message shown when a step request fails.
pub const MSG_RUN_FAILED: &str = "An error occurred. Please try again.";

/// Terminal message for a completed run.
pub const MSG_RUN_COMPLETE: &str = "All test orders have been deleted successfully!";

/// Terminal message when the first call finds nothing to delete.
pub const MSG_RUN_EMPTY: &str = "No test orders found.";

/// Transient, client-owned run state; discarded when the run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    pub offset: i64,
    pub total_deleted: i64,
    pub total_scanned: i64,
}

/// Executes one scan-and-delete step. Implemented over HTTP by
/// [`crate::client::PurgeApiClient`] and by scripted doubles in tests.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn execute_step(&self, state: RunState) -> Result<StepResult>;
}

/// Progress snapshot pushed to the sink after every successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub percentage: i64,
    pub total_deleted: i64,
    pub total_scanned: i64,
    pub message: String,
}

/// Rendering surface for run progress; the CLI renders a console bar.
pub trait ProgressSink: Send {
    /// Run started: reset any prior progress display to 0%.
    fn on_start(&mut self);

    fn on_progress(&mut self, update: &ProgressUpdate);

    /// Run ended with a single terminal message.
    fn on_terminal(&mut self, message: &str);
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        total_deleted: i64,
        total_scanned: i64,
    },
    NoneFound,
    Failed {
        message: String,
    },
}

/// Drives purge runs to completion through a [`StepExecutor`].
#[derive(Debug)]
pub struct BatchCoordinator<E> {
    executor: E,
}

impl<E: StepExecutor> BatchCoordinator<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Run the purge loop from a zeroed state to a terminal outcome.
    ///
    /// Each step call is issued only after the previous response arrives; the
    /// returned `total_scanned` is latched from the first response and the
    /// local state is otherwise replaced wholesale by the step's result.
    pub async fn run(&self, sink: &mut dyn ProgressSink) -> RunOutcome {
        let mut state = RunState::default();
        let mut first_call = true;

        sink.on_start();

        loop {
            let result = match self.executor.execute_step(state).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "Purge step request failed; halting run");
                    sink.on_terminal(MSG_RUN_FAILED);
                    return RunOutcome::Failed {
                        message: e.to_string(),
                    };
                }
            };

            if first_call && result.total_scanned == 0 {
                sink.on_terminal(MSG_RUN_EMPTY);
                return RunOutcome::NoneFound;
            }
            first_call = false;

            if state.total_scanned == 0 {
                state.total_scanned = result.total_scanned;
            }
            state.total_deleted = result.total_deleted;
            state.offset = result.next_offset;

            sink.on_progress(&ProgressUpdate {
                percentage: result.progress_percentage,
                total_deleted: state.total_deleted,
                total_scanned: state.total_scanned,
                message: progress_message(state.total_deleted, state.total_scanned),
            });

            if !result.has_more {
                // Terminal call: force the display to 100%.
                sink.on_progress(&ProgressUpdate {
                    percentage: 100,
                    total_deleted: state.total_deleted,
                    total_scanned: state.total_scanned,
                    message: progress_message(state.total_deleted, state.total_scanned),
                });
                sink.on_terminal(MSG_RUN_COMPLETE);

                info!(
                    total_deleted = state.total_deleted,
                    total_scanned = state.total_scanned,
                    "Purge run completed"
                );

                return RunOutcome::Completed {
                    total_deleted: state.total_deleted,
                    total_scanned: state.total_scanned,
                };
            }
        }
    }
}

fn progress_message(total_deleted: i64, total_scanned: i64) -> String {
    format!("{total_deleted} orders deleted out of {total_scanned} scanned")
}
