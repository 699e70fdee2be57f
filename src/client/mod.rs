//! Client-side pieces: the HTTP API client, the batch coordinator that
//! drives a purge run, and console progress rendering.

pub mod api_client;
pub mod coordinator;
pub mod progress;

pub use api_client::{PurgeApiClient, PurgeApiConfig};
pub use coordinator::{
    BatchCoordinator, ProgressSink, ProgressUpdate, RunOutcome, RunState, StepExecutor,
};
pub use progress::ConsoleProgress;
