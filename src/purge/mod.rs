//! The scan-and-delete core: one stateless step of a client-driven purge run.

pub mod step;

pub use step::{run_step, StepRequest, StepResult};
