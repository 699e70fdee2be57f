//! # test-orders
//!
//! Test-order tooling for commerce platforms: a zero-payment "Test Order"
//! gateway plus an administrative, batched purge of the orders it created.
//!
//! The purge is split across a request boundary by design. The server-side
//! [`purge`] step is stateless between calls; the client-side
//! [`client::coordinator`] owns the run state and drives the step until the
//! continuation flag clears. All coordination state round-trips through the
//! request/response payload, so the handler can be replicated freely.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod purge;
pub mod store;
pub mod web;

pub use config::ServiceConfig;
pub use error::{Result, TestOrdersError};
