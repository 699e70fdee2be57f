//! Middleware applied to the admin API surface.

pub mod auth;
pub mod request_id;
