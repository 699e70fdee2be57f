//! Request handlers for the admin API.

pub mod checkout;
pub mod health;
pub mod purge;
pub mod settings;
