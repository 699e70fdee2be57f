//! Crate-wide error type and result alias.

use thiserror::Error;

/// Errors surfaced by the test-orders service and client.
#[derive(Debug, Error)]
pub enum TestOrdersError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("order {0} not found")]
    OrderNotFound(i64),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("client error: {0}")]
    Client(String),
}

impl TestOrdersError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TestOrdersError>;
