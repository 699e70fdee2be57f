//! Structured logging setup for the server and CLI binaries.
//!
//! Console output is always enabled and filtered through `RUST_LOG`; setting
//! `TEST_ORDERS_LOG_DIR` additionally writes JSON logs to a per-process file.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::OnceLock;

use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize tracing with a console layer and an optional JSON file layer.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter =
            || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_filter(env_filter());

        let file_layer = std::env::var("TEST_ORDERS_LOG_DIR").ok().map(|dir| {
            let log_dir = PathBuf::from(dir);
            if !log_dir.exists() {
                fs::create_dir_all(&log_dir).expect("Failed to create log directory");
            }

            let pid = process::id();
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
            let file_appender = tracing_appender::rolling::never(
                &log_dir,
                format!("test-orders.{pid}.{timestamp}.log"),
            );
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer guard alive for the process lifetime.
            std::mem::forget(guard);

            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .json()
                .with_filter(env_filter())
        });

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }
    });
}
