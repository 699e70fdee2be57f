//! Test-orders service entry point.

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use test_orders::store::PgStore;
use test_orders::web::state::AppState;
use test_orders::web::create_app;
use test_orders::{logging, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = ServiceConfig::from_env()?;
    info!(bind_address = %config.bind_address, "Starting test-orders service");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let store = PgStore::new(pool);
    store.migrate().await?;

    let bind_address = config.bind_address.clone();
    let state = AppState::new(store, config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
