//! End-to-end purge runs: a real server on a loopback listener, driven by
//! the HTTP client through the batch coordinator.

mod common;

use tokio::net::TcpListener;

use common::{auth_config, seed_test_orders, TEST_API_KEY};
use test_orders::client::{
    BatchCoordinator, ProgressSink, ProgressUpdate, PurgeApiClient, PurgeApiConfig, RunOutcome,
};
use test_orders::store::MemoryStore;
use test_orders::web::create_app;
use test_orders::web::state::AppState;

/// Collects updates without rendering anything.
#[derive(Default)]
struct SilentSink {
    updates: Vec<ProgressUpdate>,
    terminal: Option<String>,
}

impl ProgressSink for SilentSink {
    fn on_start(&mut self) {}

    fn on_progress(&mut self, update: &ProgressUpdate) {
        self.updates.push(update.clone());
    }

    fn on_terminal(&mut self, message: &str) {
        self.terminal = Some(message.to_string());
    }
}

async fn spawn_server(store: MemoryStore) -> String {
    let state = AppState::new(store, auth_config()).unwrap();
    let app = create_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn client_for(base_url: String, api_key: Option<&str>) -> PurgeApiClient {
    PurgeApiClient::new(PurgeApiConfig {
        base_url,
        api_key: api_key.map(String::from),
        ..PurgeApiConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn coordinator_purges_fifteen_orders_over_the_wire() {
    let store = MemoryStore::new();
    seed_test_orders(&store, 15).await;
    let base_url = spawn_server(store.clone()).await;

    let client = client_for(base_url, Some(TEST_API_KEY));
    let coordinator = BatchCoordinator::new(client);
    let mut sink = SilentSink::default();

    let outcome = coordinator.run(&mut sink).await;

    assert_eq!(
        outcome,
        RunOutcome::Completed {
            total_deleted: 15,
            total_scanned: 15,
        }
    );
    assert_eq!(store.order_count(), 0);

    let percentages: Vec<i64> = sink.updates.iter().map(|u| u.percentage).collect();
    assert_eq!(percentages, vec![67, 100, 100]);
}

#[tokio::test]
async fn empty_server_ends_the_run_on_the_first_call() {
    let base_url = spawn_server(MemoryStore::new()).await;

    let client = client_for(base_url, Some(TEST_API_KEY));
    let coordinator = BatchCoordinator::new(client);
    let mut sink = SilentSink::default();

    let outcome = coordinator.run(&mut sink).await;

    assert_eq!(outcome, RunOutcome::NoneFound);
    assert!(sink.updates.is_empty());
    assert_eq!(sink.terminal.as_deref(), Some("No test orders found."));
}

#[tokio::test]
async fn wrong_api_key_fails_the_run_and_deletes_nothing() {
    let store = MemoryStore::new();
    seed_test_orders(&store, 8).await;
    let base_url = spawn_server(store.clone()).await;

    let client = client_for(base_url, Some("wrong-key"));
    let coordinator = BatchCoordinator::new(client);
    let mut sink = SilentSink::default();

    let outcome = coordinator.run(&mut sink).await;

    assert!(matches!(outcome, RunOutcome::Failed { .. }));
    assert_eq!(store.order_count(), 8);
}

#[tokio::test]
async fn health_is_reachable_without_credentials() {
    let base_url = spawn_server(MemoryStore::new()).await;

    let client = client_for(base_url, None);
    let health = client.health().await.unwrap();

    assert_eq!(health.status, "ok");
}
