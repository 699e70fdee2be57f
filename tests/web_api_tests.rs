//! Integration tests for the admin API, driven in-process over the memory
//! store with `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{auth_config, seed_test_orders, TEST_API_KEY};
use test_orders::store::{MemoryStore, OrderStore};
use test_orders::web::create_app;
use test_orders::web::state::AppState;

fn app_with(store: MemoryStore) -> Router {
    let state = AppState::new(store, auth_config()).unwrap();
    create_app(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request.header(header::AUTHORIZATION, format!("Bearer {TEST_API_KEY}"))
}

async fn fetch_action_token(app: &Router) -> String {
    let request = authed(Request::builder().uri("/v1/test-orders/purge/token"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn purge_step(app: &Router, token: &str, state: &Value) -> (StatusCode, Value) {
    let mut payload = state.clone();
    payload["token"] = json!(token);
    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/test-orders/purge")
            .header(header::CONTENT_TYPE, "application/json"),
    )
    .body(Body::from(payload.to_string()))
    .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn health_is_public() {
    let app = app_with(MemoryStore::new());
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn v1_requires_api_key() {
    let store = MemoryStore::new();
    seed_test_orders(&store, 5).await;
    let app = app_with(store.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/v1/test-orders/purge")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"offset": 0, "total_deleted": 0, "total_scanned": 0}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    // No side effects.
    assert_eq!(store.order_count(), 5);
}

#[tokio::test]
async fn purge_requires_a_valid_action_token() {
    let store = MemoryStore::new();
    seed_test_orders(&store, 5).await;
    let app = app_with(store.clone());

    let (status, body) = purge_step(
        &app,
        "not-a-real-token",
        &json!({"offset": 0, "total_deleted": 0, "total_scanned": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("AUTHENTICATION_FAILED"));
    assert_eq!(store.order_count(), 5);
}

#[tokio::test]
async fn token_for_another_action_is_rejected() {
    let store = MemoryStore::new();
    seed_test_orders(&store, 3).await;
    let state = AppState::new(store.clone(), auth_config()).unwrap();
    let wrong_action = state.tokens.issue("reindex_catalog").unwrap();
    let app = create_app(state);

    let (status, _body) = purge_step(
        &app,
        &wrong_action.token,
        &json!({"offset": 0, "total_deleted": 0, "total_scanned": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.order_count(), 3);
}

#[tokio::test]
async fn full_purge_run_over_http() {
    let store = MemoryStore::new();
    seed_test_orders(&store, 23).await;
    let app = app_with(store.clone());

    let mut state = json!({"offset": 0, "total_deleted": 0, "total_scanned": 0});
    let mut calls = 0;

    loop {
        let token = fetch_action_token(&app).await;
        let (status, body) = purge_step(&app, &token, &state).await;
        calls += 1;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        let data = &body["data"];

        if data["has_more"] == json!(false) {
            assert_eq!(data["total_deleted"], json!(23));
            assert_eq!(data["deleted_count"], json!(3));
            assert_eq!(data["progress_percentage"], json!(100));
            break;
        }

        state = json!({
            "offset": data["next_offset"],
            "total_deleted": data["total_deleted"],
            "total_scanned": data["total_scanned"],
        });
    }

    assert_eq!(calls, 3);
    assert_eq!(store.order_count(), 0);
}

#[tokio::test]
async fn empty_store_reports_none_found() {
    let app = app_with(MemoryStore::new());
    let token = fetch_action_token(&app).await;

    let (status, body) = purge_step(
        &app,
        &token,
        &json!({"offset": 0, "total_deleted": 0, "total_scanned": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_scanned"], json!(0));
    assert_eq!(data["has_more"], json!(false));
    assert_eq!(data["progress_percentage"], json!(100));
    assert_eq!(data["message"], json!("No test orders found."));
}

#[tokio::test]
async fn malformed_counts_are_treated_as_zero() {
    let store = MemoryStore::new();
    seed_test_orders(&store, 4).await;
    let app = app_with(store.clone());
    let token = fetch_action_token(&app).await;

    let (status, body) = purge_step(
        &app,
        &token,
        &json!({"offset": "bogus", "total_deleted": null, "total_scanned": -7}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_scanned"], json!(4));
    assert_eq!(data["total_deleted"], json!(4));
    assert_eq!(data["has_more"], json!(false));
}

#[tokio::test]
async fn settings_round_trip() {
    let app = app_with(MemoryStore::new());

    // Defaults before anything is saved.
    let request = authed(Request::builder().uri("/v1/settings"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["settings"]["order_status"], json!("completed"));
    assert_eq!(body["data"]["settings"]["reduce_stock"], json!(true));
    assert!(body["data"]["fields"].as_array().unwrap().len() == 2);

    // Save new values.
    let request = authed(
        Request::builder()
            .method("PUT")
            .uri("/v1/settings")
            .header(header::CONTENT_TYPE, "application/json"),
    )
    .body(Body::from(
        json!({"order_status": "on-hold", "reduce_stock": false}).to_string(),
    ))
    .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_status"], json!("on-hold"));

    // Read them back.
    let request = authed(Request::builder().uri("/v1/settings"))
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&app, request).await;
    assert_eq!(body["data"]["settings"]["order_status"], json!("on-hold"));
    assert_eq!(body["data"]["settings"]["reduce_stock"], json!(false));
}

#[tokio::test]
async fn settings_reject_non_purgeable_status() {
    let app = app_with(MemoryStore::new());

    let request = authed(
        Request::builder()
            .method("PUT")
            .uri("/v1/settings")
            .header(header::CONTENT_TYPE, "application/json"),
    )
    .body(Body::from(
        json!({"order_status": "cancelled", "reduce_stock": true}).to_string(),
    ))
    .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
}

#[tokio::test]
async fn checkout_marks_order_and_purge_finds_it() {
    let store = MemoryStore::new();
    let order = store
        .create_order(test_orders::models::order::NewOrder::default())
        .await
        .unwrap();
    let app = app_with(store.clone());

    let request = authed(
        Request::builder()
            .method("POST")
            .uri("/v1/checkout")
            .header(header::CONTENT_TYPE, "application/json"),
    )
    .body(Body::from(json!({"order_id": order.order_id}).to_string()))
    .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["result"], json!("success"));
    assert!(body["data"]["redirect"]
        .as_str()
        .unwrap()
        .ends_with(&format!("/order-received/{}", order.order_id)));

    // The payment method is now recorded.
    let request = authed(Request::builder().uri(format!(
        "/v1/orders/{}/payment-method",
        order.order_id
    )))
    .body(Body::empty())
    .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["payment_method"], json!("test_order"));
    assert_eq!(body["data"]["payment_method_title"], json!("Test Order"));

    // A purge run now matches the order.
    let token = fetch_action_token(&app).await;
    let (_, body) = purge_step(
        &app,
        &token,
        &json!({"offset": 0, "total_deleted": 0, "total_scanned": 0}),
    )
    .await;
    assert_eq!(body["data"]["total_scanned"], json!(1));
    assert_eq!(store.order_count(), 0);
}

#[tokio::test]
async fn payment_method_lookup_for_missing_order_is_404() {
    let app = app_with(MemoryStore::new());
    let request = authed(Request::builder().uri("/v1/orders/9001/payment-method"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}
