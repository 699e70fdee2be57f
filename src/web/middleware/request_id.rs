//! Request ID middleware for tracing and debugging.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Generate a unique request ID, expose it to handlers via extensions, and
/// echo it back in the `X-Request-ID` response header.
pub async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Request ID wrapper for extension storage.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);
