//! # Purge API Client
//!
//! HTTP client for the test-orders admin API: action tokens, purge steps,
//! settings, and health.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::client::coordinator::{RunState, StepExecutor};
use crate::error::{Result, TestOrdersError};
use crate::models::settings::GatewaySettings;
use crate::purge::StepResult;
use crate::web::auth::IssuedToken;
use crate::web::handlers::health::HealthResponse;
use crate::web::response_types::Envelope;

/// Configuration for the purge API client.
#[derive(Debug, Clone)]
pub struct PurgeApiConfig {
    /// Base URL for the admin API (e.g. `http://localhost:8080`).
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Bearer api key, when the server has authentication enabled.
    pub api_key: Option<String>,
}

impl Default for PurgeApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 30_000,
            api_key: None,
        }
    }
}

/// HTTP client for communicating with the test-orders service.
#[derive(Debug, Clone)]
pub struct PurgeApiClient {
    client: Client,
    config: PurgeApiConfig,
}

impl PurgeApiClient {
    pub fn new(config: PurgeApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TestOrdersError::client(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn parse_envelope<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TestOrdersError::client(format!(
                "Request failed with status {status}: {body}"
            )));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| TestOrdersError::client(format!("Failed to parse response: {e}")))?;

        if !envelope.success {
            return Err(TestOrdersError::client("Server reported failure"));
        }

        Ok(envelope.data)
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| TestOrdersError::client(format!("Failed to send request: {e}")))?;

        response
            .json()
            .await
            .map_err(|e| TestOrdersError::client(format!("Failed to parse response: {e}")))
    }

    /// GET /v1/test-orders/purge/token
    pub async fn action_token(&self) -> Result<IssuedToken> {
        let request = self.authorize(self.client.get(self.url("/v1/test-orders/purge/token")));
        let response = request
            .send()
            .await
            .map_err(|e| TestOrdersError::client(format!("Failed to send request: {e}")))?;

        self.parse_envelope(response).await
    }

    /// POST /v1/test-orders/purge
    pub async fn purge_step(&self, token: &str, state: RunState) -> Result<StepResult> {
        let body = serde_json::json!({
            "offset": state.offset,
            "total_deleted": state.total_deleted,
            "total_scanned": state.total_scanned,
            "token": token,
        });

        debug!(offset = state.offset, "Sending purge step request");

        let request = self.authorize(
            self.client
                .post(self.url("/v1/test-orders/purge"))
                .json(&body),
        );
        let response = request
            .send()
            .await
            .map_err(|e| TestOrdersError::client(format!("Failed to send request: {e}")))?;

        self.parse_envelope(response).await
    }

    /// GET /v1/settings
    pub async fn settings(&self) -> Result<GatewaySettings> {
        #[derive(Deserialize)]
        struct SettingsPayload {
            settings: GatewaySettings,
        }

        let request = self.authorize(self.client.get(self.url("/v1/settings")));
        let response = request
            .send()
            .await
            .map_err(|e| TestOrdersError::client(format!("Failed to send request: {e}")))?;

        let payload: SettingsPayload = self.parse_envelope(response).await?;
        Ok(payload.settings)
    }

    /// PUT /v1/settings
    pub async fn save_settings(&self, settings: GatewaySettings) -> Result<GatewaySettings> {
        let body = serde_json::json!({
            "order_status": settings.order_status,
            "reduce_stock": settings.reduce_stock,
        });

        let request = self.authorize(self.client.put(self.url("/v1/settings")).json(&body));
        let response = request
            .send()
            .await
            .map_err(|e| TestOrdersError::client(format!("Failed to send request: {e}")))?;

        self.parse_envelope(response).await
    }
}

#[async_trait::async_trait]
impl StepExecutor for PurgeApiClient {
    /// One step over HTTP: fetch a fresh action token, then post the step.
    async fn execute_step(&self, state: RunState) -> Result<StepResult> {
        let issued = self.action_token().await?;
        self.purge_step(&issued.token, state).await
    }
}
