use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Result, SpecCheckError};
use crate::models::{ChatRequest, ChatResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse>;
}

/// Transport to the hosted generator gateway. One attempt per request: no
/// retry, no backoff, no timeout. A hung upstream hangs the request.
pub struct GatewayTransport {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GatewayTransport {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Transport for GatewayTransport {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| {
                SpecCheckError::Upstream(format!("failed to reach generator gateway: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(%status, "generator gateway error");
            return Err(SpecCheckError::Upstream(format!(
                "generator gateway returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            SpecCheckError::Upstream(format!("failed to parse generator gateway response: {e}"))
        })
    }
}
