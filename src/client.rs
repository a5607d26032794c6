use crate::config::METAMORPHOSIS_PATH;
use crate::error::UnfoldError;
use crate::types::{EngineResponse, SeedPayload};
use reqwest::Client;
use serde_json::Value;

/// Issues submissions through the proxied metamorphosis path.
#[derive(Clone)]
pub struct EngineClient {
    client: Client,
    endpoint: String,
}

impl EngineClient {
    /// `base_url` is the origin serving the proxy, e.g. `http://localhost:3000`.
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), METAMORPHOSIS_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn unfold(&self, payload: &SeedPayload) -> Result<Value, UnfoldError> {
        log::debug!(
            "POST {} ({} chars of seed)",
            self.endpoint,
            payload.seed_logic.len()
        );

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach {}: {e}", self.endpoint);
                UnfoldError::Transport(Some(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Metamorphosis request failed with {status}");
            return Err(UnfoldError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.json::<EngineResponse>().await.map_err(|e| {
            log::error!("Failed to parse engine response: {e}");
            UnfoldError::Transport(Some(e.to_string()))
        })?;

        Ok(body.data)
    }
}
