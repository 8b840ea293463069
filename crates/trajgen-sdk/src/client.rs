//! Async client for the trajectory generation service.

use anyhow::Result;
use trajgen_core::{GenerateRequest, GenerateResponse, HealthResponse, ModelInfo};

/// Client for connecting to a trajgen server.
pub struct TrajgenClient {
    base_url: String,
    client: reqwest::Client,
}

impl TrajgenClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn model_info(&self) -> Result<ModelInfo> {
        let url = format!("{}/v1/model", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Generate and rank candidates by path quality.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.post_generate("/v1/generate", request).await
    }

    /// Generate candidates and rank them by obstacle clearance.
    pub async fn generate_with_obstacles(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse> {
        self.post_generate("/v1/generate/obstacles", request).await
    }

    async fn post_generate(&self, path: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("generation request failed ({}): {}", status, body);
        }
        let body: GenerateResponse = response.json().await?;
        tracing::debug!(candidates = body.candidates.len(), "received generated candidates");
        Ok(body)
    }
}
