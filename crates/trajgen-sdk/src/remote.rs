//! Inference backend that forwards each call to an HTTP model service.
//!
//! The service receives `{latent, start, end, seq_len}` with normalized endpoints and
//! answers `{trajectory: [[x, y, z], ...]}` in normalized coordinates.

use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trajgen_core::{ModelError, ModelInput, ModelOutput, TrajectoryModel};

const BACKEND_NAME: &str = "remote";

/// Blocking client; do not construct or call it from inside an async runtime thread.
pub struct RemoteModel {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    latent: &'a [f64],
    start: [f64; 3],
    end: [f64; 3],
    seq_len: usize,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    trajectory: Vec<Vec<f64>>,
}

impl RemoteModel {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TrajectoryModel for RemoteModel {
    fn infer(&self, input: &ModelInput) -> Result<ModelOutput, ModelError> {
        let request = InferenceRequest {
            latent: input.latent.as_slice(),
            start: input.start,
            end: input.end,
            seq_len: input.seq_len,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|err| ModelError::new(BACKEND_NAME, err.to_string()))?;

        let body: InferenceResponse = response
            .json()
            .map_err(|err| ModelError::new(BACKEND_NAME, format!("invalid response body: {}", err)))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            rows = body.trajectory.len(),
            "remote inference complete"
        );
        into_output(body)
    }

    fn name(&self) -> &str {
        BACKEND_NAME
    }
}

fn into_output(body: InferenceResponse) -> Result<ModelOutput, ModelError> {
    ModelOutput::from_rows(&body.trajectory)
        .map_err(|err| ModelError::new(BACKEND_NAME, err.message))
}
