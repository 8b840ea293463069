//! Error types shared by the generation pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajgenError {
    #[error("invalid normalization parameters: {0}")]
    InvalidParameters(String),
    #[error("generator not ready: {0}")]
    NotReady(String),
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),
    #[error("latent dimension must be positive (got {0})")]
    InvalidDimension(usize),
    #[error("candidate count must be positive (got {0})")]
    InvalidCount(usize),
}

pub type Result<T> = std::result::Result<T, TrajgenError>;

/// Failure reported by an inference backend.
#[derive(Debug, Error)]
#[error("{backend}: {message}")]
pub struct ModelError {
    pub backend: String,
    pub message: String,
}

impl ModelError {
    pub fn new(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            message: message.into(),
        }
    }
}

impl From<ModelError> for TrajgenError {
    fn from(err: ModelError) -> Self {
        TrajgenError::ModelInvocation(err.to_string())
    }
}
