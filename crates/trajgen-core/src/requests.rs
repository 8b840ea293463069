//! Request/response types shared by the HTTP service and its clients.

use crate::metrics::{evaluate, is_valid, BatchSummary};
use crate::models::{Metrics, Path, Point, Ranking};
use crate::ranking::{label, RankingWeights};
use crate::rules::ValidityLimits;
use crate::safety::Obstacle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_samples() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub start: Point,
    pub end: Point,
    #[serde(default = "default_samples")]
    pub n_samples: usize,
    /// Return only the best `top_k` candidates.
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub weights: Option<RankingWeights>,
    #[serde(default)]
    pub limits: Option<ValidityLimits>,
    /// Only read by the obstacle-aware route, which ranks by clearance when this is
    /// non-empty. Plain generation ignores it.
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl GenerateRequest {
    pub fn new(start: Point, end: Point, n_samples: usize) -> Self {
        Self {
            start,
            end,
            n_samples,
            top_k: None,
            weights: None,
            limits: None,
            obstacles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePath {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Position in the generated batch.
    pub index: usize,
    pub score: f64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    pub metrics: Metrics,
    pub waypoints: Path,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub start: Point,
    pub end: Point,
    pub n_samples: usize,
    pub candidates: Vec<CandidatePath>,
    pub summary: BatchSummary,
    pub inference_time_ms: f64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub backend: String,
    pub latent_dim: usize,
    pub seq_len: usize,
    pub normalization_loaded: bool,
    pub mean: [f64; 3],
    pub std: [f64; 3],
}

/// Materializes ranked candidates with their metrics, best first.
pub fn build_candidates(
    paths: &[Path],
    ranked: &[Ranking],
    top_k: Option<usize>,
    expected_end: &Point,
    limits: Option<&ValidityLimits>,
) -> Vec<CandidatePath> {
    ranked
        .iter()
        .filter(|ranking| ranking.index < paths.len())
        .take(top_k.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(position, ranking)| {
            let path = &paths[ranking.index];
            CandidatePath {
                rank: position + 1,
                index: ranking.index,
                score: ranking.score,
                label: label(position + 1, ranking.score),
                valid: limits.map(|limits| is_valid(path.points(), limits)),
                metrics: evaluate(path.points(), expected_end),
                waypoints: path.clone(),
            }
        })
        .collect()
}
