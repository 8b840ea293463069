pub mod error;
pub mod generator;
pub mod latent;
pub mod metrics;
pub mod model;
pub mod models;
pub mod normalize;
pub mod ranking;
pub mod requests;
pub mod rules;
pub mod safety;

pub use error::{ModelError, Result, TrajgenError};
pub use generator::{GeneratorConfig, PathGenerator};
pub use latent::{LatentSampler, LatentVector};
pub use metrics::{diversity, evaluate, is_valid, summarize, BatchSummary, Spread};
pub use model::{InterpolatingModel, ModelInput, ModelOutput, TrajectoryModel};
pub use models::{Metrics, Path, Point, Ranking};
pub use normalize::{NormalizationParams, Normalizer};
pub use ranking::{rank, rankings, score, select_top, RankedSelection, RankingWeights};
pub use rules::ValidityLimits;
pub use safety::{clearance_score, rank_by_clearance, Obstacle};
pub use requests::{
    build_candidates, CandidatePath, GenerateRequest, GenerateResponse, HealthResponse, ModelInfo,
};
