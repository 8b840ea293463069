//! REST API routes.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

use crate::api::request_id::RequestId;
use crate::state::AppState;
use trajgen_core::{
    build_candidates, rank_by_clearance, rankings, summarize, GenerateRequest, GenerateResponse,
    HealthResponse, ModelInfo, Point, TrajgenError,
};

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/model", get(model_info))
        .route("/v1/generate", post(generate))
        .route("/v1/generate/obstacles", post(generate_with_obstacles))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Generation(#[from] TrajgenError),
    #[error("generation task failed: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(err) => match err {
                TrajgenError::InvalidParameters(_)
                | TrajgenError::InvalidDimension(_)
                | TrajgenError::InvalidCount(_) => StatusCode::BAD_REQUEST,
                TrajgenError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
                TrajgenError::ModelInvocation(_) => StatusCode::BAD_GATEWAY,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let ready = state.is_ready();
    Json(HealthResponse {
        status: if ready { "healthy" } else { "degraded" }.to_string(),
        model_loaded: ready,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn model_info(State(state): State<Arc<AppState>>) -> Json<ModelInfo> {
    Json(state.model_info().clone())
}

#[derive(Debug, Clone, Copy)]
enum RankBy {
    Quality,
    Clearance,
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    validate_request(&request, state.config().max_samples)?;
    run_generation(state, request_id, request, RankBy::Quality).await.map(Json)
}

/// Without obstacles this behaves exactly like `/v1/generate`.
async fn generate_with_obstacles(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    validate_request(&request, state.config().max_samples)?;
    if request.obstacles.is_empty() {
        return run_generation(state, request_id, request, RankBy::Quality)
            .await
            .map(Json);
    }
    for (idx, obstacle) in request.obstacles.iter().enumerate() {
        if !obstacle.center.is_finite() || !obstacle.radius.is_finite() || obstacle.radius < 0.0 {
            return Err(ApiError::BadRequest(format!(
                "obstacle {} must have a finite center and a non-negative radius",
                idx
            )));
        }
    }
    run_generation(state, request_id, request, RankBy::Clearance)
        .await
        .map(Json)
}

fn validate_request(request: &GenerateRequest, max_samples: usize) -> Result<(), ApiError> {
    if request.n_samples == 0 || request.n_samples > max_samples {
        return Err(ApiError::BadRequest(format!(
            "n_samples must be between 1 and {} (got {})",
            max_samples, request.n_samples
        )));
    }
    if request.top_k == Some(0) {
        return Err(ApiError::BadRequest("top_k must be positive".to_string()));
    }
    require_finite("start", &request.start)?;
    require_finite("end", &request.end)?;
    Ok(())
}

fn require_finite(field: &str, point: &Point) -> Result<(), ApiError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("{} must have finite coordinates", field)))
    }
}

async fn run_generation(
    state: Arc<AppState>,
    request_id: RequestId,
    request: GenerateRequest,
    rank_by: RankBy,
) -> Result<GenerateResponse, ApiError> {
    // Inference may block on a remote backend. The blocking thread does not inherit the
    // request span, so it gets its own.
    let span = tracing::info_span!("generate", request_id = %request_id);
    let task = tokio::task::spawn_blocking(move || {
        span.in_scope(|| generate_and_rank(&state, request, rank_by))
    });
    let response = task
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))??;
    Ok(response)
}

fn generate_and_rank(
    state: &AppState,
    request: GenerateRequest,
    rank_by: RankBy,
) -> Result<GenerateResponse, TrajgenError> {
    let started = Instant::now();
    let paths = state
        .generator()
        .generate_multiple(request.start, request.end, request.n_samples)?;
    let inference_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let ranked = match rank_by {
        RankBy::Quality => {
            rankings(&paths, &request.end, &request.weights.unwrap_or_default())
        }
        RankBy::Clearance => rank_by_clearance(&paths, &request.obstacles),
    };
    let candidates = build_candidates(
        &paths,
        &ranked,
        request.top_k,
        &request.end,
        request.limits.as_ref(),
    );
    let summary = summarize(&paths, &request.end, None);

    tracing::info!(
        n_samples = paths.len(),
        returned = candidates.len(),
        rank_by = ?rank_by,
        inference_time_ms,
        "generated candidate paths"
    );

    Ok(GenerateResponse {
        success: true,
        start: request.start,
        end: request.end,
        n_samples: paths.len(),
        candidates,
        summary,
        inference_time_ms,
        generated_at: Utc::now(),
    })
}
