//! HTTP API for the trajectory generation service.

pub mod request_id;
mod routes;

pub use routes::ApiError;

use crate::state::AppState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}

/// Router with state and the standard middleware stack applied.
pub fn app(state: Arc<AppState>) -> Router {
    routes()
        .with_state(state)
        .layer(middleware::from_fn(request_id::ensure_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
