//! Trajectory generation server.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trajgen_server::{api, config::Config, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("trajgen_server=debug".parse()?)
            .add_directive("trajgen_core=info".parse()?))
        .init();

    tracing::info!("Starting trajectory generation server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(
        latent_dim = config.latent_dim,
        seq_len = config.seq_len,
        max_samples = config.max_samples,
        "generator configuration"
    );

    // The remote backend owns a blocking HTTP client, which must be built and dropped
    // off the async workers.
    let state = tokio::task::spawn_blocking(move || AppState::from_config(config)).await??;
    let state = Arc::new(state);

    let app = api::app(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    tokio::task::spawn_blocking(move || drop(state)).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
