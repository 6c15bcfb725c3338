//! Web server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Start the API server.
pub async fn start_server(
    port: u16,
    data_dir: PathBuf,
    default_threshold: Option<f64>,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(data_dir, default_threshold));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/suites", get(handlers::api_list_suites))
        .route("/api/benchmarks/:suite", get(handlers::api_get_snapshot))
        .route("/api/benchmarks/:suite/run", post(handlers::api_run_suite))
        .route("/api/score", post(handlers::api_score_prompt))
        .route("/api/runs", get(handlers::api_list_runs))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting API server on http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
