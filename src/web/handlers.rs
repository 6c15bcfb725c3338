//! HTTP handlers for the web API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::state::AppState;
use crate::scoring::{score_prompt, QualityScore};
use crate::sim::RunPayload;
use crate::storage::{RunRecord, SnapshotRecord, StorageError};

/// Query parameters for triggering a run
#[derive(Debug, Deserialize)]
pub struct RunQuery {
    /// Pass/fail threshold recorded on the payload
    pub threshold: Option<f64>,
}

/// Query parameters for listing run records
#[derive(Debug, Deserialize)]
pub struct ListRunsQuery {
    /// Limit number of records
    pub limit: Option<usize>,
}

/// Request body for prompt scoring
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub prompt: String,
}

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// One suite in the catalog listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteSummary {
    pub id: String,
    pub label: String,
    pub benchmark_count: usize,
}

/// Response for the suites listing
#[derive(Debug, Serialize)]
pub struct SuiteListResponse {
    pub suites: Vec<SuiteSummary>,
}

/// Response for run-record history
#[derive(Debug, Serialize)]
pub struct RunListResponse {
    pub runs: Vec<RunRecord>,
    pub total: usize,
}

/// Body returned for storage failures
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn storage_error(err: StorageError) -> (StatusCode, Json<ErrorBody>) {
    tracing::error!("Storage failure: {:#}", anyhow::Error::from(err));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "storage failure".to_string(),
        }),
    )
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// List the suite catalog
pub async fn api_list_suites(State(state): State<Arc<AppState>>) -> Json<SuiteListResponse> {
    let mut suites: Vec<SuiteSummary> = state
        .catalog
        .suite_ids()
        .into_iter()
        .map(|id| SuiteSummary {
            id: id.to_string(),
            label: state.catalog.label(id),
            benchmark_count: state.catalog.templates_for(id).len(),
        })
        .collect();
    suites.push(SuiteSummary {
        id: "all".to_string(),
        label: state.catalog.label("all"),
        benchmark_count: state.catalog.templates_for("all").len(),
    });
    Json(SuiteListResponse { suites })
}

/// Current snapshot for a suite; generates one on first access.
///
/// Unknown suites yield an empty-but-valid snapshot, never an error.
pub async fn api_get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(suite): Path<String>,
) -> Result<Json<SnapshotRecord>, (StatusCode, Json<ErrorBody>)> {
    state
        .snapshot(&suite)
        .await
        .map(Json)
        .map_err(storage_error)
}

/// Run a fresh simulation for a suite and persist it.
pub async fn api_run_suite(
    State(state): State<Arc<AppState>>,
    Path(suite): Path<String>,
    Query(query): Query<RunQuery>,
) -> Result<Json<RunPayload>, (StatusCode, Json<ErrorBody>)> {
    state
        .run_suite(&suite, query.threshold)
        .await
        .map(Json)
        .map_err(storage_error)
}

/// Score an arbitrary prompt string.
pub async fn api_score_prompt(Json(request): Json<ScoreRequest>) -> Json<QualityScore> {
    Json(score_prompt(&request.prompt))
}

/// Run-record history, newest first.
pub async fn api_list_runs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRunsQuery>,
) -> Result<Json<RunListResponse>, (StatusCode, Json<ErrorBody>)> {
    let mut runs = state.runs().await.map_err(storage_error)?;
    let total = runs.len();
    if let Some(limit) = query.limit {
        runs.truncate(limit);
    }
    Ok(Json(RunListResponse { runs, total }))
}
