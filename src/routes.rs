use crate::error::AppError;
use crate::infra::{deserialize_weights, AppState};
use crate::workflows::advisor::{
    AdvisorError, Criterion, RankedEntryView, RankingInsights, RankingView, RecommendationView,
    RepairSummary, ScoreMatrixView, WeightVector,
};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateScoresRequest {
    pub(crate) use_case: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateScoresResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) matrix: ScoreMatrixView,
    pub(crate) repairs: RepairSummary,
    pub(crate) raw_response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankingRequest {
    #[serde(default, deserialize_with = "deserialize_weights")]
    pub(crate) weights: Option<Vec<(Criterion, u32)>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) rankings: Vec<RankedEntryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) recommendation: Option<RecommendationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) insights: Option<RankingInsights>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/advisor/scores", post(generate_scores_endpoint))
        .route("/api/v1/advisor/ranking", post(ranking_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.is_ready();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.render_metrics(),
    )
}

/// Runs one full generation: prompt, model call, normalization. The model
/// call blocks, so it runs off the async worker threads. On success the new
/// snapshot replaces the previous one; any failure leaves it untouched.
pub(crate) async fn generate_scores_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<GenerateScoresRequest>,
) -> Result<Json<GenerateScoresResponse>, AppError> {
    let advisor = state.advisor();
    let snapshot =
        tokio::task::spawn_blocking(move || advisor.generate_scores(&payload.use_case)).await??;

    let response = GenerateScoresResponse {
        generated_at: snapshot.generated_at,
        matrix: ScoreMatrixView::from_table(&snapshot.table),
        repairs: snapshot.repairs,
        raw_response: snapshot.raw_response.clone(),
    };
    state.store_snapshot(snapshot);

    Ok(Json(response))
}

pub(crate) async fn ranking_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RankingRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    let snapshot = state.latest_snapshot().ok_or(AdvisorError::NoScores)?;

    let weights = match payload.weights {
        Some(entries) => WeightVector::from_entries(entries),
        None => WeightVector::neutral(),
    };

    let (result, insights) = snapshot.rank(&weights)?;
    let view = RankingView::from_result(&result);

    Ok(Json(RankingResponse {
        generated_at: snapshot.generated_at,
        rankings: view.rankings,
        recommendation: view.recommendation,
        insights,
    }))
}
