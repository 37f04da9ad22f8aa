use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{FeatureVector, Forecast};
use crate::predict::{artifacts::ComparisonBatch, forecast};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_pm25: f64,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResponse {
    pub r2_score: f64,
    pub mse: f64,
    pub rmse: f64,
    pub model_used: String,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct BatchParams {
    #[serde(default = "default_batch_limit")]
    limit: usize,
}

fn default_batch_limit() -> usize {
    100
}

/// POST /predict/pm25 — one-step prediction from caller-supplied inputs.
pub async fn predict_pm25(
    State(state): State<Arc<AppState>>,
    Json(features): Json<FeatureVector>,
) -> ApiResult<Json<PredictionResponse>> {
    let predicted_pm25 = forecast::predict_next(&state.model, &features).await?;
    Ok(Json(PredictionResponse { predicted_pm25 }))
}

/// GET /predict/latest — forecast from the most recent stored reading.
pub async fn predict_latest(State(state): State<Arc<AppState>>) -> ApiResult<Json<Forecast>> {
    let forecast = forecast::predict_latest(&state.db, &state.model).await?;
    Ok(Json(forecast))
}

/// GET /predict/batch — historical actual vs predicted pairs.
pub async fn batch(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BatchParams>,
) -> ApiResult<Json<ComparisonBatch>> {
    if !(1..=1000).contains(&params.limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and 1000, got {}",
            params.limit
        )));
    }

    let store = state.artifacts.clone();
    let batch = tokio::task::spawn_blocking(move || store.resolve_comparison(params.limit))
        .await
        .context("comparison resolution task failed")??;
    Ok(Json(batch))
}

/// GET /predict/accuracy — retrospective metrics plus the model kind.
pub async fn accuracy(State(state): State<Arc<AppState>>) -> ApiResult<Json<AccuracyResponse>> {
    let store = state.artifacts.clone();
    let metrics = tokio::task::spawn_blocking(move || store.resolve_accuracy())
        .await
        .context("accuracy resolution task failed")??;

    let info = state.model.model_info().await?;

    Ok(Json(AccuracyResponse {
        r2_score: metrics.r2_score,
        mse: metrics.mse,
        rmse: metrics.rmse,
        model_used: info.model_type,
    }))
}

/// GET /predict/heatmap — 10×10 percentage-error grid.
pub async fn heatmap(State(state): State<Arc<AppState>>) -> ApiResult<Json<HeatmapResponse>> {
    let store = state.artifacts.clone();
    let matrix = tokio::task::spawn_blocking(move || store.resolve_heatmap())
        .await
        .context("heatmap resolution task failed")??;
    Ok(Json(HeatmapResponse { matrix }))
}
