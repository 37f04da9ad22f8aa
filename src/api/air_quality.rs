use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{Reading, ReadingCreate};
use crate::stats::{self, Summary};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    skip: u32,
    #[serde(default = "default_list_limit")]
    limit: u32,
}

fn default_list_limit() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_recent_limit")]
    limit: i64,
}

fn default_recent_limit() -> i64 {
    50
}

/// GET /air-quality — paginated readings in insertion order.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Reading>>> {
    let readings = state
        .db
        .list_readings(i64::from(params.skip), i64::from(params.limit))
        .await?;
    Ok(Json(readings))
}

/// GET /air-quality/recent — newest readings first. The documented
/// limit range is [1, 1000]; out-of-range values are rejected rather
/// than clamped.
pub async fn recent(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Json<Vec<Reading>>> {
    if !(1..=1000).contains(&params.limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and 1000, got {}",
            params.limit
        )));
    }

    let readings = state.db.recent_readings(params.limit).await?;
    Ok(Json(readings))
}

/// GET /air-quality/{id}
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Reading>> {
    let reading = state
        .db
        .get_reading(&id)
        .await?
        .ok_or(ApiError::NotFound("air quality item"))?;
    Ok(Json(reading))
}

/// POST /air-quality — store a reading, returning it with its assigned id.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReadingCreate>,
) -> ApiResult<Json<Reading>> {
    let reading = state.db.insert_reading(body).await?;
    Ok(Json(reading))
}

/// GET /air-quality/stats/summary
pub async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<Summary>> {
    let aggregate = state.db.aggregate_readings().await?;
    Ok(Json(stats::summarize(aggregate)))
}
