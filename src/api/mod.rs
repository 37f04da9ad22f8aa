mod air_quality;
mod prediction;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let v1 = Router::new()
        .route(
            "/air-quality",
            get(air_quality::list).post(air_quality::create),
        )
        .route("/air-quality/recent", get(air_quality::recent))
        .route("/air-quality/stats/summary", get(air_quality::summary))
        .route("/air-quality/{id}", get(air_quality::get_by_id))
        .route("/predict/pm25", post(prediction::predict_pm25))
        .route("/predict/latest", get(prediction::predict_latest))
        .route("/predict/batch", get(prediction::batch))
        .route("/predict/accuracy", get(prediction::accuracy))
        .route("/predict/heatmap", get(prediction::heatmap))
        .route("/health", get(health));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to AirAware API" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "AirAware backend running" }))
}
