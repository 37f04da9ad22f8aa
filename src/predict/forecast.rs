use chrono::Utc;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::{AirQualityLabel, FeatureVector, Forecast};
use crate::predict::gateway::ModelGateway;

/// One-step PM2.5 prediction from a feature vector. The raw model output
/// is returned unclamped; implausible values are the caller's signal
/// that the model needs retraining.
pub async fn predict_next(
    gateway: &ModelGateway,
    features: &FeatureVector,
) -> Result<f64, ApiError> {
    gateway.predict(features).await
}

/// Forecast from the single most recent stored reading.
pub async fn predict_latest(db: &Database, gateway: &ModelGateway) -> Result<Forecast, ApiError> {
    let mut recent = db.recent_readings(1).await?;
    let latest = recent.pop().ok_or(ApiError::NoData)?;

    let features = FeatureVector::from(&latest);
    let predicted = gateway.predict(&features).await?;

    Ok(Forecast {
        predicted_pm25: predicted,
        air_quality_label: AirQualityLabel::classify(predicted),
        timestamp: Utc::now(),
    })
}
