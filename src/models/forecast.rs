use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Reading;

/// Number of inputs the regressor was trained on.
pub const FEATURE_DIM: usize = 7;

/// Regressor input derived from a reading.
///
/// `as_array` yields the exact column order used at training time. The
/// model carries no feature names, so changing this order silently
/// changes every prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureVector {
    pub pm25: f64,
    pub pm10: f64,
    pub co2: f64,
    pub no2: f64,
    pub so2: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl FeatureVector {
    /// Training column order: pm25, pm10, co2, no2, so2, temperature,
    /// humidity.
    pub fn as_array(&self) -> [f64; FEATURE_DIM] {
        [
            self.pm25,
            self.pm10,
            self.co2,
            self.no2,
            self.so2,
            self.temperature,
            self.humidity,
        ]
    }
}

impl From<&Reading> for FeatureVector {
    fn from(reading: &Reading) -> Self {
        Self {
            pm25: reading.pm25,
            pm10: reading.pm10,
            co2: reading.co2,
            no2: reading.no2,
            so2: reading.so2,
            temperature: reading.temperature,
            humidity: reading.humidity,
        }
    }
}

/// Dashboard air quality category for a PM2.5 concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirQualityLabel {
    Good,
    Moderate,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AirQualityLabel {
    /// Bucket a predicted PM2.5 value (µg/m³).
    ///
    /// The 35–55 and 55–150 bands both carry the Unhealthy label; the
    /// dashboard legend only distinguishes five categories.
    pub fn classify(pm25: f64) -> Self {
        if pm25 <= 12.0 {
            AirQualityLabel::Good
        } else if pm25 <= 35.0 {
            AirQualityLabel::Moderate
        } else if pm25 <= 55.0 {
            AirQualityLabel::Unhealthy
        } else if pm25 <= 150.0 {
            AirQualityLabel::Unhealthy
        } else if pm25 <= 250.0 {
            AirQualityLabel::VeryUnhealthy
        } else {
            AirQualityLabel::Hazardous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AirQualityLabel::Good => "Good",
            AirQualityLabel::Moderate => "Moderate",
            AirQualityLabel::Unhealthy => "Unhealthy",
            AirQualityLabel::VeryUnhealthy => "Very Unhealthy",
            AirQualityLabel::Hazardous => "Hazardous",
        }
    }
}

/// A single-step PM2.5 forecast. Computed on demand, never persisted;
/// `timestamp` is the generation time, not the source reading's.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub predicted_pm25: f64,
    pub air_quality_label: AirQualityLabel,
    pub timestamp: DateTime<Utc>,
}
