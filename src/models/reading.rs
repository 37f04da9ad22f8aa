use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored sensor observation. Concentrations are µg/m³ except co2
/// (ppm); humidity is %, temperature °C.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub id: String,
    pub pm25: f64,
    pub pm10: f64,
    pub co2: f64,
    pub no2: f64,
    pub so2: f64,
    pub humidity: f64,
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
}

/// Input shape for creating a reading; the store assigns the id.
/// Upstream feeds sometimes omit individual pollutant fields, so every
/// numeric field defaults to 0.0 on ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingCreate {
    #[serde(default)]
    pub pm25: f64,
    #[serde(default)]
    pub pm10: f64,
    #[serde(default)]
    pub co2: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
}
