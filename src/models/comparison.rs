use serde::{Deserialize, Serialize};

/// One actual/predicted pair from the offline evaluation run. Written in
/// bulk by the training pipeline and read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSample {
    #[serde(default)]
    pub index: i64,
    pub actual: f64,
    pub predicted: f64,
    #[serde(default)]
    pub percentage_error: f64,
}

/// Retrospective accuracy of the trained regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    pub r2_score: f64,
    pub mse: f64,
    pub rmse: f64,
}
