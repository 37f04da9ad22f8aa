use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::error::ApiError;
use crate::models::{FeatureVector, FEATURE_DIM};

/// A trained regressor. Implementations are read-only once constructed,
/// so predictions may run concurrently against a shared handle.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Concrete model kind, for display in accuracy reports.
    fn kind(&self) -> &str;
}

/// Linear model exported by the offline training pipeline as JSON:
/// an intercept plus one coefficient per feature column.
#[derive(Debug, Deserialize)]
pub struct LinearRegressor {
    model_type: String,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model file {}", path.display()))?;
        let model: LinearRegressor = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse model file {}", path.display()))?;

        if model.coefficients.len() != FEATURE_DIM {
            bail!(
                "model file {} has {} coefficients, expected {}",
                path.display(),
                model.coefficients.len(),
                FEATURE_DIM
            );
        }

        Ok(model)
    }
}

impl Predictor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let inputs = features.as_array();
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(inputs.iter())
                .map(|(coef, x)| coef * x)
                .sum::<f64>()
    }

    fn kind(&self) -> &str {
        &self.model_type
    }
}

/// Introspection payload for accuracy reports.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub model_path: String,
    pub loaded: bool,
}

/// Lazily loads the serialized regressor on first use and caches the
/// handle for the process lifetime. The load runs at most once even
/// under concurrent first access; there is no reload.
#[derive(Clone)]
pub struct ModelGateway {
    model_path: Arc<PathBuf>,
    model: Arc<OnceCell<Arc<dyn Predictor>>>,
}

impl ModelGateway {
    pub fn new(model_path: PathBuf) -> Self {
        Self {
            model_path: Arc::new(model_path),
            model: Arc::new(OnceCell::new()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    async fn load(&self) -> Result<&Arc<dyn Predictor>, ApiError> {
        self.model
            .get_or_try_init(|| async {
                if !self.model_path.exists() {
                    return Err(ApiError::ModelNotFound {
                        path: self.model_path.display().to_string(),
                    });
                }

                let model = LinearRegressor::from_file(&self.model_path)?;
                info!(
                    "Model ({}) loaded from {}",
                    model.kind(),
                    self.model_path.display()
                );
                Ok(Arc::new(model) as Arc<dyn Predictor>)
            })
            .await
    }

    pub async fn predict(&self, features: &FeatureVector) -> Result<f64, ApiError> {
        let model = self.load().await?;
        Ok(model.predict(features))
    }

    pub async fn model_info(&self) -> Result<ModelInfo, ApiError> {
        let model = self.load().await?;
        Ok(ModelInfo {
            model_type: model.kind().to_string(),
            model_path: self.model_path.display().to_string(),
            loaded: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn write_model(path: &Path, json: &str) {
        std::fs::write(path, json).unwrap();
    }

    fn temp_model_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("airaware-model-{tag}-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn linear_regressor_applies_intercept_and_coefficients() {
        let path = temp_model_path("linear");
        write_model(
            &path,
            r#"{
                "model_type": "LinearRegression",
                "intercept": 1.5,
                "coefficients": [1.0, 0.5, 0.0, 0.0, 0.0, 2.0, 0.0]
            }"#,
        );

        let model = LinearRegressor::from_file(&path).unwrap();
        let features = FeatureVector {
            pm25: 10.0,
            pm10: 4.0,
            co2: 400.0,
            no2: 9.0,
            so2: 3.0,
            temperature: 2.0,
            humidity: 50.0,
        };

        // 1.5 + 10*1.0 + 4*0.5 + 2*2.0
        assert_relative_eq!(model.predict(&features), 17.5, epsilon = 1e-10);
        assert_eq!(model.kind(), "LinearRegression");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        let path = temp_model_path("short");
        write_model(
            &path,
            r#"{"model_type": "LinearRegression", "intercept": 0.0, "coefficients": [1.0, 2.0]}"#,
        );

        assert!(LinearRegressor::from_file(&path).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn missing_model_file_is_a_distinct_error() {
        let gateway = ModelGateway::new(temp_model_path("absent"));
        let features = FeatureVector {
            pm25: 0.0,
            pm10: 0.0,
            co2: 0.0,
            no2: 0.0,
            so2: 0.0,
            temperature: 0.0,
            humidity: 0.0,
        };

        let err = gateway.predict(&features).await.unwrap_err();
        assert!(matches!(err, ApiError::ModelNotFound { .. }));
        assert!(!gateway.is_loaded());
    }

    #[tokio::test]
    async fn gateway_loads_once_and_caches() {
        let path = temp_model_path("cached");
        write_model(
            &path,
            r#"{
                "model_type": "LinearRegression",
                "intercept": 0.0,
                "coefficients": [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            }"#,
        );

        let gateway = ModelGateway::new(path.clone());
        let features = FeatureVector {
            pm25: 42.0,
            pm10: 0.0,
            co2: 0.0,
            no2: 0.0,
            so2: 0.0,
            temperature: 0.0,
            humidity: 0.0,
        };

        assert!(!gateway.is_loaded());
        assert_relative_eq!(gateway.predict(&features).await.unwrap(), 42.0);
        assert!(gateway.is_loaded());

        // Removing the file no longer matters once the handle is cached.
        std::fs::remove_file(&path).ok();
        assert_relative_eq!(gateway.predict(&features).await.unwrap(), 42.0);

        let info = gateway.model_info().await.unwrap();
        assert_eq!(info.model_type, "LinearRegression");
        assert!(info.loaded);
    }
}
