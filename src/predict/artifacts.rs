//! Read-only resolution between precomputed evaluation artifacts and
//! on-demand recomputation from the raw comparison dataset.
//!
//! Per metric the order is: artifact file, then raw dataset, then
//! `ArtifactsMissing`. Each probe is an explicit present/absent check;
//! nothing is ever written back.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{AccuracyMetrics, ComparisonSample};
use crate::predict::evaluation;

const ACCURACY_ARTIFACT: &str = "accuracy.json";
const HEATMAP_ARTIFACT: &str = "heatmap.json";
const BATCH_ARTIFACT: &str = "actual_vs_predicted.json";
const RAW_COMPARISON: &str = "comparison_data.json";

/// Precomputed heatmap artifact: a flat percentage-error sequence.
#[derive(Deserialize)]
struct HeatmapArtifact {
    percentage_error: Vec<f64>,
}

/// The comparison dataset appears on disk in two shapes, depending on
/// which pipeline run produced it: one record per sample, or columnar.
#[derive(Deserialize)]
#[serde(untagged)]
enum ComparisonFile {
    Samples(Vec<ComparisonSample>),
    Columns {
        actual: Vec<f64>,
        predicted: Vec<f64>,
    },
}

impl ComparisonFile {
    fn into_columns(self) -> (Vec<f64>, Vec<f64>) {
        match self {
            ComparisonFile::Samples(samples) => samples
                .into_iter()
                .map(|sample| (sample.actual, sample.predicted))
                .unzip(),
            ComparisonFile::Columns { actual, predicted } => (actual, predicted),
        }
    }
}

/// Batch of historical actual/predicted pairs. The dataset rows carry no
/// timestamps, so these are stamped at serve time.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonBatch {
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    pub timestamps: Vec<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
    data_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(artifacts_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            artifacts_dir,
            data_dir,
        }
    }

    fn read_if_present<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ApiError> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        Ok(Some(value))
    }

    /// Raw dataset columns, used when a per-metric artifact is absent.
    fn raw_columns(&self) -> Result<Option<(Vec<f64>, Vec<f64>)>, ApiError> {
        let path = self.data_dir.join(RAW_COMPARISON);
        match Self::read_if_present::<ComparisonFile>(&path)? {
            Some(file) => {
                debug!("Recomputing from raw dataset {}", path.display());
                Ok(Some(file.into_columns()))
            }
            None => Ok(None),
        }
    }

    pub fn resolve_accuracy(&self) -> Result<AccuracyMetrics, ApiError> {
        let artifact = self.artifacts_dir.join(ACCURACY_ARTIFACT);
        if let Some(metrics) = Self::read_if_present::<AccuracyMetrics>(&artifact)? {
            return Ok(metrics);
        }

        let (actual, predicted) = self
            .raw_columns()?
            .ok_or(ApiError::ArtifactsMissing("accuracy data"))?;
        evaluation::accuracy_metrics(&actual, &predicted)
    }

    pub fn resolve_heatmap(&self) -> Result<Vec<Vec<f64>>, ApiError> {
        let artifact = self.artifacts_dir.join(HEATMAP_ARTIFACT);
        let errors = match Self::read_if_present::<HeatmapArtifact>(&artifact)? {
            Some(heatmap) => heatmap.percentage_error,
            None => {
                let (actual, predicted) = self
                    .raw_columns()?
                    .ok_or(ApiError::ArtifactsMissing("heatmap data"))?;
                evaluation::percentage_errors(&actual, &predicted)?
            }
        };

        Ok(evaluation::build_error_matrix(&errors))
    }

    pub fn resolve_comparison(&self, limit: usize) -> Result<ComparisonBatch, ApiError> {
        let artifact = self.artifacts_dir.join(BATCH_ARTIFACT);
        let file = match Self::read_if_present::<ComparisonFile>(&artifact)? {
            Some(file) => Some(file),
            None => {
                let raw = self.data_dir.join(RAW_COMPARISON);
                Self::read_if_present::<ComparisonFile>(&raw)?
            }
        };

        let (mut actual, mut predicted) = file
            .ok_or(ApiError::ArtifactsMissing("comparison data"))?
            .into_columns();
        actual.truncate(limit);
        predicted.truncate(limit);

        let now = Utc::now();
        let timestamps = vec![now; actual.len()];

        Ok(ComparisonBatch {
            actual,
            predicted,
            timestamps,
        })
    }
}
