use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure taxonomy for the serving path. Every handler resolves to a
/// typed success payload or one of these; nothing is swallowed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A requested entity does not exist. Unknown and malformed ids
    /// both land here.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The store holds no readings yet.
    #[error("No air quality data available")]
    NoData,

    /// Malformed or out-of-range request input, rejected before any
    /// side effect.
    #[error("{0}")]
    Validation(String),

    /// Paired actual/predicted sequences of differing length.
    #[error(
        "actual and predicted value lists must have the same length \
         (actual {actual}, predicted {predicted})"
    )]
    LengthMismatch { actual: usize, predicted: usize },

    /// The serialized regressor is absent from disk.
    #[error("model file not found at {path}; train and export the model first")]
    ModelNotFound { path: String },

    /// Neither the precomputed artifact nor the raw comparison dataset
    /// is on disk.
    #[error("{0} not found; run the offline evaluation pipeline first")]
    ArtifactsMissing(&'static str),

    /// Store or dependency failure, surfaced as an internal error.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    /// Machine-distinguishable error kind carried in the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::NoData => "no_data",
            ApiError::Validation(_) => "validation",
            ApiError::LengthMismatch { .. } => "length_mismatch",
            ApiError::ModelNotFound { .. } => "model_not_found",
            ApiError::ArtifactsMissing(_) => "artifacts_missing",
            ApiError::Upstream(_) => "upstream",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::NoData | ApiError::ArtifactsMissing(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Validation(_) | ApiError::LengthMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::ModelNotFound { .. } | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self:#}");
        }

        let body = ErrorBody {
            error: self.kind(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
