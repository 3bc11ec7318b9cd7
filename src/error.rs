//! Error types for the diagnosis pipeline.
//! One enum, `thiserror` only; every failure is reported at the request boundary.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A form field could not be parsed or is out of range. The request is
    /// aborted before prediction.
    #[error("invalid value for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Model inference failed or returned a non-finite value.
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// The feature vector cannot be aligned with the model schema.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MonitorError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        MonitorError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used in logs and JSON error lines.
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorError::Validation { .. } => "validation",
            MonitorError::Prediction(_) => "prediction",
            MonitorError::SchemaMismatch(_) => "schema_mismatch",
            MonitorError::ModelLoad { .. } => "model_load",
            MonitorError::Config(_) => "config",
        }
    }
}
