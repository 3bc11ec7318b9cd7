//! ONNX Runtime inference for tool wear. Input: [1, n_features] f32, Output: wear (mm).
//! Column names and importances are not recoverable from the graph, so they come
//! from a JSON sidecar written next to the exported model.

use super::{check_columns, WearModel};
use crate::error::{MonitorError, Result};
use crate::features::{FeatureSchema, FeatureVector};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub feature_names: FeatureSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<Vec<f32>>,
}

impl ModelMetadata {
    pub fn load(path: &Path) -> Result<Self> {
        let load_err = |reason: String| MonitorError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        serde_json::from_str(&data).map_err(|e| load_err(e.to_string()))
    }
}

pub struct OnnxWearModel {
    session: Mutex<Session>,
    output_name: String,
    metadata: ModelMetadata,
}

impl OnnxWearModel {
    pub fn load(path: &Path, metadata_path: &Path) -> Result<Self> {
        let load_err = |reason: String| MonitorError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };
        if !path.exists() {
            return Err(load_err("file not found".into()));
        }
        let metadata = ModelMetadata::load(metadata_path)?;

        let session = Session::builder()
            .map_err(|e| load_err(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_err(format!("optimization level: {e}")))?
            .commit_from_file(path)
            .map_err(|e| load_err(e.to_string()))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| load_err("model declares no outputs".into()))?;

        tracing::info!(
            path = %path.display(),
            features = metadata.feature_names.len(),
            importances = metadata.feature_importances.is_some(),
            "ONNX wear model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            metadata,
        })
    }
}

impl WearModel for OnnxWearModel {
    fn schema(&self) -> &FeatureSchema {
        &self.metadata.feature_names
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        check_columns(self.schema(), features)?;

        // ONNX Runtime takes f32 input, so integers above 2^24 lose precision here.
        let row: Vec<f32> = features.values.iter().map(|v| *v as f32).collect();
        let arr = Array2::from_shape_vec((1, features.len()), row)
            .map_err(|e| MonitorError::Prediction(format!("input shape: {e}")))?;
        let input = Value::from_array(arr)
            .map_err(|e| MonitorError::Prediction(format!("input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| MonitorError::Prediction("session lock poisoned".into()))?;
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| MonitorError::Prediction(e.to_string()))?;
        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| MonitorError::Prediction(format!("missing output {}", self.output_name)))?;
        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| MonitorError::Prediction(format!("output tensor: {e}")))?;

        let raw = data
            .first()
            .copied()
            .ok_or_else(|| MonitorError::Prediction("empty output tensor".into()))?;
        Ok(f64::from(raw))
    }

    fn feature_importances(&self) -> Option<&[f32]> {
        self.metadata.feature_importances.as_deref()
    }
}
