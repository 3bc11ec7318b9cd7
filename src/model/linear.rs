//! Linear wear regressor from a JSON coefficient file.
//!
//! ```json
//! { "intercept": 0.05, "coefficients": [ { "feature": "DOC", "weight": 0.12 }, ... ] }
//! ```
//!
//! Column order follows the coefficient list.

use super::{check_columns, WearModel};
use crate::error::{MonitorError, Result};
use crate::features::{FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    pub feature: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearFile {
    intercept: f64,
    coefficients: Vec<Coefficient>,
}

#[derive(Debug, Clone)]
pub struct LinearWearModel {
    intercept: f64,
    weights: Vec<f64>,
    schema: FeatureSchema,
    importances: Vec<f32>,
}

impl LinearWearModel {
    pub fn new(intercept: f64, coefficients: Vec<Coefficient>) -> Result<Self> {
        let (names, weights): (Vec<String>, Vec<f64>) = coefficients
            .into_iter()
            .map(|c| (c.feature, c.weight))
            .unzip();
        let schema = FeatureSchema::new(names)?;

        // Normalized absolute weights, summing to 1 unless every weight is 0.
        let total: f64 = weights.iter().map(|w| w.abs()).sum();
        let importances = weights
            .iter()
            .map(|w| if total > 0.0 { (w.abs() / total) as f32 } else { 0.0 })
            .collect();

        Ok(Self {
            intercept,
            weights,
            schema,
            importances,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let load_err = |reason: String| MonitorError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let file: LinearFile = serde_json::from_str(&data).map_err(|e| load_err(e.to_string()))?;
        let model = Self::new(file.intercept, file.coefficients)?;
        tracing::info!(path = %path.display(), features = model.schema.len(), "linear wear model loaded");
        Ok(model)
    }
}

impl WearModel for LinearWearModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        check_columns(&self.schema, features)?;
        Ok(self.intercept
            + self
                .weights
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>())
    }

    fn feature_importances(&self) -> Option<&[f32]> {
        Some(&self.importances)
    }
}
