//! Pretrained wear regressors and the predictor built on them.
//!
//! - [`WearModel`] — the capability every backend provides
//! - [`OnnxWearModel`] — exported pipeline run through ONNX Runtime
//! - [`LinearWearModel`] — JSON coefficients, no native runtime needed

mod importance;
mod linear;
mod onnx;
mod predictor;

pub use importance::{rank_importances, FeatureImportance};
pub use linear::{Coefficient, LinearWearModel};
pub use onnx::{ModelMetadata, OnnxWearModel};
pub use predictor::{predict_wear, WearEstimate};

use crate::config::{ModelConfig, ModelKind};
use crate::error::{MonitorError, Result};
use crate::features::{FeatureSchema, FeatureVector};

/// A fitted regressor mapping one schema-aligned row to a wear value (mm).
pub trait WearModel {
    /// Input columns, in the order the model expects them
    fn schema(&self) -> &FeatureSchema;

    /// Raw, unclamped prediction for a single row
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// Per-column importances aligned with [`WearModel::schema`], if the model exposes them
    fn feature_importances(&self) -> Option<&[f32]> {
        None
    }

    fn feature_names(&self) -> &[String] {
        self.schema().columns()
    }
}

/// Rows built against a different schema are a deployment error, not a bad reading.
pub(crate) fn check_columns(schema: &FeatureSchema, features: &FeatureVector) -> Result<()> {
    if features.columns.as_slice() != schema.columns() || features.values.len() != schema.len() {
        return Err(MonitorError::SchemaMismatch(format!(
            "row has {} columns, model expects {} in declared order",
            features.values.len(),
            schema.len()
        )));
    }
    Ok(())
}

/// Load the configured backend. Failure here is fatal at startup.
pub fn load_model(config: &ModelConfig) -> Result<Box<dyn WearModel>> {
    match config.kind {
        ModelKind::Onnx => {
            let metadata = config.metadata_path.as_deref().ok_or_else(|| MonitorError::ModelLoad {
                path: config.path.clone(),
                reason: "onnx models need a metadata_path with feature names".into(),
            })?;
            Ok(Box::new(OnnxWearModel::load(&config.path, metadata)?))
        }
        ModelKind::Linear => Ok(Box::new(LinearWearModel::load(&config.path)?)),
    }
}
