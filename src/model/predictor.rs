//! Single-row wear prediction, clamped to a physical measurement.

use super::WearModel;
use crate::error::{MonitorError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Predicted flank wear (mm). Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WearEstimate(f64);

impl WearEstimate {
    /// Clamp a raw regressor output; `None` for NaN or infinities.
    pub fn from_raw(raw: f64) -> Option<Self> {
        raw.is_finite().then(|| Self(raw.max(0.0)))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Run the model once. No retry: an inference failure fails the request.
pub fn predict_wear(model: &dyn WearModel, features: &FeatureVector) -> Result<WearEstimate> {
    let raw = model.predict(features)?;
    let wear = WearEstimate::from_raw(raw)
        .ok_or_else(|| MonitorError::Prediction(format!("model returned non-finite value {raw}")))?;
    if raw < 0.0 {
        tracing::debug!(raw, "negative prediction clamped to zero");
    }
    Ok(wear)
}
