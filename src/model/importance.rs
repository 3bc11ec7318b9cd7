//! Feature importance ranking for the "decision factors" view.

use super::WearModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f32,
}

/// Importances paired with column names, highest first.
///
/// `None` when the model exposes no importances or they do not line up with
/// the schema; the caller shows a notice instead of failing.
pub fn rank_importances(model: &dyn WearModel) -> Option<Vec<FeatureImportance>> {
    let Some(importances) = model.feature_importances() else {
        tracing::info!("feature importance not available");
        return None;
    };
    let names = model.feature_names();
    if importances.len() != names.len() {
        tracing::info!(
            importances = importances.len(),
            features = names.len(),
            "feature importance not aligned with schema"
        );
        return None;
    }

    let mut ranked: Vec<FeatureImportance> = names
        .iter()
        .zip(importances)
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.clone(),
            importance: *importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    Some(ranked)
}
