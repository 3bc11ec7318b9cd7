//! Maps wear onto maintenance bands; thresholds from config.

use crate::config::ConditionConfig;
use crate::model::WearEstimate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCondition {
    Healthy,
    ReplaceSoon,
    ReplaceImmediately,
}

impl ToolCondition {
    pub fn from_wear(wear: WearEstimate, config: &ConditionConfig) -> Self {
        let wear = wear.value();
        if wear < config.healthy_below {
            ToolCondition::Healthy
        } else if wear < config.replace_soon_below {
            ToolCondition::ReplaceSoon
        } else {
            ToolCondition::ReplaceImmediately
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolCondition::Healthy => "HEALTHY",
            ToolCondition::ReplaceSoon => "REPLACE SOON",
            ToolCondition::ReplaceImmediately => "REPLACE IMMEDIATELY",
        }
    }
}
