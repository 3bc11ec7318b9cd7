//! Remaining life, health score and remaining cycles relative to the failure threshold.

use crate::config::WearConfig;
use crate::model::WearEstimate;
use serde::{Deserialize, Serialize};

/// Absorbs float error in `remaining_life / rate` (0.7 - 0.5 is 0.19999999999999996).
const CYCLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Wear left before the failure threshold (mm)
    pub remaining_life: f64,
    /// 0–100
    pub remaining_life_percent: f64,
    /// 0–100, 100 for a fresh tool
    pub health_score: f64,
    /// Cycles left at the average wear rate
    pub remaining_cycles: u32,
}

impl DerivedMetrics {
    /// Pure; `failure_threshold` and `avg_wear_rate` are expected positive.
    pub fn compute(wear: WearEstimate, failure_threshold: f64, avg_wear_rate: f64) -> Self {
        let wear = wear.value();
        let remaining_life = (failure_threshold - wear).max(0.0);
        let remaining_life_percent = (remaining_life / failure_threshold * 100.0).clamp(0.0, 100.0);
        let health_score = (100.0 - wear / failure_threshold * 100.0).clamp(0.0, 100.0);
        let remaining_cycles = if avg_wear_rate > 0.0 {
            (remaining_life / avg_wear_rate + CYCLE_EPSILON).floor() as u32
        } else {
            0
        };
        Self {
            remaining_life,
            remaining_life_percent,
            health_score,
            remaining_cycles,
        }
    }

    pub fn from_config(wear: WearEstimate, config: &WearConfig) -> Self {
        Self::compute(wear, config.failure_threshold, config.avg_wear_rate)
    }
}
