//! Per-session report history.

mod ledger;

pub use ledger::SessionLedger;

use crate::health::DerivedMetrics;
use crate::model::WearEstimate;
use crate::reading::SensorReading;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rounds half away from zero (`f64::round`), not half to even.
fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

/// Snapshot of one completed diagnosis, rounded for display. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub reading: SensorReading,
    /// mm, 3 decimals
    pub predicted_wear: f64,
    /// 1 decimal
    pub remaining_life_percent: f64,
    /// whole number
    pub health_score: f64,
}

impl ReportRecord {
    pub fn new(reading: SensorReading, wear: WearEstimate, metrics: &DerivedMetrics) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            recorded_at: Utc::now(),
            reading,
            predicted_wear: round_to(wear.value(), 3),
            remaining_life_percent: round_to(metrics.remaining_life_percent, 1),
            health_score: round_to(metrics.health_score, 0),
        }
    }
}
