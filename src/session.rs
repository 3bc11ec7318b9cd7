//! One operator session: a shared model, its own report ledger, and the
//! synchronous diagnosis pipeline run for each submission.

use crate::config::MonitorConfig;
use crate::error::{MonitorError, Result};
use crate::features::FeatureBuilder;
use crate::health::{project, DerivedMetrics, ProjectionPoint, ToolCondition};
use crate::model::{predict_wear, rank_importances, FeatureImportance, WearEstimate, WearModel};
use crate::reading::{RawReading, SensorReading};
use crate::report::{ReportRecord, SessionLedger};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything the presentation layer shows for one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub record_id: String,
    pub wear: WearEstimate,
    pub metrics: DerivedMetrics,
    pub condition: ToolCondition,
    pub projection: Vec<ProjectionPoint>,
    /// `None` when the model does not expose importances
    pub importances: Option<Vec<FeatureImportance>>,
}

pub struct DiagnosisSession<'m> {
    model: &'m dyn WearModel,
    builder: FeatureBuilder,
    config: MonitorConfig,
    ledger: SessionLedger,
}

impl<'m> DiagnosisSession<'m> {
    pub fn new(model: &'m dyn WearModel, config: MonitorConfig) -> Self {
        Self {
            model,
            builder: FeatureBuilder::new(model.schema().clone()),
            config,
            ledger: SessionLedger::new(),
        }
    }

    /// Validate raw form input, then diagnose.
    pub fn diagnose_raw(&mut self, raw: &RawReading) -> Result<Diagnosis> {
        let reading = raw.parse()?;
        self.diagnose(&reading)
    }

    /// One submitted input line: UTF-8 JSON form fields. `None` for a blank line.
    /// Undecodable or incomplete input fails this request only.
    pub fn submit_line(&mut self, line: &[u8]) -> Option<Result<Diagnosis>> {
        let text = match std::str::from_utf8(line) {
            Ok(t) => t.trim(),
            Err(e) => {
                return Some(Err(MonitorError::validation(
                    "submission",
                    format!("not valid UTF-8: {e}"),
                )))
            }
        };
        if text.is_empty() {
            return None;
        }
        let raw: RawReading = match serde_json::from_str(text) {
            Ok(r) => r,
            Err(e) => return Some(Err(MonitorError::validation("submission", e.to_string()))),
        };
        Some(self.diagnose_raw(&raw))
    }

    /// Full pipeline. The ledger is only touched once every step has succeeded.
    pub fn diagnose(&mut self, reading: &SensorReading) -> Result<Diagnosis> {
        let features = self.builder.build(reading)?;
        let wear = predict_wear(self.model, &features)?;

        let threshold = self.config.wear.failure_threshold;
        let metrics = DerivedMetrics::from_config(wear, &self.config.wear);
        let condition = ToolCondition::from_wear(wear, &self.config.condition);
        let projection: Vec<ProjectionPoint> =
            project(wear, reading, threshold, &self.config.projection).collect();
        let importances = rank_importances(self.model);

        let record = ReportRecord::new(reading.clone(), wear, &metrics);
        let record_id = record.id.clone();
        self.ledger.append(record);

        info!(
            record_id = %record_id,
            wear = wear.value(),
            health_score = metrics.health_score,
            remaining_cycles = metrics.remaining_cycles,
            condition = condition.label(),
            records = self.ledger.len(),
            "diagnosis complete"
        );

        Ok(Diagnosis {
            record_id,
            wear,
            metrics,
            condition,
            projection,
            importances,
        })
    }

    /// Rows for the recent report table, newest first.
    pub fn recent_reports(&self) -> Vec<&ReportRecord> {
        self.ledger.recent(self.config.report.display_limit)
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }
}
