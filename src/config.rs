//! Monitor configuration. Heuristic constants live here, not in the code paths.

use crate::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Model artifact and its schema sidecar
    pub model: ModelConfig,
    /// Failure threshold and average wear rate
    pub wear: WearConfig,
    /// Forward wear projection heuristic
    pub projection: ProjectionConfig,
    /// Tool condition bands
    pub condition: ConditionConfig,
    /// Recent report table
    pub report: ReportConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Onnx,
    Linear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub kind: ModelKind,
    /// ONNX file, or JSON coefficients for the linear backend
    pub path: PathBuf,
    /// JSON sidecar with `feature_names` and optional `feature_importances` (ONNX only)
    pub metadata_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WearConfig {
    /// Flank wear (mm) at which the tool is considered failed
    pub failure_threshold: f64,
    /// Assumed wear per cycle (mm), used for remaining cycle estimates
    pub avg_wear_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Number of future cycles to project
    pub horizon: u32,
    /// Per-cycle wear increment before load scaling
    pub base_increment: f64,
    /// Increment added per unit of load factor
    pub load_coefficient: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionConfig {
    /// Wear below this is healthy
    pub healthy_below: f64,
    /// Wear below this (and not healthy) should be replaced soon
    pub replace_soon_below: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown in the recent report table
    pub display_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            kind: ModelKind::Onnx,
            path: PathBuf::from("tool_wear_model.onnx"),
            metadata_path: Some(PathBuf::from("tool_wear_model.json")),
        }
    }
}

impl Default for WearConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 0.7,
            avg_wear_rate: 0.02,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon: 10,
            base_increment: 0.003,
            load_coefficient: 0.0015,
        }
    }
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            healthy_below: 0.4,
            replace_soon_below: 0.6,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { display_limit: 10 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl MonitorConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str::<MonitorConfig>(&data)
            .map_err(|e| MonitorError::Config(format!("{}: {e}", path.display())))
    }

    /// Reject values the metric and projection formulas cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = self.wear.failure_threshold;
        if !(t.is_finite() && t > 0.0) {
            return Err(MonitorError::Config(format!(
                "failure_threshold must be positive, got {t}"
            )));
        }
        if !(self.wear.avg_wear_rate.is_finite() && self.wear.avg_wear_rate > 0.0) {
            return Err(MonitorError::Config(format!(
                "avg_wear_rate must be positive, got {}",
                self.wear.avg_wear_rate
            )));
        }
        if self.projection.horizon == 0 {
            return Err(MonitorError::Config("projection horizon must be at least 1".into()));
        }
        if !(self.projection.base_increment >= 0.0 && self.projection.load_coefficient >= 0.0) {
            return Err(MonitorError::Config(
                "projection increments must be non-negative".into(),
            ));
        }
        let c = &self.condition;
        if !(0.0 < c.healthy_below && c.healthy_below <= c.replace_soon_below && c.replace_soon_below <= t) {
            return Err(MonitorError::Config(format!(
                "condition bands must satisfy 0 < {} <= {} <= {t}",
                c.healthy_below, c.replace_soon_below
            )));
        }
        Ok(())
    }
}
