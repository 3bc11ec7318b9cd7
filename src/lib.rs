//! Wear Monitor — tool wear prediction and health scoring for machining sensors.
//!
//! Modular structure:
//! - [`reading`] — Sensor readings and raw form parsing
//! - [`features`] — One-hot expansion and schema alignment
//! - [`model`] — Wear regressors (ONNX, linear) and clamped prediction
//! - [`health`] — Remaining life, health score, condition, wear projection
//! - [`report`] — Per-session report ledger
//! - [`session`] — The diagnosis pipeline
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod error;
pub mod reading;
pub mod features;
pub mod model;
pub mod health;
pub mod report;
pub mod session;
pub mod logging;

pub use config::MonitorConfig;
pub use error::{MonitorError, Result};
pub use reading::{RawReading, SensorReading};
pub use features::{FeatureBuilder, FeatureSchema, FeatureVector};
pub use model::{load_model, WearEstimate, WearModel};
pub use health::{DerivedMetrics, ProjectionPoint, ToolCondition};
pub use report::{ReportRecord, SessionLedger};
pub use session::{Diagnosis, DiagnosisSession};
pub use logging::StructuredLogger;
