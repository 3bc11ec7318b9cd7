//! Post-processing of a wear estimate: life metrics, condition band, forward projection.

mod condition;
mod metrics;
mod projection;

pub use condition::ToolCondition;
pub use metrics::DerivedMetrics;
pub use projection::{project, ProjectionPoint, WearProjection};
