//! Forward wear projection over a fixed number of cycles.
//!
//! Wear growth is self-reinforcing: each cycle adds a load-scaled increment
//! multiplied by `1 + wear / threshold`, and the result is capped at the
//! failure threshold. This is a heuristic, not a re-run of the model.

use crate::config::ProjectionConfig;
use crate::model::WearEstimate;
use crate::reading::SensorReading;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based future cycle
    pub cycle: u32,
    pub wear: f64,
}

/// Lazy sequence of exactly `horizon` points. Non-decreasing and never above
/// the threshold; re-create it to replay.
#[derive(Debug, Clone)]
pub struct WearProjection {
    current: f64,
    base_increment: f64,
    failure_threshold: f64,
    cycle: u32,
    horizon: u32,
}

/// Start a projection from the predicted wear and the reading's load factor.
pub fn project(
    initial: WearEstimate,
    reading: &SensorReading,
    failure_threshold: f64,
    config: &ProjectionConfig,
) -> WearProjection {
    let load_factor = reading.load_factor();
    // Negative sensor offsets must not make the tool heal.
    let base_increment = (config.base_increment + load_factor * config.load_coefficient).max(0.0);
    WearProjection {
        current: initial.value().min(failure_threshold),
        base_increment,
        failure_threshold,
        cycle: 0,
        horizon: config.horizon,
    }
}

impl WearProjection {
    pub fn base_increment(&self) -> f64 {
        self.base_increment
    }
}

impl Iterator for WearProjection {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<ProjectionPoint> {
        if self.cycle >= self.horizon {
            return None;
        }
        self.cycle += 1;
        let acceleration = 1.0 + self.current / self.failure_threshold;
        self.current = (self.current + self.base_increment * acceleration).min(self.failure_threshold);
        Some(ProjectionPoint {
            cycle: self.cycle,
            wear: self.current,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.horizon - self.cycle) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for WearProjection {}
