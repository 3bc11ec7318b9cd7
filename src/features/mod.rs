//! Feature vector assembly: reading → one-hot expansion → schema-aligned row.

mod builder;
mod encoding;

pub use builder::FeatureBuilder;
pub use encoding::expand;

use crate::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered input columns the model was fitted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Schema must be non-empty with unique column names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(MonitorError::SchemaMismatch("model declares no input columns".into()));
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !seen.insert(c.as_str()) {
                return Err(MonitorError::SchemaMismatch(format!("duplicate column {c:?}")));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = MonitorError;

    fn try_from(columns: Vec<String>) -> Result<Self> {
        Self::new(columns)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(s: FeatureSchema) -> Self {
        s.columns
    }
}

/// Single-row model input; `columns` equals the schema it was built against.
/// Values stay f64; backends narrow them if their runtime needs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
