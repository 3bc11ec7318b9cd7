//! Schema-driven projection of an expanded reading onto the model's columns.

use super::{expand, FeatureSchema, FeatureVector};
use crate::error::{MonitorError, Result};
use crate::reading::SensorReading;
use std::collections::HashMap;

pub struct FeatureBuilder {
    schema: FeatureSchema,
}

impl FeatureBuilder {
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    /// Reindex the expansion to exactly the schema: absent columns become 0,
    /// columns the schema does not know are dropped.
    pub fn build(&self, reading: &SensorReading) -> Result<FeatureVector> {
        let expanded: HashMap<String, f64> = expand(reading).into_iter().collect();

        let mut matched = 0usize;
        let values: Vec<f64> = self
            .schema
            .columns()
            .iter()
            .map(|c| match expanded.get(c) {
                Some(v) => {
                    matched += 1;
                    *v
                }
                None => 0.0,
            })
            .collect();

        if matched == 0 {
            return Err(MonitorError::SchemaMismatch(format!(
                "none of the {} model columns are produced from a sensor reading",
                self.schema.len()
            )));
        }
        tracing::debug!(
            columns = self.schema.len(),
            matched,
            dropped = expanded.len() - matched,
            "feature vector aligned"
        );

        Ok(FeatureVector {
            columns: self.schema.columns().to_vec(),
            values,
        })
    }
}
