//! Categorical expansion of a single reading.

use crate::reading::SensorReading;

/// Scalar columns followed by one-hot `case_<n>` and `material_<n>` columns.
///
/// Only the observed category gets a column, as a single-row dummy encoding
/// would; the other categories are zero-filled when the row is aligned.
pub fn expand(reading: &SensorReading) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = reading
        .scalar_columns()
        .iter()
        .map(|(name, v)| (name.to_string(), *v))
        .collect();
    out.push((format!("case_{}", reading.case.value()), 1.0));
    out.push((format!("material_{}", reading.material.value()), 1.0));
    out
}
