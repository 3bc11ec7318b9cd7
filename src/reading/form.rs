//! Raw form input: free-text numeric fields and selected enums, as typed by an operator.
//! Every key is required when deserializing; `Default` only seeds the form placeholders.

use super::{CaseId, MaterialId, SensorReading};
use crate::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawReading {
    pub case: u8,
    pub run: String,
    pub doc: String,
    pub feed: String,
    pub material: u8,
    pub smc_ac: String,
    pub smc_dc: String,
    pub vib_table: String,
    pub vib_spindle: String,
    pub ae_table: String,
    pub ae_spindle: String,
}

impl Default for RawReading {
    fn default() -> Self {
        Self {
            case: 1,
            run: "1".to_string(),
            doc: "1.5".to_string(),
            feed: "0.5".to_string(),
            material: 1,
            smc_ac: "0.2".to_string(),
            smc_dc: "0.2".to_string(),
            vib_table: "0.1".to_string(),
            vib_spindle: "0.1".to_string(),
            ae_table: "0.1".to_string(),
            ae_spindle: "0.1".to_string(),
        }
    }
}

fn parse_f64(field: &'static str, raw: &str) -> Result<f64> {
    let v: f64 = raw
        .trim()
        .parse()
        .map_err(|_| MonitorError::validation(field, format!("{raw:?} is not a number")))?;
    if !v.is_finite() {
        return Err(MonitorError::validation(field, format!("{raw:?} is not finite")));
    }
    Ok(v)
}

fn parse_run(raw: &str) -> Result<u32> {
    let v: u32 = raw.trim().parse().map_err(|_| {
        MonitorError::validation("run", format!("{raw:?} is not a whole number"))
    })?;
    if v == 0 {
        return Err(MonitorError::validation("run", "must be positive"));
    }
    Ok(v)
}

impl RawReading {
    /// Validate every field; the first bad field aborts the request.
    pub fn parse(&self) -> Result<SensorReading> {
        Ok(SensorReading {
            case: CaseId::try_from(self.case).map_err(|e| MonitorError::validation("case", e))?,
            run: parse_run(&self.run)?,
            doc: parse_f64("doc", &self.doc)?,
            feed: parse_f64("feed", &self.feed)?,
            material: MaterialId::try_from(self.material)
                .map_err(|e| MonitorError::validation("material", e))?,
            smc_ac: parse_f64("smc_ac", &self.smc_ac)?,
            smc_dc: parse_f64("smc_dc", &self.smc_dc)?,
            vib_table: parse_f64("vib_table", &self.vib_table)?,
            vib_spindle: parse_f64("vib_spindle", &self.vib_spindle)?,
            ae_table: parse_f64("ae_table", &self.ae_table)?,
            ae_spindle: parse_f64("ae_spindle", &self.ae_spindle)?,
        })
    }
}
