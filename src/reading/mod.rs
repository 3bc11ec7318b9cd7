//! Sensor readings submitted for diagnosis.
//! Typed readings plus the raw form they are parsed from.

mod form;

pub use form::RawReading;

use serde::{Deserialize, Serialize};

/// Experiment case of the milling dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CaseId {
    One = 1,
    Two = 2,
    Three = 3,
}

/// Workpiece material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MaterialId {
    One = 1,
    Two = 2,
}

impl CaseId {
    pub const ALL: [CaseId; 3] = [CaseId::One, CaseId::Two, CaseId::Three];

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl MaterialId {
    pub const ALL: [MaterialId; 2] = [MaterialId::One, MaterialId::Two];

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CaseId {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(CaseId::One),
            2 => Ok(CaseId::Two),
            3 => Ok(CaseId::Three),
            other => Err(format!("case must be 1, 2 or 3, got {other}")),
        }
    }
}

impl TryFrom<u8> for MaterialId {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(MaterialId::One),
            2 => Ok(MaterialId::Two),
            other => Err(format!("material must be 1 or 2, got {other}")),
        }
    }
}

impl From<CaseId> for u8 {
    fn from(c: CaseId) -> u8 {
        c.value()
    }
}

impl From<MaterialId> for u8 {
    fn from(m: MaterialId) -> u8 {
        m.value()
    }
}

/// One submitted observation. Immutable once built; lives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub case: CaseId,
    pub run: u32,
    /// Depth of cut (mm)
    pub doc: f64,
    pub feed: f64,
    pub material: MaterialId,
    /// Spindle motor current, AC and DC
    pub smc_ac: f64,
    pub smc_dc: f64,
    pub vib_table: f64,
    pub vib_spindle: f64,
    /// Acoustic emission at table and spindle
    pub ae_table: f64,
    pub ae_spindle: f64,
}

impl SensorReading {
    /// Numeric fields under the column names the model was trained on.
    /// `case` and `material` appear both as plain values and one-hot elsewhere.
    pub fn scalar_columns(&self) -> [(&'static str, f64); 11] {
        [
            ("case", f64::from(self.case.value())),
            ("run", f64::from(self.run)),
            ("DOC", self.doc),
            ("feed", self.feed),
            ("material", f64::from(self.material.value())),
            ("smcAC", self.smc_ac),
            ("smcDC", self.smc_dc),
            ("vib_table", self.vib_table),
            ("vib_spindle", self.vib_spindle),
            ("AE_table", self.ae_table),
            ("AE_spindle", self.ae_spindle),
        ]
    }

    /// Hand-tuned load heuristic: cutting cross-term plus linear sensor terms.
    pub fn load_factor(&self) -> f64 {
        self.doc * self.feed
            + (self.smc_ac + self.smc_dc)
            + (self.vib_table + self.vib_spindle)
            + (self.ae_table + self.ae_spindle)
    }
}
