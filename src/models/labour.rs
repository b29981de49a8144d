//! Process step and operator data models for labour costing.
//!
//! [`ProcessStep`] maps to an entry in `process.yaml` (current schema; the
//! store upgrades older flat schemas on load). Timing is entered once as a
//! standard time ([`StepTiming`]) and normalized to an effective
//! seconds-per-unit figure; per-array aggregation then scales that figure by
//! the step's quantity source.

use serde::{Deserialize, Serialize};

/// An operator who can be assigned to process steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorProfile {
    pub id: String,
    pub name: String,
    pub job_title: String,
    pub hourly_rate: f64,
}

/// Unit a time value is entered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
}

impl TimeUnit {
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value,
            TimeUnit::Minutes => value * 60.0,
        }
    }
}

/// The logical unit a per-unit or per-batch standard time refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitBasis {
    #[default]
    Cell,
    Diode,
}

/// How a step's standard time was entered.
///
/// Serialized with serde's adjacently-tagged representation
/// (`{ "type": "per_batch", "params": { ... } }`). Whatever the entry mode,
/// [`StepTiming::raw_time_per_unit_s`] normalizes to seconds per unit
/// (seconds per cell for array-level entries) before any yield adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum StepTiming {
    /// Time entered directly per cell or per diode.
    PerUnit {
        basis: UnitBasis,
        time_value: f64,
        #[serde(default)]
        time_unit: TimeUnit,
    },
    /// Time entered for a batch of cells or diodes.
    PerBatch {
        basis: UnitBasis,
        batch_units: f64,
        time_value: f64,
        #[serde(default)]
        time_unit: TimeUnit,
    },
    /// Time entered for a whole array, normalized to a per-cell figure.
    PerArray {
        cells_per_array_for_step: f64,
        time_value: f64,
        #[serde(default)]
        time_unit: TimeUnit,
    },
}

impl Default for StepTiming {
    fn default() -> Self {
        StepTiming::PerArray {
            cells_per_array_for_step: 1.0,
            time_value: 0.0,
            time_unit: TimeUnit::Seconds,
        }
    }
}

impl StepTiming {
    /// Seconds per unit before yield adjustment. Degenerate divisors
    /// (batch size or cell count ≤ 0) yield 0.
    pub fn raw_time_per_unit_s(&self) -> f64 {
        match *self {
            StepTiming::PerUnit {
                time_value,
                time_unit,
                ..
            } => time_unit.to_seconds(time_value),
            StepTiming::PerBatch {
                batch_units,
                time_value,
                time_unit,
                ..
            } => {
                if batch_units > 0.0 {
                    time_unit.to_seconds(time_value) / batch_units
                } else {
                    0.0
                }
            }
            StepTiming::PerArray {
                cells_per_array_for_step,
                time_value,
                time_unit,
            } => {
                if cells_per_array_for_step > 0.0 {
                    time_unit.to_seconds(time_value) / cells_per_array_for_step
                } else {
                    0.0
                }
            }
        }
    }

    /// The unit the normalized time refers to. Array-level entries normalize
    /// to cells.
    pub fn unit_basis(&self) -> UnitBasis {
        match *self {
            StepTiming::PerUnit { basis, .. } | StepTiming::PerBatch { basis, .. } => basis,
            StepTiming::PerArray { .. } => UnitBasis::Cell,
        }
    }
}

/// How a step scales when aggregating to a per-array total.
///
/// Unrecognized strings deserialize to [`ScalingBasis::Unknown`] so one
/// malformed step cannot make the whole process file unreadable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ScalingBasis {
    /// `time_per_unit_s` is multiplied by the quantity drawn from
    /// [`QuantitySource`], adjusted for yield.
    PerUnit,
    /// `time_per_unit_s` is already a per-array figure.
    #[default]
    PerArray,
    /// Unrecognized basis; the step contributes nothing.
    Unknown,
}

impl From<String> for ScalingBasis {
    fn from(value: String) -> Self {
        match value.as_str() {
            "per_unit" => ScalingBasis::PerUnit,
            "per_array" => ScalingBasis::PerArray,
            _ => ScalingBasis::Unknown,
        }
    }
}

/// What quantity a per-unit step scales with.
///
/// Unrecognized strings deserialize to [`QuantitySource::Unknown`], which
/// scales to a quantity of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum QuantitySource {
    #[default]
    Array,
    Cells,
    Strings,
    BypassDiodes,
    BlockingDiodes,
    /// Unrecognized source; contributes a quantity of zero.
    Unknown,
}

impl From<String> for QuantitySource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "array" => QuantitySource::Array,
            "cells" => QuantitySource::Cells,
            "strings" => QuantitySource::Strings,
            "bypass_diodes" => QuantitySource::BypassDiodes,
            "blocking_diodes" => QuantitySource::BlockingDiodes,
            _ => QuantitySource::Unknown,
        }
    }
}

/// An operator assignment slot on a process step. An empty slot records
/// headcount without naming anyone and contributes no labour rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorSlot {
    pub operator_id: Option<String>,
}

/// One manufacturing process step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessStep {
    pub id: String,
    pub name: String,
    /// Standard-time entry for this step.
    pub timing: StepTiming,
    /// Fraction of processed units that come out good; values ≤ 0 are
    /// treated as 1.0 at computation time.
    pub yield_fraction: f64,
    /// Normalized seconds per unit before yield, as stored. Refreshed from
    /// `timing` by [`crate::costing::labour::apply_standard_times`].
    pub time_per_unit_s: f64,
    pub setup_time_s_per_array: f64,
    pub scaling_basis: ScalingBasis,
    pub quantity_source: QuantitySource,
    pub operators: Vec<OperatorSlot>,
    pub notes: String,
}

impl Default for ProcessStep {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            timing: StepTiming::default(),
            yield_fraction: 1.0,
            time_per_unit_s: 0.0,
            setup_time_s_per_array: 0.0,
            scaling_basis: ScalingBasis::default(),
            quantity_source: QuantitySource::default(),
            operators: Vec::new(),
            notes: String::new(),
        }
    }
}
