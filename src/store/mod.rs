//! YAML persistence for the five document types.
//!
//! One file per document under a single data directory: `product.yaml`,
//! `materials.yaml`, `array_designs.yaml`, `operator_profiles.yaml` and
//! `process.yaml`. Saves are atomic: the document is written to a `.tmp`
//! sibling and renamed over the target, so a failed save leaves the
//! previous file intact.
//!
//! A missing file is not an error for documents that have a sensible empty
//! state (default product, empty catalog, no designs, no operators). The
//! process file is the exception: costing labour without a process list is
//! meaningless, so its absence is reported.
//!
//! `process.yaml` written by older releases stores each step's timing as
//! flat fields (`timing_basis`, `entry_mode`, `batch_units`, ...). Loading
//! upgrades those records to the nested [`StepTiming`] schema and writes
//! the upgraded file back, so the flat schema only has to be read here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::costing::labour::apply_standard_times;
use crate::models::design::ArrayDesign;
use crate::models::labour::{
    OperatorProfile, OperatorSlot, ProcessStep, QuantitySource, ScalingBasis, StepTiming,
    TimeUnit, UnitBasis,
};
use crate::models::materials::Catalog;
use crate::models::product::Product;

const PRODUCT_FILE: &str = "product.yaml";
const MATERIALS_FILE: &str = "materials.yaml";
const DESIGNS_FILE: &str = "array_designs.yaml";
const OPERATORS_FILE: &str = "operator_profiles.yaml";
const PROCESS_FILE: &str = "process.yaml";

/// Persistence failure, with the file it concerns in the message.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Load(String),
    #[error("{0}")]
    Save(String),
}

/// File-backed store rooted at one data directory.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct DesignsFile {
    #[serde(default)]
    designs: Vec<ArrayDesign>,
}

#[derive(Serialize, Deserialize)]
struct OperatorsFile {
    #[serde(default)]
    operators: Vec<OperatorProfile>,
}

#[derive(Serialize)]
struct ProcessFileRef<'a> {
    process: &'a [ProcessStep],
}

#[derive(Deserialize)]
struct ProcessFileIn {
    #[serde(default)]
    process: Vec<StepRecord>,
}

/// A process step as found on disk: current nested schema or the legacy
/// flat one. The legacy form is recognized by its `timing_basis` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum StepRecord {
    Legacy(LegacyStep),
    Current(ProcessStep),
}

fn one() -> f64 {
    1.0
}

fn seconds() -> String {
    "seconds".to_string()
}

/// Flat step schema written by older releases.
#[derive(Deserialize)]
struct LegacyStep {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    timing_basis: String,
    #[serde(default)]
    entry_mode: String,
    #[serde(default)]
    time_value: f64,
    #[serde(default = "seconds")]
    time_unit: String,
    #[serde(default = "one")]
    batch_units: f64,
    #[serde(default = "one")]
    cells_per_array_for_step: f64,
    #[serde(default = "one")]
    yield_fraction: f64,
    #[serde(default)]
    setup_time_s_per_array: f64,
    #[serde(default)]
    scaling_basis: ScalingBasis,
    #[serde(default)]
    quantity_source: QuantitySource,
    #[serde(default)]
    operators: LegacyOperators,
    #[serde(default)]
    notes: String,
}

/// Older files stored either a bare operator headcount or a slot list.
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyOperators {
    Count(u32),
    Slots(Vec<OperatorSlot>),
}

impl Default for LegacyOperators {
    fn default() -> Self {
        LegacyOperators::Slots(Vec::new())
    }
}

impl LegacyStep {
    fn time_unit(&self) -> TimeUnit {
        match self.time_unit.as_str() {
            "minutes" => TimeUnit::Minutes,
            _ => TimeUnit::Seconds,
        }
    }

    fn into_step(self) -> ProcessStep {
        let time_unit = self.time_unit();
        let basis = match self.timing_basis.as_str() {
            "diode" => UnitBasis::Diode,
            _ => UnitBasis::Cell,
        };
        let timing = match (self.timing_basis.as_str(), self.entry_mode.as_str()) {
            ("array", _) => StepTiming::PerArray {
                cells_per_array_for_step: self.cells_per_array_for_step,
                time_value: self.time_value,
                time_unit,
            },
            (_, "per_batch") => StepTiming::PerBatch {
                basis,
                batch_units: self.batch_units,
                time_value: self.time_value,
                time_unit,
            },
            _ => StepTiming::PerUnit {
                basis,
                time_value: self.time_value,
                time_unit,
            },
        };
        let operators = match self.operators {
            LegacyOperators::Slots(slots) => slots,
            LegacyOperators::Count(count) => {
                vec![OperatorSlot::default(); count as usize]
            }
        };
        ProcessStep {
            id: self.id,
            name: self.name,
            timing,
            yield_fraction: self.yield_fraction,
            time_per_unit_s: 0.0,
            setup_time_s_per_array: self.setup_time_s_per_array,
            scaling_basis: self.scaling_basis,
            quantity_source: self.quantity_source,
            operators,
            notes: self.notes,
        }
    }
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn read(&self, file: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(file);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Load(format!("cannot read {file}: {e}"))),
        }
    }

    fn write<T: Serialize>(&self, file: &str, document: &T) -> Result<(), StoreError> {
        let yaml = serde_yml::to_string(document)
            .map_err(|e| StoreError::Save(format!("cannot serialize {file}: {e}")))?;
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| StoreError::Save(format!("cannot create data directory: {e}")))?;

        let path = self.path(file);
        let tmp_path = self.path(&format!("{file}.tmp"));
        if let Err(e) = std::fs::write(&tmp_path, yaml) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(StoreError::Save(format!("cannot write {file}: {e}")));
        }
        std::fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            StoreError::Save(format!("rename to {file} failed: {e}"))
        })
    }

    fn parse<T: for<'de> Deserialize<'de>>(file: &str, text: &str) -> Result<T, StoreError> {
        serde_yml::from_str(text)
            .map_err(|e| StoreError::Load(format!("cannot parse {file}: {e}")))
    }

    /// Load the product configuration, defaulting when the file is absent.
    pub fn load_product(&self) -> Result<Product, StoreError> {
        match self.read(PRODUCT_FILE)? {
            Some(text) => Self::parse(PRODUCT_FILE, &text),
            None => Ok(Product::default()),
        }
    }

    pub fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        self.write(PRODUCT_FILE, product)
    }

    /// Load the materials catalog, empty when the file is absent.
    pub fn load_catalog(&self) -> Result<Catalog, StoreError> {
        match self.read(MATERIALS_FILE)? {
            Some(text) => Self::parse(MATERIALS_FILE, &text),
            None => Ok(Catalog::default()),
        }
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<(), StoreError> {
        self.write(MATERIALS_FILE, catalog)
    }

    /// Load the array design list, empty when the file is absent.
    pub fn load_designs(&self) -> Result<Vec<ArrayDesign>, StoreError> {
        match self.read(DESIGNS_FILE)? {
            Some(text) => Self::parse::<DesignsFile>(DESIGNS_FILE, &text).map(|f| f.designs),
            None => Ok(Vec::new()),
        }
    }

    pub fn save_designs(&self, designs: &[ArrayDesign]) -> Result<(), StoreError> {
        self.write(
            DESIGNS_FILE,
            &DesignsFile {
                designs: designs.to_vec(),
            },
        )
    }

    /// Load the operator profiles, empty when the file is absent.
    pub fn load_operators(&self) -> Result<Vec<OperatorProfile>, StoreError> {
        match self.read(OPERATORS_FILE)? {
            Some(text) => {
                Self::parse::<OperatorsFile>(OPERATORS_FILE, &text).map(|f| f.operators)
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn save_operators(&self, operators: &[OperatorProfile]) -> Result<(), StoreError> {
        self.write(
            OPERATORS_FILE,
            &OperatorsFile {
                operators: operators.to_vec(),
            },
        )
    }

    /// Load the process step list, upgrading legacy flat-schema records and
    /// writing the upgraded file back. A missing process file is an error.
    pub fn load_process_steps(&self) -> Result<Vec<ProcessStep>, StoreError> {
        let text = self.read(PROCESS_FILE)?.ok_or_else(|| {
            StoreError::Load(format!("{PROCESS_FILE} not found in the data directory"))
        })?;
        let file: ProcessFileIn = Self::parse(PROCESS_FILE, &text)?;

        let mut upgraded = false;
        let mut steps: Vec<ProcessStep> = file
            .process
            .into_iter()
            .map(|record| match record {
                StepRecord::Current(step) => step,
                StepRecord::Legacy(legacy) => {
                    upgraded = true;
                    legacy.into_step()
                }
            })
            .collect();

        if upgraded {
            apply_standard_times(&mut steps);
            info!(
                steps = steps.len(),
                "upgraded legacy process schema, writing back"
            );
            self.save_process_steps(&steps)?;
        }
        Ok(steps)
    }

    pub fn save_process_steps(&self, steps: &[ProcessStep]) -> Result<(), StoreError> {
        self.write(PROCESS_FILE, &ProcessFileRef { process: steps })
    }
}
