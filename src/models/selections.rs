//! Caller-owned selection state for the category calculators.
//!
//! Each cost page of the original workflow lets the operator pick catalog
//! items and enter a few free parameters; these structs are that state,
//! owned by the caller and passed into the calculators. Items are selected
//! by stable catalog id: `None` resolves to the first item of the relevant
//! list, a `Some` id that is not in the catalog is a configuration error.

use serde::{Deserialize, Serialize};

/// Selections for the silver ribbon category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilverSelection {
    pub top_tab_silver_id: Option<String>,
    pub top_tab_length_mm: f64,
}

impl Default for SilverSelection {
    fn default() -> Self {
        Self {
            top_tab_silver_id: None,
            top_tab_length_mm: 5.0,
        }
    }
}

/// Selections for the diodes category.
///
/// Blocking-diode tab geometry comes from the array design, not from here;
/// only the diode material and yield are selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiodeSelection {
    pub bypass_diode_id: Option<String>,
    pub bypass_silver_id: Option<String>,
    pub bypass_tab_length_mm: f64,
    pub bypass_tab_width_mm: f64,
    pub bypass_yield_fraction: f64,
    pub blocking_diode_id: Option<String>,
    pub blocking_yield_fraction: f64,
}

impl Default for DiodeSelection {
    fn default() -> Self {
        Self {
            bypass_diode_id: None,
            bypass_silver_id: None,
            bypass_tab_length_mm: 5.0,
            bypass_tab_width_mm: 1.5,
            bypass_yield_fraction: 0.8,
            blocking_diode_id: None,
            blocking_yield_fraction: 0.9,
        }
    }
}

/// One lamination stack layer: the film and the waste added on top of the
/// base length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerChoice {
    pub item_id: Option<String>,
    pub waste_mm: f64,
}

/// Selections for the lamination category: three stack layers plus the
/// welding liner (cut to base length, no waste).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaminationSelection {
    pub layers: [LayerChoice; 3],
    pub liner_id: Option<String>,
}

impl Default for LaminationSelection {
    fn default() -> Self {
        Self {
            layers: [
                LayerChoice::default(),
                LayerChoice::default(),
                LayerChoice::default(),
            ],
            liner_id: None,
        }
    }
}

/// Selections for the tapes category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapeSelection {
    pub perimeter_tape_id: Option<String>,
    pub other_tape_id: Option<String>,
    pub other_length_mm: f64,
}

/// Selections for the misc category (epoxy; kapton has no free parameters).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscSelection {
    pub epoxy_id: Option<String>,
    pub epoxy_per_diode_ml: f64,
}

/// Selections for the packaging category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingSelection {
    pub frame_id: Option<String>,
    pub board_id: Option<String>,
    pub box_id: Option<String>,
    pub arrays_per_box: u32,
}

impl Default for PackagingSelection {
    fn default() -> Self {
        Self {
            frame_id: None,
            board_id: None,
            box_id: None,
            arrays_per_box: 4,
        }
    }
}

/// All category selections bundled for the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selections {
    pub silver: SilverSelection,
    pub diodes: DiodeSelection,
    pub lamination: LaminationSelection,
    pub tapes: TapeSelection,
    pub misc: MiscSelection,
    pub packaging: PackagingSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_workflow_starting_state() {
        let s = Selections::default();
        assert_eq!(s.silver.top_tab_length_mm, 5.0);
        assert_eq!(s.diodes.bypass_tab_width_mm, 1.5);
        assert_eq!(s.diodes.bypass_yield_fraction, 0.8);
        assert_eq!(s.diodes.blocking_yield_fraction, 0.9);
        assert_eq!(s.packaging.arrays_per_box, 4);
        assert!(s.lamination.liner_id.is_none());
    }

    #[test]
    fn selections_serde_round_trip() {
        let mut s = Selections::default();
        s.silver.top_tab_silver_id = Some("Ag_2mm".to_string());
        s.lamination.layers[1].waste_mm = 25.0;
        let yaml = serde_yml::to_string(&s).expect("serialize");
        let recovered: Selections = serde_yml::from_str(&yaml).expect("deserialize");
        assert_eq!(s, recovered);
    }
}
