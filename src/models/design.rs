//! Array design records.
//!
//! [`ArrayDesign`] is the in-memory and on-disk representation of one array
//! variant. It maps to an entry in `array_designs.yaml`. The silver ribbon
//! ids reference items in the materials catalog by their stable `id`; a
//! dangling reference is reported by the calculators as a configuration
//! error, never resolved to a fallback item.

use serde::{Deserialize, Serialize};

/// Illumination condition used for the power figures.
///
/// Serialized as the spectrum label (`"AM1.5"` / `"AM0"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Illumination {
    #[default]
    #[serde(rename = "AM1.5")]
    Am15,
    #[serde(rename = "AM0")]
    Am0,
}

/// A single array design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayDesign {
    /// Human-readable design name, unique within the design list.
    pub name: String,
    /// Number of cells in the array.
    pub num_cells: u32,

    /// Cell efficiency under AM1.5 illumination, in percent.
    pub eff_am15_percent: f64,
    /// Cell efficiency under AM0 illumination, in percent.
    pub eff_am0_percent: f64,

    /// Cell height in mm.
    pub cell_height_mm: f64,
    /// Gap between adjacent cells in mm.
    pub gap_between_cells_mm: f64,
    /// Gap at the positive end in mm.
    pub positive_end_gap_mm: f64,
    /// Gap at the negative end in mm.
    pub negative_end_gap_mm: f64,

    /// Silver ribbon used for the blocking diode tabs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_tab_silver_id: Option<String>,
    /// Width override for the blocking diode tabs in mm.
    pub blocking_tab_width_mm: f64,
    /// First blocking diode tab length in mm.
    pub blocking_tab_length1_mm: f64,
    /// Second blocking diode tab length in mm.
    pub blocking_tab_length2_mm: f64,

    /// Silver ribbon used for the two negative end bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_end_silver_id: Option<String>,
    /// Negative end bar width in mm.
    pub negative_end_width_mm: f64,
    /// Negative end bar length in mm (per bar, two bars per array).
    pub negative_end_length_mm: f64,

    /// Silver ribbon used for the single negative bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_bar_silver_id: Option<String>,
    /// Negative bar width in mm.
    pub negative_bar_width_mm: f64,
    /// Negative bar length in mm.
    pub negative_bar_length_mm: f64,
}

impl ArrayDesign {
    /// Cell efficiency for the given illumination, as a fraction.
    pub fn efficiency(&self, illumination: Illumination) -> f64 {
        match illumination {
            Illumination::Am15 => self.eff_am15_percent / 100.0,
            Illumination::Am0 => self.eff_am0_percent / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illumination_serializes_as_spectrum_label() {
        assert_eq!(
            serde_json::to_value(Illumination::Am15).expect("to_value"),
            "AM1.5"
        );
        assert_eq!(
            serde_json::to_value(Illumination::Am0).expect("to_value"),
            "AM0"
        );
    }

    #[test]
    fn design_deserializes_from_partial_yaml() {
        let yaml = "name: 20 cell\nnum_cells: 20\neff_am15_percent: 28.0\n";
        let d: ArrayDesign = serde_yml::from_str(yaml).expect("parse");
        assert_eq!(d.name, "20 cell");
        assert_eq!(d.num_cells, 20);
        assert!(d.blocking_tab_silver_id.is_none());
        assert_eq!(d.negative_end_length_mm, 0.0);
    }

    #[test]
    fn efficiency_is_percent_over_one_hundred() {
        let d = ArrayDesign {
            eff_am15_percent: 28.0,
            eff_am0_percent: 25.0,
            ..ArrayDesign::default()
        };
        assert!((d.efficiency(Illumination::Am15) - 0.28).abs() < 1e-12);
        assert!((d.efficiency(Illumination::Am0) - 0.25).abs() < 1e-12);
    }
}
