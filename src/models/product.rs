//! Product-level configuration shared by every array design.
//!
//! [`Product`] maps to `product.yaml` and holds the parameters that are
//! fixed per production line rather than per design: string/array topology,
//! the USD→GBP exchange rate, and default cell geometry.

use serde::{Deserialize, Serialize};

/// Core product configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Human-readable product name.
    pub name: String,
    /// Cells in a single string.
    pub cells_per_string: u32,
    /// Strings in a full array.
    pub strings_per_array: u32,
    /// Exchange rate applied whenever a catalog price is quoted in USD.
    pub exchange_rate_gbp_per_usd: f64,
    /// Default cell height in mm.
    pub cell_height_mm: f64,
    /// Default gap between adjacent cells in mm.
    pub gap_between_cells_mm: f64,
    /// Default gap at the positive end of a string in mm.
    pub positive_end_gap_mm: f64,
    /// Default gap at the negative end of a string in mm.
    pub negative_end_gap_mm: f64,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            name: "Default MAT Array".to_string(),
            cells_per_string: 20,
            strings_per_array: 4,
            exchange_rate_gbp_per_usd: 0.8,
            cell_height_mm: 6.6,
            gap_between_cells_mm: 1.0,
            positive_end_gap_mm: 5.0,
            negative_end_gap_mm: 5.0,
        }
    }
}

impl Product {
    /// Total number of cells in the full array.
    pub fn cells_per_array(&self) -> u32 {
        self.cells_per_string * self.strings_per_array
    }

    /// Total physical length of one string in mm.
    pub fn total_string_length_mm(&self) -> f64 {
        crate::costing::geometry::string_length_mm(
            self.cells_per_string,
            self.cell_height_mm,
            self.gap_between_cells_mm,
            self.positive_end_gap_mm,
            self.negative_end_gap_mm,
        )
    }
}
