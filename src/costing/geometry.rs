//! String geometry and electrical power figures.

use crate::models::design::{ArrayDesign, Illumination};
use serde::Serialize;

/// Active cell area: 20 cm² expressed in m².
pub const CELL_AREA_M2: f64 = 0.002;
/// AM1.5G irradiance in W/m² (typical lab conditions).
pub const IRRADIANCE_AM15: f64 = 1000.0;
/// AM0 irradiance in W/m² (approximate solar constant).
pub const IRRADIANCE_AM0: f64 = 1366.0;
/// Fixed corner/overlap allowance added to the perimeter taping run, in mm.
pub const PERIMETER_ALLOWANCE_MM: f64 = 140.0;

/// Physical length of a string of `num_cells` cells in mm.
///
/// `pos_gap + neg_gap + n * cell_height + max(n - 1, 0) * gap`; a cell
/// count of zero contributes no gap term.
pub fn string_length_mm(
    num_cells: u32,
    cell_height_mm: f64,
    gap_between_cells_mm: f64,
    positive_end_gap_mm: f64,
    negative_end_gap_mm: f64,
) -> f64 {
    let n = f64::from(num_cells);
    let gaps = f64::from(num_cells.saturating_sub(1));
    positive_end_gap_mm + negative_end_gap_mm + n * cell_height_mm + gaps * gap_between_cells_mm
}

/// Base lamination/taping length of the design in mm.
pub fn base_length_mm(design: &ArrayDesign) -> f64 {
    string_length_mm(
        design.num_cells,
        design.cell_height_mm,
        design.gap_between_cells_mm,
        design.positive_end_gap_mm,
        design.negative_end_gap_mm,
    )
}

/// Perimeter taping run for a given base length, in mm.
pub fn perimeter_length_mm(base_length_mm: f64) -> f64 {
    2.0 * base_length_mm + PERIMETER_ALLOWANCE_MM
}

/// Electrical power of one cell and of the whole array, in watts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerFigures {
    pub p_cell_w: f64,
    pub p_array_w: f64,
}

/// Power figures for a design under the given illumination.
pub fn power(design: &ArrayDesign, illumination: Illumination) -> PowerFigures {
    let irradiance = match illumination {
        Illumination::Am15 => IRRADIANCE_AM15,
        Illumination::Am0 => IRRADIANCE_AM0,
    };
    let p_cell_w = design.efficiency(illumination) * irradiance * CELL_AREA_M2;
    PowerFigures {
        p_cell_w,
        p_array_w: p_cell_w * f64::from(design.num_cells),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_design() -> ArrayDesign {
        ArrayDesign {
            name: "20 cell".to_string(),
            num_cells: 20,
            eff_am15_percent: 28.0,
            eff_am0_percent: 25.0,
            cell_height_mm: 6.6,
            gap_between_cells_mm: 1.0,
            positive_end_gap_mm: 5.0,
            negative_end_gap_mm: 5.0,
            ..ArrayDesign::default()
        }
    }

    #[test]
    fn string_length_sums_cells_gaps_and_end_gaps() {
        // 5 + 5 + 20 * 6.6 + 19 * 1.0
        assert!((string_length_mm(20, 6.6, 1.0, 5.0, 5.0) - 161.0).abs() < 1e-9);
    }

    #[test]
    fn string_length_without_end_gaps() {
        assert!((string_length_mm(20, 6.6, 1.0, 0.0, 0.0) - 151.0).abs() < 1e-9);
    }

    #[test]
    fn zero_cells_has_no_gap_term() {
        assert_eq!(string_length_mm(0, 6.6, 1.0, 5.0, 5.0), 10.0);
        assert!((string_length_mm(1, 6.6, 1.0, 5.0, 5.0) - 16.6).abs() < 1e-9);
    }

    #[test]
    fn perimeter_adds_fixed_allowance() {
        assert!((perimeter_length_mm(151.0) - 442.0).abs() < 1e-9);
    }

    #[test]
    fn power_per_cell_and_array_are_consistent() {
        let d = make_design();
        let p15 = power(&d, Illumination::Am15);
        // 0.28 * 1000 * 0.002
        assert!((p15.p_cell_w - 0.56).abs() < 1e-12);
        assert!((p15.p_array_w - p15.p_cell_w * 20.0).abs() < 1e-12);

        let p0 = power(&d, Illumination::Am0);
        assert!((p0.p_cell_w - 0.25 * 1366.0 * 0.002).abs() < 1e-12);
    }

    #[test]
    fn zero_efficiency_means_zero_power() {
        let mut d = make_design();
        d.eff_am15_percent = 0.0;
        assert_eq!(power(&d, Illumination::Am15).p_array_w, 0.0);
    }
}
