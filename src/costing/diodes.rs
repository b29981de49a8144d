//! Diode category cost: bypass and blocking diodes with their silver tabs
//! and attach welds.
//!
//! Every array carries one bypass diode per cell and exactly two blocking
//! diodes. Each diode's effective cost is its raw material cost divided by
//! the placement yield. The blocking tab geometry and ribbon come from the
//! design record; a dangling design reference zeroes the blocking side and
//! is reported as an issue while the bypass side still computes.

use crate::costing::weld_heads::{head_for_role, WeldRole};
use crate::costing::{per_watt, resolvers, select_item};
use crate::error::ConfigError;
use crate::models::design::ArrayDesign;
use crate::models::materials::{DiodeItem, SilverRibbonItem, WeldHeadItem};
use crate::models::selections::DiodeSelection;
use serde::Serialize;

/// Blocking diodes per array.
pub const BLOCKING_DIODES_PER_ARRAY: u32 = 2;

/// Yield fractions ≤ 0 are treated as a perfect yield.
fn clamped_yield(yield_fraction: f64) -> f64 {
    if yield_fraction > 0.0 {
        yield_fraction
    } else {
        1.0
    }
}

/// Diode category breakdown for one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiodeCost {
    pub bypass_count: u32,
    /// Raw per-diode cost before the yield adjustment.
    pub bypass_raw_cost_gbp: f64,
    pub bypass_effective_cost_gbp: f64,
    pub bypass_total_cost_gbp: f64,
    pub blocking_count: u32,
    pub blocking_effective_cost_gbp: f64,
    pub blocking_total_cost_gbp: f64,
    pub total_cost_gbp: f64,
    pub cost_per_watt_gbp: f64,
    pub issues: Vec<ConfigError>,
}

fn width_override(width_mm: f64) -> Option<f64> {
    (width_mm > 0.0).then_some(width_mm)
}

/// Cost of the bypass and blocking diodes for one array.
pub fn calculate(
    design: &ArrayDesign,
    diodes: &[DiodeItem],
    silver: &[SilverRibbonItem],
    weld_heads: &[WeldHeadItem],
    exchange_rate_gbp_per_usd: f64,
    selection: &DiodeSelection,
    array_power_w: f64,
) -> Result<DiodeCost, ConfigError> {
    if diodes.is_empty() {
        return Err(ConfigError::EmptyCategory(
            "no items in the Diodes category".to_string(),
        ));
    }

    let rate = exchange_rate_gbp_per_usd;
    let mut issues = Vec::new();

    // Bypass: one diode per cell, two tabs cut to the selected width.
    let bypass_diode = select_item(diodes, selection.bypass_diode_id.as_deref(), |d| &d.id)
        .ok_or_else(|| {
            ConfigError::MaterialNotFound(format!(
                "bypass diode {:?} is not in the catalog",
                selection.bypass_diode_id.as_deref().unwrap_or("")
            ))
        })?;
    let bypass_silver = select_item(silver, selection.bypass_silver_id.as_deref(), |s| &s.id)
        .ok_or_else(|| {
            ConfigError::MaterialNotFound(format!(
                "bypass tab silver ribbon {:?} is not in the catalog",
                selection.bypass_silver_id.as_deref().unwrap_or("")
            ))
        })?;

    let al_head = head_for_role(weld_heads, WeldRole::Al)?;
    let au_head = head_for_role(weld_heads, WeldRole::Au)?;
    let bl_head = head_for_role(weld_heads, WeldRole::Bl)?;

    let bypass_tab_cost = 2.0
        * selection.bypass_tab_length_mm
        * resolvers::silver_cost_per_mm(
            bypass_silver,
            rate,
            width_override(selection.bypass_tab_width_mm),
        );
    let bypass_weld_cost = resolvers::weld_cost_per_weld(al_head, rate)
        + resolvers::weld_cost_per_weld(au_head, rate);
    let bypass_raw_cost_gbp = resolvers::diode_unit_price_gbp(bypass_diode, rate)
        + bypass_tab_cost
        + bypass_weld_cost;
    let bypass_effective_cost_gbp =
        bypass_raw_cost_gbp / clamped_yield(selection.bypass_yield_fraction);
    let bypass_count = design.num_cells;
    let bypass_total_cost_gbp = bypass_effective_cost_gbp * f64::from(bypass_count);

    // Blocking: always two per array, tab geometry from the design record.
    let blocking_diode = select_item(diodes, selection.blocking_diode_id.as_deref(), |d| &d.id)
        .ok_or_else(|| {
            ConfigError::MaterialNotFound(format!(
                "blocking diode {:?} is not in the catalog",
                selection.blocking_diode_id.as_deref().unwrap_or("")
            ))
        })?;

    let blocking_silver = match design.blocking_tab_silver_id.as_deref() {
        None => Some(None),
        Some(id) => match silver.iter().find(|s| s.id == id) {
            Some(item) => Some(Some(item)),
            None => {
                issues.push(ConfigError::MaterialNotFound(format!(
                    "blocking tab silver ribbon {id:?} is not in the catalog"
                )));
                None
            }
        },
    };

    let (blocking_effective_cost_gbp, blocking_total_cost_gbp) = match blocking_silver {
        None => (0.0, 0.0),
        Some(tab_silver) => {
            let tab_length_mm = design.blocking_tab_length1_mm + design.blocking_tab_length2_mm;
            let tab_cost = tab_silver
                .map(|s| {
                    tab_length_mm
                        * resolvers::silver_cost_per_mm(
                            s,
                            rate,
                            width_override(design.blocking_tab_width_mm),
                        )
                })
                .unwrap_or(0.0);
            let weld_cost = 2.0 * resolvers::weld_cost_per_weld(bl_head, rate);
            let raw = resolvers::diode_unit_price_gbp(blocking_diode, rate) + tab_cost + weld_cost;
            let effective = raw / clamped_yield(selection.blocking_yield_fraction);
            (effective, effective * f64::from(BLOCKING_DIODES_PER_ARRAY))
        }
    };

    let total_cost_gbp = bypass_total_cost_gbp + blocking_total_cost_gbp;

    Ok(DiodeCost {
        bypass_count,
        bypass_raw_cost_gbp,
        bypass_effective_cost_gbp,
        bypass_total_cost_gbp,
        blocking_count: BLOCKING_DIODES_PER_ARRAY,
        blocking_effective_cost_gbp,
        blocking_total_cost_gbp,
        total_cost_gbp,
        cost_per_watt_gbp: per_watt(total_cost_gbp, array_power_w),
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::Currency;

    fn make_diode(id: &str, unit_cost_gbp: f64) -> DiodeItem {
        DiodeItem {
            id: id.to_string(),
            name: id.to_string(),
            unit_cost_gbp: Some(unit_cost_gbp),
            currency: Currency::Gbp,
            ..DiodeItem::default()
        }
    }

    // Cost/mm at a 1.5 mm tab width comes out to 5e-5.
    fn make_tab_silver() -> SilverRibbonItem {
        SilverRibbonItem {
            id: "Ag_tab".to_string(),
            name: "tab ribbon".to_string(),
            width_mm: Some(2.0),
            thickness_mm: Some(0.1),
            density_g_cm3: Some(10.0),
            price_per_g: Some(0.1 / 3.0),
            price_currency: Currency::Gbp,
            notes: None,
        }
    }

    fn make_heads() -> Vec<WeldHeadItem> {
        WeldRole::ALL
            .iter()
            .map(|&r| WeldHeadItem {
                id: r.material_id().to_string(),
                name: r.material_id().to_string(),
                unit_cost_gbp: Some(100.0),
                currency: Currency::Gbp,
                num_welds: Some(100_000.0),
                ..WeldHeadItem::default()
            })
            .collect()
    }

    fn make_design() -> ArrayDesign {
        ArrayDesign {
            num_cells: 20,
            blocking_tab_silver_id: Some("Ag_tab".to_string()),
            blocking_tab_width_mm: 1.5,
            blocking_tab_length1_mm: 5.0,
            blocking_tab_length2_mm: 5.0,
            ..ArrayDesign::default()
        }
    }

    #[test]
    fn bypass_cost_with_yield_adjustment() {
        let diodes = vec![make_diode("D_bypass", 0.10)];
        let silver = vec![make_tab_silver()];
        let cost = calculate(
            &make_design(),
            &diodes,
            &silver,
            &make_heads(),
            0.8,
            &DiodeSelection::default(),
            11.2,
        )
        .expect("calculate");

        // silver = 2 * 5 * 5e-5 = 0.0005; welds = 0.002; raw = 0.1025
        assert!((cost.bypass_raw_cost_gbp - 0.1025).abs() < 1e-6);
        assert!((cost.bypass_effective_cost_gbp - 0.128125).abs() < 1e-6);
        assert!((cost.bypass_total_cost_gbp - 2.5625).abs() < 1e-5);
        assert_eq!(cost.bypass_count, 20);
        assert!(cost.issues.is_empty());
    }

    #[test]
    fn blocking_cost_is_always_for_two_diodes() {
        let diodes = vec![make_diode("D_bypass", 0.10), make_diode("D_block", 0.50)];
        let silver = vec![make_tab_silver()];
        let selection = DiodeSelection {
            blocking_diode_id: Some("D_block".to_string()),
            ..DiodeSelection::default()
        };
        let cost = calculate(
            &make_design(),
            &diodes,
            &silver,
            &make_heads(),
            0.8,
            &selection,
            11.2,
        )
        .expect("calculate");

        // tabs = 10 * 5e-5 = 0.0005; welds = 2 * 0.001; raw = 0.5025
        let effective = 0.5025 / 0.9;
        assert!((cost.blocking_effective_cost_gbp - effective).abs() < 1e-6);
        assert!((cost.blocking_total_cost_gbp - effective * 2.0).abs() < 1e-6);
        assert_eq!(cost.blocking_count, 2);
    }

    #[test]
    fn dangling_blocking_silver_zeroes_blocking_only() {
        let diodes = vec![make_diode("D_bypass", 0.10)];
        let silver = vec![make_tab_silver()];
        let mut design = make_design();
        design.blocking_tab_silver_id = Some("Ag_missing".to_string());
        let cost = calculate(
            &design,
            &diodes,
            &silver,
            &make_heads(),
            0.8,
            &DiodeSelection::default(),
            11.2,
        )
        .expect("calculate");

        assert_eq!(cost.blocking_total_cost_gbp, 0.0);
        assert_eq!(cost.issues.len(), 1);
        assert!(cost.bypass_total_cost_gbp > 0.0);
    }

    #[test]
    fn zero_yield_is_clamped_to_one() {
        let diodes = vec![make_diode("D_bypass", 0.10)];
        let silver = vec![make_tab_silver()];
        let selection = DiodeSelection {
            bypass_yield_fraction: 0.0,
            ..DiodeSelection::default()
        };
        let cost = calculate(
            &make_design(),
            &diodes,
            &silver,
            &make_heads(),
            0.8,
            &selection,
            11.2,
        )
        .expect("calculate");
        assert!((cost.bypass_effective_cost_gbp - cost.bypass_raw_cost_gbp).abs() < 1e-12);
    }

    #[test]
    fn missing_weld_head_role_fails_the_category() {
        let diodes = vec![make_diode("D_bypass", 0.10)];
        let silver = vec![make_tab_silver()];
        let heads: Vec<WeldHeadItem> = make_heads()
            .into_iter()
            .filter(|h| h.id != "Weld_Head_Au")
            .collect();
        let err = calculate(
            &make_design(),
            &diodes,
            &silver,
            &heads,
            0.8,
            &DiodeSelection::default(),
            11.2,
        )
        .expect_err("missing Au head");
        assert!(matches!(err, ConfigError::MissingRole(_)));
    }

    #[test]
    fn empty_diode_catalog_is_a_config_error() {
        let err = calculate(
            &make_design(),
            &[],
            &[make_tab_silver()],
            &make_heads(),
            0.8,
            &DiodeSelection::default(),
            11.2,
        )
        .expect_err("empty");
        assert!(matches!(err, ConfigError::EmptyCategory(_)));
    }
}
