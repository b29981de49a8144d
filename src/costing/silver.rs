//! Silver ribbon category cost.
//!
//! Three fixed consumers of silver ribbon per array: the top tabs joining
//! adjacent cells, the two negative end bars, and the single negative bar.
//! The top-tab ribbon comes from the caller's selection; the bar ribbons are
//! referenced by the design record itself. A dangling design reference
//! degrades that bar to zero cost and is reported as an issue rather than
//! failing the whole category.

use crate::costing::{per_watt, resolvers, select_item};
use crate::error::ConfigError;
use crate::models::design::ArrayDesign;
use crate::models::materials::SilverRibbonItem;
use crate::models::selections::SilverSelection;
use serde::Serialize;

/// Breakdown of silver ribbon cost for one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SilverCost {
    pub top_tab_count: u32,
    /// Total top-tab ribbon length in mm.
    pub top_tab_length_mm: f64,
    pub top_tabs_cost_gbp: f64,
    /// Total negative end bar length in mm (two bars).
    pub negative_end_length_mm: f64,
    pub negative_end_cost_gbp: f64,
    pub negative_bar_length_mm: f64,
    pub negative_bar_cost_gbp: f64,
    pub total_cost_gbp: f64,
    pub cost_per_watt_gbp: f64,
    pub issues: Vec<ConfigError>,
}

/// Cost of the silver ribbon consumed by one array.
pub fn calculate(
    design: &ArrayDesign,
    silver: &[SilverRibbonItem],
    exchange_rate_gbp_per_usd: f64,
    selection: &SilverSelection,
    array_power_w: f64,
) -> Result<SilverCost, ConfigError> {
    if silver.is_empty() {
        return Err(ConfigError::EmptyCategory(
            "no items in the Silver Ribbon category".to_string(),
        ));
    }

    let top_tab_item = select_item(silver, selection.top_tab_silver_id.as_deref(), |s| &s.id)
        .ok_or_else(|| {
            ConfigError::MaterialNotFound(format!(
                "top tab silver ribbon {:?} is not in the catalog",
                selection.top_tab_silver_id.as_deref().unwrap_or("")
            ))
        })?;

    let mut issues = Vec::new();

    let top_tab_count = 2 * design.num_cells.saturating_sub(1);
    let top_tab_length_mm = f64::from(top_tab_count) * selection.top_tab_length_mm;
    let top_tabs_cost_gbp = top_tab_length_mm
        * resolvers::silver_cost_per_mm(top_tab_item, exchange_rate_gbp_per_usd, None);

    // Bars referenced by the design. A bar with no ribbon reference simply
    // contributes nothing; a reference to a missing item is an issue. Bar
    // ribbon is priced at the catalog item's own width; the design's bar
    // widths are display geometry only.
    let mut bar_cost = |silver_id: &Option<String>, total_length_mm: f64, role: &str| -> f64 {
        let Some(id) = silver_id.as_deref() else {
            return 0.0;
        };
        match silver.iter().find(|s| s.id == id) {
            Some(item) => {
                total_length_mm
                    * resolvers::silver_cost_per_mm(item, exchange_rate_gbp_per_usd, None)
            }
            None => {
                issues.push(ConfigError::MaterialNotFound(format!(
                    "{role} silver ribbon {id:?} is not in the catalog"
                )));
                0.0
            }
        }
    };

    let negative_end_length_mm = design.negative_end_length_mm * 2.0;
    let negative_end_cost_gbp = bar_cost(
        &design.negative_end_silver_id,
        negative_end_length_mm,
        "negative end",
    );

    let negative_bar_length_mm = design.negative_bar_length_mm;
    let negative_bar_cost_gbp = bar_cost(
        &design.negative_bar_silver_id,
        negative_bar_length_mm,
        "negative bar",
    );

    let total_cost_gbp = top_tabs_cost_gbp + negative_end_cost_gbp + negative_bar_cost_gbp;

    Ok(SilverCost {
        top_tab_count,
        top_tab_length_mm,
        top_tabs_cost_gbp,
        negative_end_length_mm,
        negative_end_cost_gbp,
        negative_bar_length_mm,
        negative_bar_cost_gbp,
        total_cost_gbp,
        cost_per_watt_gbp: per_watt(total_cost_gbp, array_power_w),
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::Currency;

    fn make_silver(id: &str, width_mm: f64) -> SilverRibbonItem {
        SilverRibbonItem {
            id: id.to_string(),
            name: format!("{width_mm} mm silver ribbon"),
            width_mm: Some(width_mm),
            thickness_mm: Some(0.0254),
            density_g_cm3: Some(10.49),
            price_per_g: Some(0.8),
            price_currency: Currency::Usd,
            notes: None,
        }
    }

    fn make_design() -> ArrayDesign {
        ArrayDesign {
            name: "20 cell".to_string(),
            num_cells: 20,
            negative_end_silver_id: Some("Ag_4mm".to_string()),
            negative_end_width_mm: 4.0,
            negative_end_length_mm: 10.0,
            negative_bar_silver_id: Some("Ag_4mm".to_string()),
            negative_bar_width_mm: 4.0,
            negative_bar_length_mm: 12.0,
            ..ArrayDesign::default()
        }
    }

    fn catalog() -> Vec<SilverRibbonItem> {
        vec![make_silver("Ag_2mm", 2.0), make_silver("Ag_4mm", 4.0)]
    }

    #[test]
    fn top_tabs_count_and_length() {
        let cost = calculate(
            &make_design(),
            &catalog(),
            0.8,
            &SilverSelection::default(),
            11.2,
        )
        .expect("calculate");
        assert_eq!(cost.top_tab_count, 38);
        assert!((cost.top_tab_length_mm - 190.0).abs() < 1e-9);

        let per_mm = resolvers::silver_cost_per_mm(&make_silver("Ag_2mm", 2.0), 0.8, None);
        assert!((cost.top_tabs_cost_gbp - 190.0 * per_mm).abs() < 1e-12);
        assert!(cost.issues.is_empty());
    }

    #[test]
    fn bars_use_design_lengths() {
        let cost = calculate(
            &make_design(),
            &catalog(),
            0.8,
            &SilverSelection::default(),
            11.2,
        )
        .expect("calculate");
        let per_mm_4 = resolvers::silver_cost_per_mm(&make_silver("Ag_4mm", 4.0), 0.8, None);
        assert!((cost.negative_end_cost_gbp - 20.0 * per_mm_4).abs() < 1e-12);
        assert!((cost.negative_bar_cost_gbp - 12.0 * per_mm_4).abs() < 1e-12);
        assert!(
            (cost.total_cost_gbp
                - (cost.top_tabs_cost_gbp + cost.negative_end_cost_gbp + cost.negative_bar_cost_gbp))
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn bars_priced_at_item_width_not_design_width() {
        let mut design = make_design();
        design.negative_end_width_mm = 6.0;
        design.negative_bar_width_mm = 6.0;
        let cost = calculate(&design, &catalog(), 0.8, &SilverSelection::default(), 11.2)
            .expect("calculate");

        // Referenced ribbon is 4 mm wide; the design's 6 mm bar width is
        // display geometry and must not change the price.
        let per_mm_4 = resolvers::silver_cost_per_mm(&make_silver("Ag_4mm", 4.0), 0.8, None);
        assert!((cost.negative_end_cost_gbp - 20.0 * per_mm_4).abs() < 1e-12);
        assert!((cost.negative_bar_cost_gbp - 12.0 * per_mm_4).abs() < 1e-12);
    }

    #[test]
    fn dangling_bar_reference_degrades_with_issue() {
        let mut design = make_design();
        design.negative_bar_silver_id = Some("Ag_missing".to_string());
        let cost = calculate(&design, &catalog(), 0.8, &SilverSelection::default(), 11.2)
            .expect("calculate");
        assert_eq!(cost.negative_bar_cost_gbp, 0.0);
        assert_eq!(cost.issues.len(), 1);
        assert!(matches!(cost.issues[0], ConfigError::MaterialNotFound(_)));
        // Sibling bar still costed.
        assert!(cost.negative_end_cost_gbp > 0.0);
    }

    #[test]
    fn unreferenced_bar_contributes_nothing() {
        let mut design = make_design();
        design.negative_end_silver_id = None;
        let cost = calculate(&design, &catalog(), 0.8, &SilverSelection::default(), 11.2)
            .expect("calculate");
        assert_eq!(cost.negative_end_cost_gbp, 0.0);
        assert!(cost.issues.is_empty());
    }

    #[test]
    fn empty_category_is_a_config_error() {
        let err = calculate(&make_design(), &[], 0.8, &SilverSelection::default(), 11.2)
            .expect_err("empty catalog");
        assert!(matches!(err, ConfigError::EmptyCategory(_)));
    }

    #[test]
    fn dangling_selection_is_a_config_error() {
        let selection = SilverSelection {
            top_tab_silver_id: Some("Ag_missing".to_string()),
            ..SilverSelection::default()
        };
        let err =
            calculate(&make_design(), &catalog(), 0.8, &selection, 11.2).expect_err("dangling");
        assert!(matches!(err, ConfigError::MaterialNotFound(_)));
    }

    #[test]
    fn per_watt_suppressed_without_power() {
        let cost = calculate(&make_design(), &catalog(), 0.8, &SilverSelection::default(), 0.0)
            .expect("calculate");
        assert_eq!(cost.cost_per_watt_gbp, 0.0);
    }
}
