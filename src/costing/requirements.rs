//! Physical material requirements for an order of a given size.
//!
//! Best-effort quantity takeoff: every category's per-array consumption
//! scaled by the number of arrays to build. Costing problems (dangling
//! references, missing roles) simply omit the affected line, the order
//! scenario already surfaces them through the cost summary.

use crate::costing::weld_heads::{welds_per_array, WeldRole};
use crate::costing::{geometry, scenario, select_item};
use crate::models::design::ArrayDesign;
use crate::models::materials::{Catalog, MiscItem};
use crate::models::selections::Selections;
use serde::Serialize;

/// Silver ribbon consumption, accumulated per catalog item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SilverUsage {
    pub id: String,
    pub per_array_m: f64,
    pub total_m: f64,
}

/// Welds consumed per head role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeldUsage {
    pub role: WeldRole,
    pub per_array: f64,
    pub total: f64,
}

/// A length-consuming line (lamination layer or tape run).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthUsage {
    pub label: String,
    pub item_id: String,
    pub per_array_m: f64,
    pub total_m: f64,
}

/// Packaging piece counts for the whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackagingUsage {
    pub frames: u64,
    pub boards: u64,
    pub boxes: u64,
    pub padding_foam_pieces: u64,
    pub separator_foam_pieces: u64,
}

/// Full quantity takeoff for an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRequirements {
    pub arrays_to_build: u64,
    pub silver: Vec<SilverUsage>,
    pub welds: Vec<WeldUsage>,
    pub bypass_diodes: u64,
    pub blocking_diodes: u64,
    pub kapton_disks: u64,
    pub epoxy_ml: f64,
    pub lamination: Vec<LengthUsage>,
    pub tapes: Vec<LengthUsage>,
    pub packaging: Option<PackagingUsage>,
}

fn add_silver(usages: &mut Vec<SilverUsage>, id: &str, per_array_mm: f64) {
    if per_array_mm <= 0.0 {
        return;
    }
    let per_array_m = per_array_mm / 1000.0;
    match usages.iter_mut().find(|u| u.id == id) {
        Some(u) => u.per_array_m += per_array_m,
        None => usages.push(SilverUsage {
            id: id.to_string(),
            per_array_m,
            total_m: 0.0,
        }),
    }
}

/// Material quantities needed to build `arrays_to_build` arrays.
pub fn material_requirements(
    design: &ArrayDesign,
    catalog: &Catalog,
    selections: &Selections,
    arrays_to_build: u64,
) -> MaterialRequirements {
    let units = arrays_to_build as f64;
    let num_cells = u64::from(design.num_cells);

    // Silver, accumulated per ribbon id in first-use order.
    let mut silver = Vec::new();
    let top_tab_item = select_item(
        &catalog.silver_ribbon,
        selections.silver.top_tab_silver_id.as_deref(),
        |s| &s.id,
    );
    if let Some(item) = top_tab_item {
        let top_tab_mm = f64::from(2 * design.num_cells.saturating_sub(1))
            * selections.silver.top_tab_length_mm;
        add_silver(&mut silver, &item.id, top_tab_mm);
    }
    if let Some(id) = design.negative_end_silver_id.as_deref() {
        if catalog.find_silver(id).is_some() {
            add_silver(&mut silver, id, design.negative_end_length_mm * 2.0);
        }
    }
    if let Some(id) = design.negative_bar_silver_id.as_deref() {
        if catalog.find_silver(id).is_some() {
            add_silver(&mut silver, id, design.negative_bar_length_mm);
        }
    }
    let bypass_silver = select_item(
        &catalog.silver_ribbon,
        selections.diodes.bypass_silver_id.as_deref(),
        |s| &s.id,
    );
    if let Some(item) = bypass_silver {
        let bypass_tab_mm =
            2.0 * selections.diodes.bypass_tab_length_mm * f64::from(design.num_cells);
        add_silver(&mut silver, &item.id, bypass_tab_mm);
    }
    if let Some(id) = design.blocking_tab_silver_id.as_deref() {
        if catalog.find_silver(id).is_some() {
            let blocking_tab_mm =
                (design.blocking_tab_length1_mm + design.blocking_tab_length2_mm) * 2.0;
            add_silver(&mut silver, id, blocking_tab_mm);
        }
    }
    for usage in &mut silver {
        usage.total_m = usage.per_array_m * units;
    }

    let welds = WeldRole::ALL
        .iter()
        .map(|&role| {
            let per_array = welds_per_array(design, role);
            WeldUsage {
                role,
                per_array,
                total: per_array * units,
            }
        })
        .collect();

    let base_mm = geometry::base_length_mm(design);
    let mut lamination = Vec::new();
    for (index, layer) in selections.lamination.layers.iter().enumerate() {
        if let Some(item) = select_item(&catalog.lamination, layer.item_id.as_deref(), |r| &r.id) {
            let per_array_m = (base_mm + layer.waste_mm) / 1000.0;
            lamination.push(LengthUsage {
                label: format!("Layer {}", index + 1),
                item_id: item.id.clone(),
                per_array_m,
                total_m: per_array_m * units,
            });
        }
    }
    if let Some(item) = select_item(
        &catalog.lamination,
        selections.lamination.liner_id.as_deref(),
        |r| &r.id,
    ) {
        let per_array_m = base_mm / 1000.0;
        lamination.push(LengthUsage {
            label: "Welding liner".to_string(),
            item_id: item.id.clone(),
            per_array_m,
            total_m: per_array_m * units,
        });
    }

    let mut tapes = Vec::new();
    if let Some(item) = select_item(
        &catalog.tapes,
        selections.tapes.perimeter_tape_id.as_deref(),
        |r| &r.id,
    ) {
        let per_array_m = geometry::perimeter_length_mm(base_mm) / 1000.0;
        tapes.push(LengthUsage {
            label: "Perimeter tape".to_string(),
            item_id: item.id.clone(),
            per_array_m,
            total_m: per_array_m * units,
        });
    }
    if let Some(item) = select_item(
        &catalog.tapes,
        selections.tapes.other_tape_id.as_deref(),
        |r| &r.id,
    ) {
        let per_array_m = selections.tapes.other_length_mm / 1000.0;
        if per_array_m > 0.0 {
            tapes.push(LengthUsage {
                label: "Other tape".to_string(),
                item_id: item.id.clone(),
                per_array_m,
                total_m: per_array_m * units,
            });
        }
    }

    // Consumables only count when the catalog actually stocks the item.
    let kapton_has_item = catalog
        .misc
        .iter()
        .any(|i| matches!(i, MiscItem::Kapton(_)));
    let kapton_disks = if kapton_has_item {
        num_cells * arrays_to_build
    } else {
        0
    };
    let epoxy_has_item = catalog
        .misc
        .iter()
        .any(|i| matches!(i, MiscItem::Epoxy(_)));
    let epoxy_ml = if epoxy_has_item {
        selections.misc.epoxy_per_diode_ml * crate::costing::misc::EPOXY_DIODES_PER_ARRAY * units
    } else {
        0.0
    };

    let packaging = (selections.packaging.arrays_per_box >= 1).then(|| {
        let boxes = scenario::boxes_needed(arrays_to_build, selections.packaging.arrays_per_box);
        PackagingUsage {
            frames: arrays_to_build,
            boards: arrays_to_build,
            boxes,
            padding_foam_pieces: 2 * boxes,
            separator_foam_pieces: u64::from(selections.packaging.arrays_per_box - 1) * boxes,
        }
    });

    MaterialRequirements {
        arrays_to_build,
        silver,
        welds,
        bypass_diodes: num_cells * arrays_to_build,
        blocking_diodes: 2 * arrays_to_build,
        kapton_disks,
        epoxy_ml,
        lamination,
        tapes,
        packaging,
    }
}
