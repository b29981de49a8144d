//! Lamination stack cost.
//!
//! Three independently selected film layers, each cut to the base length
//! plus a per-layer waste allowance, and one welding liner cut to the base
//! length with no waste.

use crate::costing::{geometry, per_watt, resolvers, select_item};
use crate::error::ConfigError;
use crate::models::design::ArrayDesign;
use crate::models::materials::RollItem;
use crate::models::selections::LaminationSelection;
use serde::Serialize;

/// One costed layer of the stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerCost {
    pub item_id: String,
    pub length_m: f64,
    pub cost_gbp: f64,
}

/// Lamination breakdown for one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaminationCost {
    pub layers: Vec<LayerCost>,
    pub liner: LayerCost,
    pub total_cost_gbp: f64,
    pub cost_per_watt_gbp: f64,
}

fn costed_layer(
    rolls: &[RollItem],
    item_id: Option<&str>,
    length_mm: f64,
    exchange_rate_gbp_per_usd: f64,
    role: &str,
) -> Result<LayerCost, ConfigError> {
    let item = select_item(rolls, item_id, |r| &r.id).ok_or_else(|| {
        ConfigError::MaterialNotFound(format!(
            "{role} film {:?} is not in the catalog",
            item_id.unwrap_or("")
        ))
    })?;
    let length_m = length_mm / 1000.0;
    Ok(LayerCost {
        item_id: item.id.clone(),
        length_m,
        cost_gbp: length_m * resolvers::roll_cost_per_m(item, exchange_rate_gbp_per_usd),
    })
}

/// Cost of the lamination stack for one array.
pub fn calculate(
    design: &ArrayDesign,
    rolls: &[RollItem],
    exchange_rate_gbp_per_usd: f64,
    selection: &LaminationSelection,
    array_power_w: f64,
) -> Result<LaminationCost, ConfigError> {
    if rolls.is_empty() {
        return Err(ConfigError::EmptyCategory(
            "no items in the Lamination category".to_string(),
        ));
    }

    let base_mm = geometry::base_length_mm(design);

    let mut layers = Vec::with_capacity(selection.layers.len());
    for (index, layer) in selection.layers.iter().enumerate() {
        layers.push(costed_layer(
            rolls,
            layer.item_id.as_deref(),
            base_mm + layer.waste_mm,
            exchange_rate_gbp_per_usd,
            &format!("lamination layer {}", index + 1),
        )?);
    }
    let liner = costed_layer(
        rolls,
        selection.liner_id.as_deref(),
        base_mm,
        exchange_rate_gbp_per_usd,
        "welding liner",
    )?;

    let total_cost_gbp =
        layers.iter().map(|l| l.cost_gbp).sum::<f64>() + liner.cost_gbp;

    Ok(LaminationCost {
        layers,
        liner,
        total_cost_gbp,
        cost_per_watt_gbp: per_watt(total_cost_gbp, array_power_w),
    })
}
