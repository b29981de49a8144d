//! Tape cost: the perimeter seal plus one free-length "other" tape.

use crate::costing::{geometry, per_watt, resolvers, select_item};
use crate::error::ConfigError;
use crate::models::design::ArrayDesign;
use crate::models::materials::RollItem;
use crate::models::selections::TapeSelection;
use serde::Serialize;

/// Tape breakdown for one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TapeCost {
    pub perimeter_tape_id: String,
    pub perimeter_length_m: f64,
    pub perimeter_cost_gbp: f64,
    pub other_tape_id: String,
    pub other_length_m: f64,
    pub other_cost_gbp: f64,
    pub total_cost_gbp: f64,
    pub cost_per_watt_gbp: f64,
}

fn tape_for<'a>(
    tapes: &'a [RollItem],
    wanted: Option<&str>,
    role: &str,
) -> Result<&'a RollItem, ConfigError> {
    select_item(tapes, wanted, |t| &t.id).ok_or_else(|| {
        ConfigError::MaterialNotFound(format!(
            "{role} tape {:?} is not in the catalog",
            wanted.unwrap_or("")
        ))
    })
}

/// Cost of the tapes consumed by one array.
pub fn calculate(
    design: &ArrayDesign,
    tapes: &[RollItem],
    exchange_rate_gbp_per_usd: f64,
    selection: &TapeSelection,
    array_power_w: f64,
) -> Result<TapeCost, ConfigError> {
    if tapes.is_empty() {
        return Err(ConfigError::EmptyCategory(
            "no items in the Tapes category".to_string(),
        ));
    }

    let perimeter_tape = tape_for(tapes, selection.perimeter_tape_id.as_deref(), "perimeter")?;
    let other_tape = tape_for(tapes, selection.other_tape_id.as_deref(), "other")?;

    let base_mm = geometry::base_length_mm(design);
    let perimeter_length_m = geometry::perimeter_length_mm(base_mm) / 1000.0;
    let other_length_m = selection.other_length_mm / 1000.0;

    let perimeter_cost_gbp = perimeter_length_m
        * resolvers::roll_cost_per_m(perimeter_tape, exchange_rate_gbp_per_usd);
    let other_cost_gbp =
        other_length_m * resolvers::roll_cost_per_m(other_tape, exchange_rate_gbp_per_usd);
    let total_cost_gbp = perimeter_cost_gbp + other_cost_gbp;

    Ok(TapeCost {
        perimeter_tape_id: perimeter_tape.id.clone(),
        perimeter_length_m,
        perimeter_cost_gbp,
        other_tape_id: other_tape.id.clone(),
        other_length_m,
        other_cost_gbp,
        total_cost_gbp,
        cost_per_watt_gbp: per_watt(total_cost_gbp, array_power_w),
    })
}
