//! Order scenario planning: how many arrays to build for a power target,
//! or how many a budget buys.

use serde::{Deserialize, Serialize};

/// Per-unit cost figures an order scenario scales up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitCosts {
    pub materials_cost_per_unit_gbp: f64,
    pub labour_cost_per_unit_gbp: f64,
    pub labour_time_per_unit_s: f64,
}

/// Which costs count against a budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBasis {
    #[default]
    Materials,
    MaterialsAndLabour,
}

/// Build plan for a power target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerScenario {
    pub good_units_required: u64,
    pub units_to_build: u64,
    pub expected_scrap: u64,
    pub total_materials_cost_gbp: f64,
    pub effective_cost_per_good_unit_gbp: f64,
    pub total_labour_time_s: f64,
    pub total_labour_cost_gbp: f64,
}

/// Units to build to deliver `target_power_w` of good arrays.
///
/// Returns `None` when the target or the array power is non-positive. A
/// yield fraction ≤ 0 plans no scrap allowance.
pub fn power_scenario(
    target_power_w: f64,
    array_power_w: f64,
    yield_fraction: f64,
    unit_costs: &UnitCosts,
) -> Option<PowerScenario> {
    if target_power_w <= 0.0 || array_power_w <= 0.0 {
        return None;
    }

    let good_units_required = (target_power_w / array_power_w).ceil() as u64;
    let units_to_build = if yield_fraction > 0.0 {
        (good_units_required as f64 / yield_fraction).ceil() as u64
    } else {
        good_units_required
    };
    let expected_scrap = units_to_build.saturating_sub(good_units_required);

    let total_materials_cost_gbp =
        units_to_build as f64 * unit_costs.materials_cost_per_unit_gbp;
    let effective_cost_per_good_unit_gbp =
        total_materials_cost_gbp / good_units_required as f64;

    Some(PowerScenario {
        good_units_required,
        units_to_build,
        expected_scrap,
        total_materials_cost_gbp,
        effective_cost_per_good_unit_gbp,
        total_labour_time_s: units_to_build as f64 * unit_costs.labour_time_per_unit_s,
        total_labour_cost_gbp: units_to_build as f64 * unit_costs.labour_cost_per_unit_gbp,
    })
}

/// Build plan for a fixed budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetScenario {
    pub basis: BudgetBasis,
    pub cost_per_unit_for_budget_gbp: f64,
    pub units_affordable: u64,
    pub good_units_expected: u64,
    pub achievable_power_w: f64,
    pub total_labour_time_s: f64,
    pub total_labour_cost_gbp: f64,
}

/// Units a budget buys under the chosen cost basis.
///
/// Returns `None` when the budget or the per-unit cost is non-positive.
pub fn budget_scenario(
    budget_gbp: f64,
    basis: BudgetBasis,
    array_power_w: f64,
    yield_fraction: f64,
    unit_costs: &UnitCosts,
) -> Option<BudgetScenario> {
    let cost_per_unit = match basis {
        BudgetBasis::Materials => unit_costs.materials_cost_per_unit_gbp,
        BudgetBasis::MaterialsAndLabour => {
            unit_costs.materials_cost_per_unit_gbp + unit_costs.labour_cost_per_unit_gbp
        }
    };
    if budget_gbp <= 0.0 || cost_per_unit <= 0.0 {
        return None;
    }

    let units_affordable = (budget_gbp / cost_per_unit).floor() as u64;
    let yield_fraction = if yield_fraction > 0.0 {
        yield_fraction
    } else {
        1.0
    };
    let good_units_expected = (units_affordable as f64 * yield_fraction).floor() as u64;

    Some(BudgetScenario {
        basis,
        cost_per_unit_for_budget_gbp: cost_per_unit,
        units_affordable,
        good_units_expected,
        achievable_power_w: good_units_expected as f64 * array_power_w.max(0.0),
        total_labour_time_s: units_affordable as f64 * unit_costs.labour_time_per_unit_s,
        total_labour_cost_gbp: units_affordable as f64 * unit_costs.labour_cost_per_unit_gbp,
    })
}

/// Boxes needed to ship `units` at `arrays_per_box` per box.
pub fn boxes_needed(units: u64, arrays_per_box: u32) -> u64 {
    if arrays_per_box == 0 {
        return 0;
    }
    units.div_ceil(u64::from(arrays_per_box))
}
