//! Labour costing over the process step list.
//!
//! Two layers: per-step standard times normalized to seconds per unit, and
//! the per-array aggregation that scales each step by the quantity its
//! `quantity_source` names. Yield is applied once, at aggregation for
//! per-unit steps.

use crate::error::ConfigError;
use crate::models::labour::{
    OperatorProfile, ProcessStep, QuantitySource, ScalingBasis, UnitBasis,
};
use crate::models::product::Product;
use serde::Serialize;
use tracing::warn;

/// Yield fractions ≤ 0 are treated as a perfect yield.
pub fn clamped_yield(yield_fraction: f64) -> f64 {
    if yield_fraction > 0.0 {
        yield_fraction
    } else {
        if yield_fraction < 0.0 {
            warn!(yield_fraction, "non-positive yield fraction clamped to 1.0");
        }
        1.0
    }
}

/// Refresh each step's stored `time_per_unit_s` from its standard-time
/// entry. Called after editing or upgrading a step list.
pub fn apply_standard_times(steps: &mut [ProcessStep]) {
    for step in steps {
        step.time_per_unit_s = step.timing.raw_time_per_unit_s();
    }
}

/// Seconds per unit after the yield adjustment, for per-step display.
pub fn effective_time_per_unit_s(step: &ProcessStep) -> f64 {
    step.timing.raw_time_per_unit_s() / clamped_yield(step.yield_fraction)
}

/// Labour cost of processing one unit through a step, for per-step display.
pub fn step_cost_per_unit_gbp(step: &ProcessStep, operators: &[OperatorProfile]) -> f64 {
    effective_time_per_unit_s(step) / 3600.0 * step_rate_per_hour(step, operators)
}

/// Sum of the hourly rates of the operators assigned to a step. Empty slots
/// and unknown operator ids contribute nothing.
pub fn step_rate_per_hour(step: &ProcessStep, operators: &[OperatorProfile]) -> f64 {
    step.operators
        .iter()
        .filter_map(|slot| slot.operator_id.as_deref())
        .filter_map(|id| operators.iter().find(|op| op.id == id))
        .map(|op| op.hourly_rate)
        .sum()
}

/// Quantities one array implies for each `quantity_source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabourQuantities {
    pub cells_per_string: u32,
    pub strings_per_array: u32,
    pub bypass_diodes: u32,
    pub blocking_diodes: u32,
}

impl LabourQuantities {
    /// Quantities for building one array of the given product configuration.
    pub fn for_product(product: &Product) -> Self {
        let cells = product.cells_per_array();
        Self {
            cells_per_string: product.cells_per_string,
            strings_per_array: product.strings_per_array,
            bypass_diodes: cells,
            blocking_diodes: 2,
        }
    }

    fn quantity(&self, source: QuantitySource) -> f64 {
        match source {
            QuantitySource::Array => 1.0,
            QuantitySource::Cells => {
                f64::from(self.cells_per_string) * f64::from(self.strings_per_array)
            }
            QuantitySource::Strings => f64::from(self.strings_per_array),
            QuantitySource::BypassDiodes => f64::from(self.bypass_diodes),
            QuantitySource::BlockingDiodes => f64::from(self.blocking_diodes),
            QuantitySource::Unknown => 0.0,
        }
    }
}

/// One step's contribution to the per-array labour total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabourStepResult {
    pub step_id: String,
    pub step_name: String,
    pub quantity: f64,
    pub seconds: f64,
    pub rate_per_hour_gbp: f64,
    pub cost_gbp: f64,
}

/// Labour time and cost for one array across the whole process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabourSummary {
    pub steps: Vec<LabourStepResult>,
    pub total_seconds: f64,
    pub total_hours: f64,
    pub total_cost_gbp: f64,
}

/// Aggregate the process step list to a per-array labour figure.
///
/// Steps with an unrecognized scaling basis are skipped; an unrecognized
/// quantity source scales to zero but the setup time still counts.
pub fn calculate_labour(
    steps: &[ProcessStep],
    operators: &[OperatorProfile],
    quantities: &LabourQuantities,
) -> LabourSummary {
    let mut results = Vec::with_capacity(steps.len());
    for step in steps {
        let (quantity, seconds) = match step.scaling_basis {
            ScalingBasis::PerArray => (1.0, step.time_per_unit_s + step.setup_time_s_per_array),
            ScalingBasis::PerUnit => {
                let quantity = quantities.quantity(step.quantity_source);
                let seconds = (quantity / clamped_yield(step.yield_fraction))
                    * step.time_per_unit_s
                    + step.setup_time_s_per_array;
                (quantity, seconds)
            }
            ScalingBasis::Unknown => {
                warn!(step_id = %step.id, "skipping step with unknown scaling basis");
                continue;
            }
        };
        let rate_per_hour_gbp = step_rate_per_hour(step, operators);
        results.push(LabourStepResult {
            step_id: step.id.clone(),
            step_name: step.name.clone(),
            quantity,
            seconds,
            rate_per_hour_gbp,
            cost_gbp: seconds / 3600.0 * rate_per_hour_gbp,
        });
    }

    let total_seconds: f64 = results.iter().map(|r| r.seconds).sum();
    let total_cost_gbp: f64 = results.iter().map(|r| r.cost_gbp).sum();
    LabourSummary {
        steps: results,
        total_seconds,
        total_hours: total_seconds / 3600.0,
        total_cost_gbp,
    }
}

/// Coarse per-array labour figure used by the overview: sums the cell-basis
/// standard times and scales by the cell count. Diode-basis steps and
/// non-positive times are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabourPerArray {
    pub seconds: f64,
    pub cost_gbp: f64,
}

pub fn labour_per_array(
    steps: &[ProcessStep],
    operators: &[OperatorProfile],
    num_cells: u32,
) -> LabourPerArray {
    let mut seconds = 0.0;
    let mut cost_gbp = 0.0;
    for step in steps {
        if step.timing.unit_basis() != UnitBasis::Cell {
            continue;
        }
        let per_cell_s = step.time_per_unit_s;
        if per_cell_s <= 0.0 {
            continue;
        }
        let step_seconds = per_cell_s * f64::from(num_cells);
        seconds += step_seconds;
        cost_gbp += step_seconds / 3600.0 * step_rate_per_hour(step, operators);
    }
    LabourPerArray { seconds, cost_gbp }
}

/// Validate operator assignments against the profile list.
pub fn check_operator_refs(
    steps: &[ProcessStep],
    operators: &[OperatorProfile],
) -> Vec<ConfigError> {
    let mut issues = Vec::new();
    for step in steps {
        for slot in &step.operators {
            if let Some(id) = slot.operator_id.as_deref() {
                if !operators.iter().any(|op| op.id == id) {
                    issues.push(ConfigError::MaterialNotFound(format!(
                        "step {:?} assigns unknown operator {id:?}",
                        step.id
                    )));
                }
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::labour::{OperatorSlot, StepTiming, TimeUnit};

    fn make_operator(id: &str, hourly_rate: f64) -> OperatorProfile {
        OperatorProfile {
            id: id.to_string(),
            name: id.to_string(),
            job_title: "Technician".to_string(),
            hourly_rate,
        }
    }

    fn make_step(id: &str) -> ProcessStep {
        ProcessStep {
            id: id.to_string(),
            name: id.to_string(),
            ..ProcessStep::default()
        }
    }

    fn quantities() -> LabourQuantities {
        LabourQuantities {
            cells_per_string: 20,
            strings_per_array: 4,
            bypass_diodes: 80,
            blocking_diodes: 2,
        }
    }

    #[test]
    fn clamped_yield_bounds() {
        assert_eq!(clamped_yield(0.8), 0.8);
        assert_eq!(clamped_yield(0.0), 1.0);
        assert_eq!(clamped_yield(-0.5), 1.0);
    }

    #[test]
    fn apply_standard_times_refreshes_stored_figure() {
        let mut step = make_step("weld");
        step.timing = StepTiming::PerBatch {
            basis: UnitBasis::Cell,
            batch_units: 10.0,
            time_value: 5.0,
            time_unit: TimeUnit::Minutes,
        };
        let mut steps = vec![step];
        apply_standard_times(&mut steps);
        assert_eq!(steps[0].time_per_unit_s, 30.0);
    }

    #[test]
    fn effective_time_divides_by_yield() {
        let mut step = make_step("weld");
        step.timing = StepTiming::PerUnit {
            basis: UnitBasis::Cell,
            time_value: 12.0,
            time_unit: TimeUnit::Seconds,
        };
        step.yield_fraction = 0.8;
        assert!((effective_time_per_unit_s(&step) - 15.0).abs() < 1e-12);
        step.yield_fraction = 0.0;
        assert!((effective_time_per_unit_s(&step) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn step_cost_per_unit_uses_effective_time_and_rates() {
        let operators = vec![make_operator("op1", 36.0)];
        let mut step = make_step("weld");
        step.timing = StepTiming::PerUnit {
            basis: UnitBasis::Cell,
            time_value: 15.0,
            time_unit: TimeUnit::Seconds,
        };
        step.yield_fraction = 1.0;
        step.operators = vec![OperatorSlot {
            operator_id: Some("op1".to_string()),
        }];
        // 15 s at £36/h
        assert!((step_cost_per_unit_gbp(&step, &operators) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn per_unit_step_scales_by_quantity_and_yield() {
        let operators = vec![make_operator("op1", 36.0)];
        let mut step = make_step("tab_weld");
        step.scaling_basis = ScalingBasis::PerUnit;
        step.quantity_source = QuantitySource::Cells;
        step.time_per_unit_s = 10.0;
        step.yield_fraction = 0.8;
        step.setup_time_s_per_array = 60.0;
        step.operators = vec![OperatorSlot {
            operator_id: Some("op1".to_string()),
        }];

        let summary = calculate_labour(&[step], &operators, &quantities());
        // (80 / 0.8) * 10 + 60 = 1060 s
        assert!((summary.total_seconds - 1060.0).abs() < 1e-9);
        assert!((summary.total_cost_gbp - 1060.0 / 3600.0 * 36.0).abs() < 1e-9);
        assert_eq!(summary.steps[0].quantity, 80.0);
    }

    #[test]
    fn per_array_step_ignores_quantity_and_yield() {
        let mut step = make_step("inspect");
        step.scaling_basis = ScalingBasis::PerArray;
        step.time_per_unit_s = 300.0;
        step.setup_time_s_per_array = 30.0;
        step.yield_fraction = 0.5;

        let summary = calculate_labour(&[step], &[], &quantities());
        assert!((summary.total_seconds - 330.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_scaling_basis_skips_the_step() {
        let mut step = make_step("mystery");
        step.scaling_basis = ScalingBasis::Unknown;
        step.time_per_unit_s = 100.0;
        step.setup_time_s_per_array = 100.0;

        let summary = calculate_labour(&[step], &[], &quantities());
        assert!(summary.steps.is_empty());
        assert_eq!(summary.total_seconds, 0.0);
    }

    #[test]
    fn unknown_quantity_source_keeps_setup_time() {
        let mut step = make_step("odd");
        step.scaling_basis = ScalingBasis::PerUnit;
        step.quantity_source = QuantitySource::Unknown;
        step.time_per_unit_s = 100.0;
        step.setup_time_s_per_array = 45.0;

        let summary = calculate_labour(&[step], &[], &quantities());
        assert!((summary.total_seconds - 45.0).abs() < 1e-12);
    }

    #[test]
    fn unassigned_slots_cost_nothing() {
        let operators = vec![make_operator("op1", 36.0), make_operator("op2", 48.0)];
        let mut step = make_step("weld");
        step.operators = vec![
            OperatorSlot {
                operator_id: Some("op1".to_string()),
            },
            OperatorSlot { operator_id: None },
            OperatorSlot {
                operator_id: Some("op_gone".to_string()),
            },
        ];
        assert_eq!(step_rate_per_hour(&step, &operators), 36.0);
        let issues = check_operator_refs(&[step], &operators);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn labour_per_array_sums_cell_basis_steps_only() {
        let operators = vec![make_operator("op1", 36.0)];
        let mut cell_step = make_step("weld");
        cell_step.timing = StepTiming::PerUnit {
            basis: UnitBasis::Cell,
            time_value: 10.0,
            time_unit: TimeUnit::Seconds,
        };
        cell_step.time_per_unit_s = 10.0;
        cell_step.operators = vec![OperatorSlot {
            operator_id: Some("op1".to_string()),
        }];
        let mut diode_step = make_step("attach");
        diode_step.timing = StepTiming::PerUnit {
            basis: UnitBasis::Diode,
            time_value: 5.0,
            time_unit: TimeUnit::Seconds,
        };
        diode_step.time_per_unit_s = 5.0;

        let result = labour_per_array(&[cell_step, diode_step], &operators, 80);
        assert!((result.seconds - 800.0).abs() < 1e-12);
        assert!((result.cost_gbp - 800.0 / 3600.0 * 36.0).abs() < 1e-12);
    }
}
