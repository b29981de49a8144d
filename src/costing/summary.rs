//! Per-array cost aggregation across the seven material categories.
//!
//! One category failing its configuration check must not hide the others,
//! so each row carries its own `Result`; the totals sum the rows that
//! computed. The Weld heads row charges only the Ag head, the diode-attach
//! heads are already inside the Diodes row.

use crate::costing::{
    diodes, lamination, misc, packaging, per_watt, silver, tapes, weld_heads,
};
use crate::error::ConfigError;
use crate::models::design::{ArrayDesign, Illumination};
use crate::models::materials::Catalog;
use crate::models::selections::Selections;
use serde::Serialize;
use tracing::debug;

/// The seven material cost categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Silver,
    Diodes,
    WeldHeads,
    Lamination,
    Tapes,
    Misc,
    Packaging,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Silver,
        Category::Diodes,
        Category::WeldHeads,
        Category::Lamination,
        Category::Tapes,
        Category::Misc,
        Category::Packaging,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Silver => "Silver",
            Category::Diodes => "Diodes",
            Category::WeldHeads => "Weld heads",
            Category::Lamination => "Lamination",
            Category::Tapes => "Tapes",
            Category::Misc => "Misc",
            Category::Packaging => "Packaging",
        }
    }
}

/// A computed category cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryCost {
    pub cost_per_array_gbp: f64,
    pub cost_per_watt_gbp: f64,
}

/// One summary row: either the category cost or the configuration error
/// that prevented it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: Category,
    pub outcome: Result<CategoryCost, ConfigError>,
    /// Non-fatal problems from categories that still produced a figure.
    pub issues: Vec<ConfigError>,
}

/// Full per-array materials cost summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub rows: Vec<CategoryRow>,
    pub array_power_w: f64,
    /// Sum over the rows that computed.
    pub total_cost_per_array_gbp: f64,
    pub total_cost_per_watt_gbp: f64,
}

impl CostSummary {
    pub fn row(&self, category: Category) -> Option<&CategoryRow> {
        self.rows.iter().find(|r| r.category == category)
    }
}

/// Compute all seven category costs for one array.
pub fn summarize(
    design: &ArrayDesign,
    catalog: &Catalog,
    exchange_rate_gbp_per_usd: f64,
    selections: &Selections,
    illumination: Illumination,
) -> CostSummary {
    let rate = exchange_rate_gbp_per_usd;
    let power = crate::costing::geometry::power(design, illumination);
    let array_power_w = power.p_array_w;

    let mut rows = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let (outcome, issues) = match category {
            Category::Silver => {
                match silver::calculate(
                    design,
                    &catalog.silver_ribbon,
                    rate,
                    &selections.silver,
                    array_power_w,
                ) {
                    Ok(c) => (
                        Ok(CategoryCost {
                            cost_per_array_gbp: c.total_cost_gbp,
                            cost_per_watt_gbp: c.cost_per_watt_gbp,
                        }),
                        c.issues,
                    ),
                    Err(e) => (Err(e), Vec::new()),
                }
            }
            Category::Diodes => {
                match diodes::calculate(
                    design,
                    &catalog.diodes,
                    &catalog.silver_ribbon,
                    &catalog.weld_heads,
                    rate,
                    &selections.diodes,
                    array_power_w,
                ) {
                    Ok(c) => (
                        Ok(CategoryCost {
                            cost_per_array_gbp: c.total_cost_gbp,
                            cost_per_watt_gbp: c.cost_per_watt_gbp,
                        }),
                        c.issues,
                    ),
                    Err(e) => (Err(e), Vec::new()),
                }
            }
            Category::WeldHeads => {
                match weld_heads::calculate(design, &catalog.weld_heads, rate, array_power_w) {
                    Ok(c) => (
                        Ok(CategoryCost {
                            cost_per_array_gbp: c.array_welds_cost_gbp,
                            cost_per_watt_gbp: c.cost_per_watt_gbp,
                        }),
                        Vec::new(),
                    ),
                    Err(e) => (Err(e), Vec::new()),
                }
            }
            Category::Lamination => {
                match lamination::calculate(
                    design,
                    &catalog.lamination,
                    rate,
                    &selections.lamination,
                    array_power_w,
                ) {
                    Ok(c) => (
                        Ok(CategoryCost {
                            cost_per_array_gbp: c.total_cost_gbp,
                            cost_per_watt_gbp: c.cost_per_watt_gbp,
                        }),
                        Vec::new(),
                    ),
                    Err(e) => (Err(e), Vec::new()),
                }
            }
            Category::Tapes => {
                match tapes::calculate(
                    design,
                    &catalog.tapes,
                    rate,
                    &selections.tapes,
                    array_power_w,
                ) {
                    Ok(c) => (
                        Ok(CategoryCost {
                            cost_per_array_gbp: c.total_cost_gbp,
                            cost_per_watt_gbp: c.cost_per_watt_gbp,
                        }),
                        Vec::new(),
                    ),
                    Err(e) => (Err(e), Vec::new()),
                }
            }
            Category::Misc => {
                match misc::calculate(design, &catalog.misc, rate, &selections.misc, array_power_w)
                {
                    Ok(c) => (
                        Ok(CategoryCost {
                            cost_per_array_gbp: c.total_cost_gbp,
                            cost_per_watt_gbp: c.cost_per_watt_gbp,
                        }),
                        c.issues,
                    ),
                    Err(e) => (Err(e), Vec::new()),
                }
            }
            Category::Packaging => {
                match packaging::calculate(
                    &catalog.packaging,
                    rate,
                    &selections.packaging,
                    array_power_w,
                ) {
                    Ok(c) => (
                        Ok(CategoryCost {
                            cost_per_array_gbp: c.total_cost_gbp,
                            cost_per_watt_gbp: c.cost_per_watt_gbp,
                        }),
                        Vec::new(),
                    ),
                    Err(e) => (Err(e), Vec::new()),
                }
            }
        };
        if let Err(err) = &outcome {
            debug!(category = category.label(), %err, "category not costed");
        }
        rows.push(CategoryRow {
            category,
            outcome,
            issues,
        });
    }

    let total_cost_per_array_gbp: f64 = rows
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|c| c.cost_per_array_gbp)
        .sum();

    CostSummary {
        rows,
        array_power_w,
        total_cost_per_array_gbp,
        total_cost_per_watt_gbp: per_watt(total_cost_per_array_gbp, array_power_w),
    }
}
