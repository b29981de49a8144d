//! Weld head consumable cost.
//!
//! Four heads with fixed catalog ids, one per weld chemistry. The Ag head
//! serves the array-level welds; the Al, Au and BL heads serve the diode
//! attach welds and are also charged inside the Diodes category. The
//! category summary therefore charges only the Ag head here; the full
//! per-head table is exposed for display and for material requirements.

use crate::costing::{per_watt, resolvers};
use crate::error::ConfigError;
use crate::models::design::ArrayDesign;
use crate::models::materials::WeldHeadItem;
use serde::Serialize;

/// Fixed weld counts per array that do not scale with the cell count.
const NEGATIVE_END_WELDS: f64 = 8.0;
const POSITIVE_END_WELDS: f64 = 4.0;
const BLOCKING_DIODE_WELDS: f64 = 4.0;

/// The four weld head roles and their fixed catalog ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeldRole {
    Ag,
    Al,
    Au,
    Bl,
}

impl WeldRole {
    pub const ALL: [WeldRole; 4] = [WeldRole::Ag, WeldRole::Al, WeldRole::Au, WeldRole::Bl];

    /// The catalog id a head must carry to fill this role.
    pub fn material_id(self) -> &'static str {
        match self {
            WeldRole::Ag => "Weld_Head_Ag",
            WeldRole::Al => "Weld_Head_Al",
            WeldRole::Au => "Weld_Head_Au",
            WeldRole::Bl => "Weld_Head_BL",
        }
    }
}

/// Look up the head filling `role`, or a configuration error naming it.
pub fn head_for_role(
    weld_heads: &[WeldHeadItem],
    role: WeldRole,
) -> Result<&WeldHeadItem, ConfigError> {
    let id = role.material_id();
    weld_heads
        .iter()
        .find(|h| h.id == id)
        .ok_or_else(|| ConfigError::MissingRole(format!("no weld head with id {id:?}")))
}

/// Weld count and cost for one head over one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadUsage {
    pub role: WeldRole,
    pub head_id: String,
    pub welds_per_array: f64,
    pub cost_per_weld_gbp: f64,
    pub cost_gbp: f64,
}

/// Per-head weld consumable breakdown for one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeldHeadCost {
    pub per_head: Vec<HeadUsage>,
    /// Ag head cost only; the Al/Au/BL welds are already charged inside the
    /// Diodes category.
    pub array_welds_cost_gbp: f64,
    pub cost_per_watt_gbp: f64,
}

/// Welds per array for a given role.
pub fn welds_per_array(design: &ArrayDesign, role: WeldRole) -> f64 {
    let num_cells = f64::from(design.num_cells);
    match role {
        WeldRole::Ag => {
            let top_tabs = f64::from(2 * design.num_cells.saturating_sub(1));
            top_tabs * 4.0 + NEGATIVE_END_WELDS + POSITIVE_END_WELDS + num_cells * 4.0
        }
        WeldRole::Al | WeldRole::Au => num_cells,
        WeldRole::Bl => BLOCKING_DIODE_WELDS,
    }
}

/// Weld head consumable cost for one array. All four roles must be present
/// in the catalog.
pub fn calculate(
    design: &ArrayDesign,
    weld_heads: &[WeldHeadItem],
    exchange_rate_gbp_per_usd: f64,
    array_power_w: f64,
) -> Result<WeldHeadCost, ConfigError> {
    if weld_heads.is_empty() {
        return Err(ConfigError::EmptyCategory(
            "no items in the Weld heads category".to_string(),
        ));
    }

    let mut per_head = Vec::with_capacity(WeldRole::ALL.len());
    for role in WeldRole::ALL {
        let head = head_for_role(weld_heads, role)?;
        let welds = welds_per_array(design, role);
        let cost_per_weld_gbp = resolvers::weld_cost_per_weld(head, exchange_rate_gbp_per_usd);
        per_head.push(HeadUsage {
            role,
            head_id: head.id.clone(),
            welds_per_array: welds,
            cost_per_weld_gbp,
            cost_gbp: welds * cost_per_weld_gbp,
        });
    }

    let array_welds_cost_gbp = per_head
        .iter()
        .find(|u| u.role == WeldRole::Ag)
        .map(|u| u.cost_gbp)
        .unwrap_or(0.0);

    Ok(WeldHeadCost {
        per_head,
        array_welds_cost_gbp,
        cost_per_watt_gbp: per_watt(array_welds_cost_gbp, array_power_w),
    })
}
