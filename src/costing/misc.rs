//! Misc consumables: kapton insulation disks and diode-attach epoxy.
//!
//! Kapton is consumed as one punched disk under each bypass diode. Epoxy is
//! entered as a per-diode volume and applied to the two diodes that receive
//! epoxy on every array. A missing kapton or epoxy item zeroes that
//! consumable and is reported as an issue, the sibling is still costed;
//! only an entirely empty Misc category fails the calculation.

use crate::costing::{per_watt, resolvers};
use crate::error::ConfigError;
use crate::models::design::ArrayDesign;
use crate::models::materials::{EpoxyItem, KaptonItem, MiscItem};
use crate::models::selections::MiscSelection;
use serde::Serialize;

/// Diodes that receive epoxy on every array.
pub const EPOXY_DIODES_PER_ARRAY: f64 = 2.0;

/// Misc category breakdown for one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiscCost {
    pub kapton_id: Option<String>,
    pub kapton_disks: u32,
    pub kapton_cost_gbp: f64,
    pub epoxy_id: Option<String>,
    pub epoxy_ml: f64,
    pub epoxy_cost_gbp: f64,
    pub total_cost_gbp: f64,
    pub cost_per_watt_gbp: f64,
    pub issues: Vec<ConfigError>,
}

fn find_kapton(misc: &[MiscItem]) -> Option<&KaptonItem> {
    misc.iter().find_map(|item| match item {
        MiscItem::Kapton(k) => Some(k),
        MiscItem::Epoxy(_) => None,
    })
}

/// The selected epoxy item. No selection means the first epoxy in the
/// list (`Ok(None)` when there is none at all); an explicit id that is not
/// in the catalog is a configuration error.
fn find_epoxy<'a>(
    misc: &'a [MiscItem],
    wanted: Option<&str>,
) -> Result<Option<&'a EpoxyItem>, ConfigError> {
    let mut epoxies = misc.iter().filter_map(|item| match item {
        MiscItem::Epoxy(e) => Some(e),
        MiscItem::Kapton(_) => None,
    });
    match wanted {
        None => Ok(epoxies.next()),
        Some(id) => epoxies
            .find(|e| e.id == id)
            .map(Some)
            .ok_or_else(|| {
                ConfigError::MaterialNotFound(format!("epoxy {id:?} is not in the catalog"))
            }),
    }
}

/// Cost of the misc consumables for one array.
pub fn calculate(
    design: &ArrayDesign,
    misc: &[MiscItem],
    exchange_rate_gbp_per_usd: f64,
    selection: &MiscSelection,
    array_power_w: f64,
) -> Result<MiscCost, ConfigError> {
    if misc.is_empty() {
        return Err(ConfigError::EmptyCategory(
            "no items in the Misc category".to_string(),
        ));
    }

    let mut issues = Vec::new();

    let kapton = find_kapton(misc);
    if kapton.is_none() {
        issues.push(ConfigError::MissingRole(
            "no kapton item in the Misc category".to_string(),
        ));
    }
    let epoxy = find_epoxy(misc, selection.epoxy_id.as_deref())?;
    if epoxy.is_none() {
        issues.push(ConfigError::MissingRole(
            "no epoxy item in the Misc category".to_string(),
        ));
    }

    let kapton_disks = if kapton.is_some() { design.num_cells } else { 0 };
    let kapton_cost_gbp = kapton
        .map(|k| {
            f64::from(design.num_cells)
                * resolvers::kapton_cost_per_disk(k, exchange_rate_gbp_per_usd)
        })
        .unwrap_or(0.0);

    let epoxy_ml = if epoxy.is_some() {
        selection.epoxy_per_diode_ml * EPOXY_DIODES_PER_ARRAY
    } else {
        0.0
    };
    let epoxy_cost_gbp = epoxy
        .map(|e| epoxy_ml * resolvers::epoxy_cost_per_ml(e, exchange_rate_gbp_per_usd))
        .unwrap_or(0.0);

    let total_cost_gbp = kapton_cost_gbp + epoxy_cost_gbp;

    Ok(MiscCost {
        kapton_id: kapton.map(|k| k.id.clone()),
        kapton_disks,
        kapton_cost_gbp,
        epoxy_id: epoxy.map(|e| e.id.clone()),
        epoxy_ml,
        epoxy_cost_gbp,
        total_cost_gbp,
        cost_per_watt_gbp: per_watt(total_cost_gbp, array_power_w),
        issues,
    })
}
