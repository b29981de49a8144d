//! Unit-cost resolvers for raw catalog items.
//!
//! Shared contract: a missing or non-positive required field resolves to a
//! cost of 0.0 — incomplete catalog records are neutral, never an error.
//! USD prices are converted through [`Currency::to_gbp`] exactly once.

use crate::models::materials::{
    Currency, DiodeItem, EpoxyItem, FoamItem, KaptonItem, PackagingUnitItem, RollItem,
    SilverRibbonItem, WeldHeadItem,
};

/// Cost of one mm of silver ribbon in GBP, derived from the cross-section,
/// density and price per gram.
///
/// `override_width_mm` substitutes the ribbon's stored width; diode tabs are
/// cut to a custom width from the same stock.
pub fn silver_cost_per_mm(
    item: &SilverRibbonItem,
    exchange_rate_gbp_per_usd: f64,
    override_width_mm: Option<f64>,
) -> f64 {
    let width_mm = override_width_mm.or(item.width_mm).unwrap_or(0.0);
    let thickness_mm = item.thickness_mm.unwrap_or(0.0);
    let density_g_cm3 = item.density_g_cm3.unwrap_or(0.0);
    if width_mm <= 0.0 || thickness_mm <= 0.0 || density_g_cm3 <= 0.0 {
        return 0.0;
    }

    let price_per_g_gbp = item
        .price_currency
        .to_gbp(item.price_per_g.unwrap_or(0.0), exchange_rate_gbp_per_usd);

    // 1 mm of ribbon: width and thickness to cm, length 0.1 cm.
    let volume_cm3_per_mm = (width_mm / 10.0) * (thickness_mm / 10.0) * 0.1;
    let grams_per_mm = volume_cm3_per_mm * density_g_cm3;

    grams_per_mm * price_per_g_gbp
}

/// Unit price of a diode in GBP. The quoted currency decides which cost
/// field is consulted.
pub fn diode_unit_price_gbp(item: &DiodeItem, exchange_rate_gbp_per_usd: f64) -> f64 {
    match item.currency {
        Currency::Usd => item
            .unit_cost_usd
            .map(|c| c * exchange_rate_gbp_per_usd)
            .unwrap_or(0.0),
        Currency::Gbp => item.unit_cost_gbp.unwrap_or(0.0),
    }
}

/// Cost of a single weld in GBP: head unit price over its lifetime weld
/// count.
pub fn weld_cost_per_weld(item: &WeldHeadItem, exchange_rate_gbp_per_usd: f64) -> f64 {
    let num_welds = item.num_welds.unwrap_or(0.0);
    if num_welds <= 0.0 {
        return 0.0;
    }
    let unit_cost_gbp = match item.currency {
        Currency::Usd => match item.unit_cost_usd {
            Some(c) => c * exchange_rate_gbp_per_usd,
            None => return 0.0,
        },
        Currency::Gbp => match item.unit_cost_gbp {
            Some(c) => c,
            None => return 0.0,
        },
    };
    unit_cost_gbp / num_welds
}

/// Cost per metre of roll stock (lamination films and tapes) in GBP.
/// A direct GBP roll cost is preferred over the USD one.
pub fn roll_cost_per_m(item: &RollItem, exchange_rate_gbp_per_usd: f64) -> f64 {
    let length_value = item.roll_length_value.unwrap_or(0.0);
    if length_value <= 0.0 {
        return 0.0;
    }
    let roll_length_m = item.roll_length_unit.to_metres(length_value);

    if let Some(cost_gbp) = item.roll_cost_gbp {
        return cost_gbp / roll_length_m;
    }
    if let Some(cost_usd) = item.roll_cost_usd {
        return cost_usd * exchange_rate_gbp_per_usd / roll_length_m;
    }
    0.0
}

/// Cost of one kapton disk in GBP.
pub fn kapton_cost_per_disk(item: &KaptonItem, exchange_rate_gbp_per_usd: f64) -> f64 {
    if let Some(cost) = item.cost_per_disk_gbp {
        return cost;
    }
    let disks = item.disks_per_roll.unwrap_or(0.0);
    if disks <= 0.0 {
        return 0.0;
    }
    if let Some(total_gbp) = item.total_cost_gbp {
        return total_gbp / disks;
    }
    if let (Some(roll_usd), Currency::Usd) = (item.roll_cost_usd, item.currency) {
        return roll_usd * exchange_rate_gbp_per_usd / disks;
    }
    0.0
}

/// Cost of one mL of epoxy in GBP.
pub fn epoxy_cost_per_ml(item: &EpoxyItem, exchange_rate_gbp_per_usd: f64) -> f64 {
    if let Some(cost) = item.cost_per_ml_gbp {
        return cost;
    }
    let volume_ml = item.volume_ml.unwrap_or(0.0);
    if volume_ml <= 0.0 {
        return 0.0;
    }
    if let Some(total_gbp) = item.total_cost_gbp {
        return total_gbp / volume_ml;
    }
    if let (Some(total_usd), Currency::Usd) = (item.total_cost_usd, item.currency) {
        return total_usd * exchange_rate_gbp_per_usd / volume_ml;
    }
    0.0
}

/// Unit cost in GBP for frames, shipping boards and boxes. A direct GBP
/// price is preferred; the USD price only applies when the item is quoted
/// in USD.
pub fn unit_cost_gbp(item: &PackagingUnitItem, exchange_rate_gbp_per_usd: f64) -> f64 {
    if let Some(cost) = item.unit_cost_gbp {
        return cost;
    }
    if let (Some(cost_usd), Currency::Usd) = (item.unit_cost_usd, item.currency) {
        return cost_usd * exchange_rate_gbp_per_usd;
    }
    0.0
}

/// Cost of one foam piece in GBP: batch cost over the piece count.
pub fn foam_cost_per_piece(item: &FoamItem, exchange_rate_gbp_per_usd: f64) -> f64 {
    let num_pieces = item.num_pieces.unwrap_or(0.0);
    if num_pieces <= 0.0 {
        return 0.0;
    }
    if let Some(total_gbp) = item.total_cost_gbp {
        return total_gbp / num_pieces;
    }
    if let (Some(total_usd), Currency::Usd) = (item.total_cost_usd, item.currency) {
        return total_usd * exchange_rate_gbp_per_usd / num_pieces;
    }
    0.0
}
