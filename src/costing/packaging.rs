//! Packaging cost: per-unit frame and shipping board, plus box and foam
//! shared across a configurable number of arrays per box.
//!
//! The foam layout is fixed: two 25 mm pieces top and bottom of the box and
//! one 3 mm piece between each pair of adjacent arrays. The catalog must
//! carry exactly one foam item at each of those thicknesses.

use crate::costing::{per_watt, resolvers};
use crate::error::ConfigError;
use crate::models::materials::{FoamItem, PackagingItem, PackagingUnitItem};
use crate::models::selections::PackagingSelection;
use serde::Serialize;

/// Thickness match tolerance for the two foam roles, in mm.
const FOAM_THICKNESS_TOL_MM: f64 = 1e-3;
pub const SEPARATOR_FOAM_THICKNESS_MM: f64 = 3.0;
pub const PADDING_FOAM_THICKNESS_MM: f64 = 25.0;

/// Packaging breakdown for one array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackagingCost {
    pub frame_id: String,
    pub frame_cost_gbp: f64,
    pub board_id: String,
    pub board_cost_gbp: f64,
    pub box_id: String,
    pub box_cost_gbp: f64,
    pub arrays_per_box: u32,
    /// Box plus foam for one full box.
    pub shared_cost_per_box_gbp: f64,
    pub shared_cost_per_unit_gbp: f64,
    pub total_cost_gbp: f64,
    pub cost_per_watt_gbp: f64,
}

fn units_of<'a>(
    packaging: &'a [PackagingItem],
    pick: impl Fn(&'a PackagingItem) -> Option<&'a PackagingUnitItem>,
) -> Vec<&'a PackagingUnitItem> {
    packaging.iter().filter_map(pick).collect()
}

fn unit_for<'a>(
    items: &[&'a PackagingUnitItem],
    wanted: Option<&str>,
    role: &str,
) -> Result<&'a PackagingUnitItem, ConfigError> {
    match wanted {
        None => items.first().copied().ok_or_else(|| {
            ConfigError::MissingRole(format!("no {role} item in the Packaging category"))
        }),
        Some(id) => items
            .iter()
            .find(|u| u.id == id)
            .copied()
            .ok_or_else(|| {
                ConfigError::MaterialNotFound(format!("{role} {id:?} is not in the catalog"))
            }),
    }
}

/// The single foam item at the given thickness, or a configuration error
/// when it is absent or ambiguous.
pub fn foam_at_thickness(
    packaging: &[PackagingItem],
    thickness_mm: f64,
) -> Result<&FoamItem, ConfigError> {
    let matches: Vec<&FoamItem> = packaging
        .iter()
        .filter_map(|item| match item {
            PackagingItem::Foam(f)
                if (f.thickness_mm - thickness_mm).abs() <= FOAM_THICKNESS_TOL_MM =>
            {
                Some(f)
            }
            _ => None,
        })
        .collect();
    match matches.as_slice() {
        [foam] => Ok(foam),
        [] => Err(ConfigError::MissingRole(format!(
            "no foam item at {thickness_mm} mm in the Packaging category"
        ))),
        found => Err(ConfigError::MissingRole(format!(
            "expected one foam item at {thickness_mm} mm, found {}",
            found.len()
        ))),
    }
}

/// Packaging cost for one array.
pub fn calculate(
    packaging: &[PackagingItem],
    exchange_rate_gbp_per_usd: f64,
    selection: &PackagingSelection,
    array_power_w: f64,
) -> Result<PackagingCost, ConfigError> {
    if packaging.is_empty() {
        return Err(ConfigError::EmptyCategory(
            "no items in the Packaging category".to_string(),
        ));
    }
    if selection.arrays_per_box < 1 {
        return Err(ConfigError::InvalidInput(format!(
            "arrays per box must be at least 1, got {}",
            selection.arrays_per_box
        )));
    }

    let rate = exchange_rate_gbp_per_usd;

    let frames = units_of(packaging, |i| match i {
        PackagingItem::Frame(u) => Some(u),
        _ => None,
    });
    let boards = units_of(packaging, |i| match i {
        PackagingItem::ShippingBoard(u) => Some(u),
        _ => None,
    });
    let boxes = units_of(packaging, |i| match i {
        PackagingItem::Box(u) => Some(u),
        _ => None,
    });

    let frame = unit_for(&frames, selection.frame_id.as_deref(), "frame")?;
    let board = unit_for(&boards, selection.board_id.as_deref(), "shipping board")?;
    let shipping_box = unit_for(&boxes, selection.box_id.as_deref(), "box")?;

    let separator_foam = foam_at_thickness(packaging, SEPARATOR_FOAM_THICKNESS_MM)?;
    let padding_foam = foam_at_thickness(packaging, PADDING_FOAM_THICKNESS_MM)?;

    let frame_cost_gbp = resolvers::unit_cost_gbp(frame, rate);
    let board_cost_gbp = resolvers::unit_cost_gbp(board, rate);
    let box_cost_gbp = resolvers::unit_cost_gbp(shipping_box, rate);

    let arrays_per_box = f64::from(selection.arrays_per_box);
    let foam_cost_per_box = 2.0 * resolvers::foam_cost_per_piece(padding_foam, rate)
        + (arrays_per_box - 1.0) * resolvers::foam_cost_per_piece(separator_foam, rate);
    let shared_cost_per_box_gbp = box_cost_gbp + foam_cost_per_box;
    let shared_cost_per_unit_gbp = shared_cost_per_box_gbp / arrays_per_box;

    let total_cost_gbp = frame_cost_gbp + board_cost_gbp + shared_cost_per_unit_gbp;

    Ok(PackagingCost {
        frame_id: frame.id.clone(),
        frame_cost_gbp,
        board_id: board.id.clone(),
        board_cost_gbp,
        box_id: shipping_box.id.clone(),
        box_cost_gbp,
        arrays_per_box: selection.arrays_per_box,
        shared_cost_per_box_gbp,
        shared_cost_per_unit_gbp,
        total_cost_gbp,
        cost_per_watt_gbp: per_watt(total_cost_gbp, array_power_w),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::Currency;

    fn make_unit(id: &str, cost: f64) -> PackagingUnitItem {
        PackagingUnitItem {
            id: id.to_string(),
            name: id.to_string(),
            unit_cost_gbp: Some(cost),
            currency: Currency::Gbp,
            ..PackagingUnitItem::default()
        }
    }

    fn make_foam(id: &str, thickness_mm: f64, cost_per_piece: f64) -> FoamItem {
        FoamItem {
            id: id.to_string(),
            name: id.to_string(),
            thickness_mm,
            num_pieces: Some(10.0),
            total_cost_gbp: Some(cost_per_piece * 10.0),
            currency: Currency::Gbp,
            ..FoamItem::default()
        }
    }

    fn make_catalog() -> Vec<PackagingItem> {
        vec![
            PackagingItem::Frame(make_unit("Frame_A", 3.0)),
            PackagingItem::ShippingBoard(make_unit("Board_A", 1.5)),
            PackagingItem::Box(make_unit("Box_A", 6.0)),
            PackagingItem::Foam(make_foam("Foam_3mm", 3.0, 0.5)),
            PackagingItem::Foam(make_foam("Foam_25mm", 25.0, 2.0)),
        ]
    }

    #[test]
    fn shared_box_cost_split_across_arrays() {
        let cost = calculate(&make_catalog(), 0.8, &PackagingSelection::default(), 11.2)
            .expect("calculate");

        // foam per box = 2*2.0 + 3*0.5 = 5.5; shared = (6.0 + 5.5)/4
        assert!((cost.shared_cost_per_box_gbp - 11.5).abs() < 1e-12);
        assert!((cost.shared_cost_per_unit_gbp - 2.875).abs() < 1e-12);
        assert!((cost.total_cost_gbp - (3.0 + 1.5 + 2.875)).abs() < 1e-12);
    }

    #[test]
    fn single_array_box_has_no_separator_foam() {
        let selection = PackagingSelection {
            arrays_per_box: 1,
            ..PackagingSelection::default()
        };
        let cost = calculate(&make_catalog(), 0.8, &selection, 11.2).expect("calculate");
        // shared = 6.0 + 2*2.0, all charged to one array
        assert!((cost.shared_cost_per_unit_gbp - 10.0).abs() < 1e-12);
    }

    #[test]
    fn missing_foam_thickness_is_a_config_error() {
        let catalog: Vec<PackagingItem> = make_catalog()
            .into_iter()
            .filter(|i| !matches!(i, PackagingItem::Foam(f) if f.thickness_mm == 25.0))
            .collect();
        let err = calculate(&catalog, 0.8, &PackagingSelection::default(), 11.2)
            .expect_err("no 25 mm foam");
        assert!(matches!(err, ConfigError::MissingRole(_)));
    }

    #[test]
    fn duplicate_foam_thickness_is_a_config_error() {
        let mut catalog = make_catalog();
        catalog.push(PackagingItem::Foam(make_foam("Foam_3mm_B", 3.0, 0.4)));
        let err = calculate(&catalog, 0.8, &PackagingSelection::default(), 11.2)
            .expect_err("ambiguous foam");
        assert!(matches!(err, ConfigError::MissingRole(_)));
    }

    #[test]
    fn zero_arrays_per_box_is_rejected() {
        let selection = PackagingSelection {
            arrays_per_box: 0,
            ..PackagingSelection::default()
        };
        let err = calculate(&make_catalog(), 0.8, &selection, 11.2).expect_err("zero apb");
        assert!(matches!(err, ConfigError::InvalidInput(_)));
    }

    #[test]
    fn dangling_box_selection_is_a_config_error() {
        let selection = PackagingSelection {
            box_id: Some("Box_missing".to_string()),
            ..PackagingSelection::default()
        };
        let err = calculate(&make_catalog(), 0.8, &selection, 11.2).expect_err("dangling");
        assert!(matches!(err, ConfigError::MaterialNotFound(_)));
    }
}
