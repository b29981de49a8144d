//! Pure costing computations.
//!
//! Every function here is a pure function of the design, the catalog, the
//! exchange rate and the caller's selections; nothing in this module touches
//! the filesystem. Each category calculator returns a typed breakdown or a
//! [`ConfigError`](crate::error::ConfigError) scoped to that category.

pub mod diodes;
pub mod geometry;
pub mod labour;
pub mod lamination;
pub mod misc;
pub mod packaging;
pub mod requirements;
pub mod resolvers;
pub mod scenario;
pub mod silver;
pub mod summary;
pub mod tapes;
pub mod weld_heads;

/// Resolve a selection against an ordered catalog list: no selection means
/// the first item, an explicit id must match exactly.
pub(crate) fn select_item<'a, T>(
    items: &'a [T],
    wanted: Option<&str>,
    id_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    match wanted {
        None => items.first(),
        Some(id) => items.iter().find(|item| id_of(item) == id),
    }
}

/// Cost per watt, suppressed when the array produces no power.
pub(crate) fn per_watt(cost: f64, array_power_w: f64) -> f64 {
    if array_power_w > 0.0 {
        cost / array_power_w
    } else {
        0.0
    }
}
