//! Materials catalog data model.
//!
//! The catalog maps to `materials.yaml`: seven fixed categories, each an
//! ordered list of typed items. Category keys keep their historical YAML
//! spellings (`"Silver Ribbon"`, `"Weld heads"`, ...). Type-discriminated
//! categories (Misc, Packaging) use internally tagged enums on the `type`
//! key so each variant carries only the fields that make sense for it.
//!
//! Price fields are deliberately `Option<f64>`: an absent or unusable price
//! means the unit-cost resolvers yield 0.0, never an error.

use serde::{Deserialize, Serialize};

/// Currency a catalog price is quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "GBP", alias = "gbp")]
    Gbp,
    #[serde(rename = "USD", alias = "usd")]
    Usd,
}

impl Currency {
    /// Convert `amount` quoted in `self` to GBP. The exchange rate is applied
    /// here and nowhere else.
    pub fn to_gbp(self, amount: f64, exchange_rate_gbp_per_usd: f64) -> f64 {
        match self {
            Currency::Gbp => amount,
            Currency::Usd => amount * exchange_rate_gbp_per_usd,
        }
    }

    /// serde default helper for fields that historically defaulted to USD.
    pub fn usd() -> Self {
        Currency::Usd
    }
}

/// Unit a roll length is quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    M,
    #[serde(alias = "foot", alias = "feet")]
    Ft,
}

impl LengthUnit {
    /// Convert a length quoted in `self` to metres.
    pub fn to_metres(self, value: f64) -> f64 {
        match self {
            LengthUnit::M => value,
            LengthUnit::Ft => value * 0.3048,
        }
    }
}

/// A silver ribbon stock item. Cost per mm is derived from the ribbon
/// cross-section, density and price per gram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilverRibbonItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_g_cm3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_g: Option<f64>,
    #[serde(default = "Currency::usd")]
    pub price_currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A diode stock item, priced per unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiodeItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_gbp: Option<f64>,
    #[serde(default = "Currency::usd")]
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A weld head consumable. `num_welds` is the head's lifetime weld count;
/// cost per weld is the unit price divided by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldHeadItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_gbp: Option<f64>,
    #[serde(default = "Currency::usd")]
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_welds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A roll-stock item (lamination films and tapes), priced per roll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_length_value: Option<f64>,
    pub roll_length_unit: LengthUnit,
    /// Preferred over `roll_cost_usd` when both are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_cost_gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_cost_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Kapton insulation stock, consumed as punched disks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KaptonItem {
    pub id: String,
    pub name: String,
    /// Precomputed disk price; short-circuits the per-roll derivation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_disk_gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disks_per_roll: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_cost_usd: Option<f64>,
    #[serde(default = "Currency::usd")]
    pub currency: Currency,
}

/// Epoxy stock, consumed by volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpoxyItem {
    pub id: String,
    pub name: String,
    /// Precomputed mL price; short-circuits the per-container derivation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_ml_gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ml: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_usd: Option<f64>,
    pub currency: Currency,
}

/// Misc category entry, discriminated by the `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MiscItem {
    #[serde(rename = "kapton", alias = "Kapton")]
    Kapton(KaptonItem),
    #[serde(rename = "epoxy", alias = "Epoxy")]
    Epoxy(EpoxyItem),
}

impl MiscItem {
    pub fn id(&self) -> &str {
        match self {
            MiscItem::Kapton(k) => &k.id,
            MiscItem::Epoxy(e) => &e.id,
        }
    }
}

/// A per-unit packaging item (frame, shipping board or box).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingUnitItem {
    pub id: String,
    pub name: String,
    /// Preferred over `unit_cost_usd` when both are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost_usd: Option<f64>,
    pub currency: Currency,
    /// Only meaningful for boxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
}

/// Foam sheet stock, bought as a batch of pre-cut pieces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoamItem {
    pub id: String,
    pub name: String,
    pub thickness_mm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_pieces: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_gbp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost_usd: Option<f64>,
    pub currency: Currency,
}

/// Packaging category entry, discriminated by the `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PackagingItem {
    #[serde(rename = "frame", alias = "Frame")]
    Frame(PackagingUnitItem),
    #[serde(rename = "shipping board", alias = "Shipping board")]
    ShippingBoard(PackagingUnitItem),
    #[serde(rename = "foam", alias = "Foam")]
    Foam(FoamItem),
    #[serde(rename = "box", alias = "Box")]
    Box(PackagingUnitItem),
}

/// The full materials catalog.
///
/// Absent categories deserialize as empty lists so a partially populated
/// `materials.yaml` still loads; whether an empty category is acceptable is
/// decided by each calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    #[serde(rename = "Silver Ribbon")]
    pub silver_ribbon: Vec<SilverRibbonItem>,
    #[serde(rename = "Diodes")]
    pub diodes: Vec<DiodeItem>,
    #[serde(rename = "Weld heads")]
    pub weld_heads: Vec<WeldHeadItem>,
    #[serde(rename = "Lamination")]
    pub lamination: Vec<RollItem>,
    #[serde(rename = "Tapes")]
    pub tapes: Vec<RollItem>,
    #[serde(rename = "Misc")]
    pub misc: Vec<MiscItem>,
    #[serde(rename = "Packaging")]
    pub packaging: Vec<PackagingItem>,
}

impl Catalog {
    /// Look up a silver ribbon item by id.
    pub fn find_silver(&self, id: &str) -> Option<&SilverRibbonItem> {
        self.silver_ribbon.iter().find(|s| s.id == id)
    }

    /// Look up a weld head by id.
    pub fn find_weld_head(&self, id: &str) -> Option<&WeldHeadItem> {
        self.weld_heads.iter().find(|w| w.id == id)
    }
}
