//! Configuration error type returned by the category calculators.
//!
//! `ConfigError` is serialized to `{ kind, message }` payloads so any
//! presentation layer can pattern-match on a stable `kind` string.

/// A configuration problem detected while costing a category.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
///
/// These errors are deliberately local: a calculator either fails as a whole
/// (missing preconditions such as an empty catalog category) or records the
/// error in its `issues` list and lets the affected sub-calculation
/// contribute zero. Missing numeric fields on an otherwise valid catalog
/// item are *not* errors; the unit-cost resolvers treat those as a cost of
/// 0.0.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum ConfigError {
    /// A catalog category that the calculation requires has no items at all.
    #[error("{0}")]
    EmptyCategory(String),

    /// A selected or design-referenced item id does not exist in the catalog.
    #[error("{0}")]
    MaterialNotFound(String),

    /// A required named role (e.g. a specific weld head, or the 3 mm foam) is
    /// absent from its category.
    #[error("{0}")]
    MissingRole(String),

    /// A design or selection value is outside the domain the calculators
    /// accept (e.g. a cell count of zero).
    #[error("{0}")]
    InvalidInput(String),
}
