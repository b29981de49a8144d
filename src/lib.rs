//! Costing engine for small photovoltaic array production.
//!
//! The crate is organised in three layers:
//!
//! - [`models`] — serializable records for the product configuration, array
//!   designs, the materials catalog, process steps and operator profiles
//! - [`costing`] — pure computation: geometry and power, unit-cost
//!   resolvers, the seven category calculators, labour, the cost summary
//!   and the order scenario engine
//! - [`store`] — YAML persistence for the data files, including the legacy
//!   process-schema upgrade
//!
//! All monetary figures are GBP; catalog prices quoted in USD are converted
//! once, through the product's exchange rate. Tracing subscribers are the
//! caller's responsibility, the library only emits events.

pub mod costing;
pub mod error;
pub mod models;
pub mod store;

pub use error::ConfigError;
