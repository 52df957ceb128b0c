//! Emissions displacement from energy-efficiency and renewable-energy
//! (EERE) programs on a regional power grid.

/// Scenario files and built-in presets.
pub mod config;
pub mod dataset;
pub mod displacement;
/// EERE inputs, profile calculation, and limit checks.
pub mod eere;
pub mod error;
pub mod logging;
pub mod pollutant;

pub use error::{Error, Result};
