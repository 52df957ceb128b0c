//! Regional datasets consumed by the displacement pipeline.

/// Regional load, generating units, and emission rates.
pub mod baseline;
/// Hour-of-year stamps and calendar helpers.
pub mod calendar;
pub mod catalog;
/// Renewable capacity-factor defaults.
pub mod renewables;

pub use baseline::{EmissionRates, GeneratingUnit, LoadHour, RegionalBaseline};
pub use calendar::HourStamp;
pub use catalog::{DatasetSource, RegionCatalog};
pub use renewables::{RenewableDefaults, Technology};
