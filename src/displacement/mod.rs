//! Applies an hourly EERE profile to a region's generating units and rolls
//! the displaced generation and emissions up into reportable views.

pub mod aggregate;
pub mod engine;
pub mod result;
/// Per-unit apportionment of the regional load change.
pub mod unit;

pub use engine::{DisplacementEngine, Job, displace};
pub use result::{Breakdown, Change, DisplacementResult, EmissionRateResult, MetricResult};
pub use unit::{ReductionRatios, UnitDisplacement, displace_unit};
