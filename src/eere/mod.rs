//! EERE program inputs and the hourly load-change profile they produce.

pub mod exceedance;
pub mod inputs;
pub mod percentile;
pub mod profile;

pub use inputs::EereInputs;
pub use profile::{HourlyProfile, LimitCheck, LimitType, ProfileValidation, calculate_profile};
