//! Converts EERE inputs into an hourly load-change profile and scores it
//! against the soft and hard displacement limits.

use std::fmt;

use serde::Serialize;

use super::exceedance::{HARD_LIMIT_PERCENT, HARD_SCALE, SOFT_SCALE, exceedance};
use super::inputs::EereInputs;
use super::percentile::percentile;
use crate::dataset::{RenewableDefaults, Technology};
use crate::error::{Error, Result};

/// Which displacement limit a [`LimitCheck`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitType {
    Soft,
    Hard,
}

impl fmt::Display for LimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LimitType::Soft => "soft",
            LimitType::Hard => "hard",
        })
    }
}

/// Outcome of scoring a profile against one limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LimitCheck {
    pub limit_type: LimitType,
    /// `true` when no hour exceeded the limit.
    pub valid: bool,
    /// Largest hourly severity, `0.0` when valid.
    pub top_exceedance_value: f64,
    /// Hour index of the largest severity (first on ties), `0` when valid.
    pub top_exceedance_index: usize,
}

impl LimitCheck {
    /// Summarizes per-hour severities. Valid iff they sum to exactly zero.
    pub fn from_exceedances(limit_type: LimitType, exceedances: &[f64]) -> Self {
        let total: f64 = exceedances.iter().sum();
        if total == 0.0 {
            return Self {
                limit_type,
                valid: true,
                top_exceedance_value: 0.0,
                top_exceedance_index: 0,
            };
        }

        let mut top_value = f64::NEG_INFINITY;
        let mut top_index = 0;
        for (i, &v) in exceedances.iter().enumerate() {
            if v > top_value {
                top_value = v;
                top_index = i;
            }
        }
        Self {
            limit_type,
            valid: false,
            top_exceedance_value: top_value,
            top_exceedance_index: top_index,
        }
    }
}

/// Soft and hard limit checks for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileValidation {
    pub soft: LimitCheck,
    pub hard: LimitCheck,
}

/// Hourly net load change produced by an EERE scenario.
///
/// `hourly_mw` is negative where load is displaced. The exceedance series
/// hold one severity per hour (zero within bounds).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyProfile {
    pub hourly_mw: Vec<f64>,
    pub soft_exceedances: Vec<f64>,
    pub hard_exceedances: Vec<f64>,
    pub validation: ProfileValidation,
}

impl HourlyProfile {
    pub fn len(&self) -> usize {
        self.hourly_mw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hourly_mw.is_empty()
    }

    /// Net energy change over the whole profile (MWh, negative = reduction).
    pub fn total_mwh(&self) -> f64 {
        self.hourly_mw.iter().sum()
    }
}

/// Builds the hourly EERE profile for one region.
///
/// # Arguments
///
/// * `inputs` - Scenario program parameters (including line loss)
/// * `loads` - Baseline regional load per hour (MW, all > 0)
/// * `renewables` - Regional capacity factors aligned with `loads`
/// * `max_ee_percent` - Region soft limit as a percentage of hourly load
///
/// # Errors
///
/// * `Error::DegenerateSeries` if `loads` is empty, holds a non-positive
///   value, or the renewable series do not line up with it.
/// * `Error::InvalidInput` if the inputs fail validation, ask for offshore
///   wind in a region without an offshore profile, or `max_ee_percent` is
///   out of range.
pub fn calculate_profile(
    inputs: &EereInputs,
    loads: &[f64],
    renewables: &RenewableDefaults,
    max_ee_percent: f64,
) -> Result<HourlyProfile> {
    if loads.is_empty() {
        return Err(Error::DegenerateSeries("load series is empty".to_string()));
    }
    if let Some((i, v)) = loads
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v <= 0.0)
    {
        return Err(Error::DegenerateSeries(format!(
            "hourly load at {i} must be > 0, got {v}"
        )));
    }
    if !(max_ee_percent > 0.0 && max_ee_percent <= 100.0) {
        return Err(Error::invalid(
            "baseline.max_ee_percent",
            format!("must be in (0, 100], got {max_ee_percent}"),
        ));
    }
    inputs.check()?;
    renewables.check_alignment(loads.len())?;
    if inputs.offshore_wind_mw > 0.0 && !renewables.has_offshore_wind() {
        return Err(Error::invalid(
            "eere.offshore_wind_mw",
            format!("region \"{}\" has no offshore wind profile", renewables.region),
        ));
    }

    let hours = loads.len();
    let line_loss = 1.0 / (1.0 - inputs.line_loss);
    let annual_mw = inputs.annual_gwh * 1000.0 / hours as f64 * line_loss;
    let percent = -inputs.percent_reduction() / 100.0 * line_loss;
    let targeted = targeted_hours(inputs, loads);

    let mut hourly_mw = Vec::with_capacity(hours);
    let mut soft_exceedances = Vec::with_capacity(hours);
    let mut hard_exceedances = Vec::with_capacity(hours);

    for (i, &load) in loads.iter().enumerate() {
        let renewable_mw = renewable_output_mw(inputs, renewables, i, line_loss);
        let percent_mw = if targeted[i] { load * percent } else { 0.0 };
        let calculated = percent_mw - renewable_mw - inputs.constant_mw - annual_mw;

        let soft_limit = load * -max_ee_percent / 100.0;
        let hard_limit = load * -HARD_LIMIT_PERCENT / 100.0;

        hourly_mw.push(calculated);
        soft_exceedances.push(exceedance(calculated, soft_limit, SOFT_SCALE));
        hard_exceedances.push(exceedance(calculated, hard_limit, HARD_SCALE));
    }

    let validation = ProfileValidation {
        soft: LimitCheck::from_exceedances(LimitType::Soft, &soft_exceedances),
        hard: LimitCheck::from_exceedances(LimitType::Hard, &hard_exceedances),
    };

    Ok(HourlyProfile {
        hourly_mw,
        soft_exceedances,
        hard_exceedances,
        validation,
    })
}

/// Marks the hours a percentage program applies to.
///
/// Broad programs cover every hour. Targeted programs cover hours whose
/// load is strictly above the `(1 - top_hours/100)` percentile; hours tied
/// with the threshold are not targeted, so a flat load series gets none.
fn targeted_hours(inputs: &EereInputs, loads: &[f64]) -> Vec<bool> {
    if inputs.is_broad() {
        return vec![true; loads.len()];
    }
    if inputs.targeted_percent == 0.0 || inputs.top_hours <= 0.0 {
        return vec![false; loads.len()];
    }
    match percentile(loads, 1.0 - inputs.top_hours / 100.0) {
        Some(threshold) => loads.iter().map(|&l| l > threshold).collect(),
        None => vec![false; loads.len()],
    }
}

/// Renewable generation offsetting load in hour `i` (MW).
///
/// Rooftop solar sits behind the meter and is grossed up by line loss.
fn renewable_output_mw(
    inputs: &EereInputs,
    renewables: &RenewableDefaults,
    i: usize,
    line_loss: f64,
) -> f64 {
    Technology::ALL
        .iter()
        .map(|&tech| {
            let mw = inputs.capacity_mw(tech) * renewables.factor(tech, i);
            if tech == Technology::RooftopSolar {
                mw * line_loss
            } else {
                mw
            }
        })
        .sum()
}
