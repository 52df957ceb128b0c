//! Displacement result types and the printed report.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::eere::exceedance::HARD_LIMIT_PERCENT;
use crate::eere::{HourlyProfile, LimitCheck, ProfileValidation};
use crate::pollutant::{Metric, Pollutant};

/// Percentage change `impact / original * 100`, zero when `original` is zero.
pub fn percent_change(original: f64, impact: f64) -> f64 {
    if original == 0.0 {
        0.0
    } else {
        impact / original * 100.0
    }
}

/// `numerator / denominator`, zero when `denominator` is zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// A quantity before and after the EERE program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Change {
    pub original: f64,
    pub post: f64,
    /// `post - original`.
    pub impact: f64,
    /// `impact / original * 100`, zero when `original` is zero.
    pub percent: f64,
}

impl Change {
    pub fn new(original: f64, post: f64) -> Self {
        let impact = post - original;
        Self {
            original,
            post,
            impact,
            percent: percent_change(original, impact),
        }
    }
}

/// A value broken down by region, state, and county (county within state).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown<T> {
    pub region: T,
    pub state: BTreeMap<String, T>,
    pub county: BTreeMap<String, BTreeMap<String, T>>,
}

impl<T> Breakdown<T> {
    /// Applies `f` to every region, state, and county entry.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Breakdown<U> {
        Breakdown {
            region: f(&self.region),
            state: self.state.iter().map(|(k, v)| (k.clone(), f(v))).collect(),
            county: self
                .county
                .iter()
                .map(|(s, counties)| {
                    let mapped = counties.iter().map(|(c, v)| (c.clone(), f(v))).collect();
                    (s.clone(), mapped)
                })
                .collect(),
        }
    }
}

/// Twelve calendar-month entries, January first.
pub type Monthly<T> = Vec<T>;

/// All views of one metric (generation or one pollutant).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    /// Annual totals per region, state, and county.
    pub annual: Breakdown<Change>,
    /// Monthly absolute changes.
    pub emissions: Breakdown<Monthly<Change>>,
    /// Monthly percentage changes.
    pub percentages: Breakdown<Monthly<f64>>,
}

/// Emission rate (emissions per MWh generated) before and after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRateResult {
    pub region: Change,
    pub state: BTreeMap<String, Change>,
}

/// Complete output of one displacement run.
///
/// Built once by the orchestrator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplacementResult {
    pub region: String,
    pub year: i32,
    pub hours: usize,
    pub units: usize,
    pub max_ee_percent: f64,
    pub profile: HourlyProfile,
    pub metrics: BTreeMap<Metric, MetricResult>,
    pub emission_rates: BTreeMap<Pollutant, EmissionRateResult>,
}

impl DisplacementResult {
    pub fn validation(&self) -> &ProfileValidation {
        &self.profile.validation
    }

    /// `true` when any hour breaks the hard limit. The run still completes,
    /// but callers must surface this prominently.
    pub fn hard_limit_exceeded(&self) -> bool {
        !self.profile.validation.hard.valid
    }

    /// `true` when any hour breaks the region's soft limit (advisory).
    pub fn soft_limit_exceeded(&self) -> bool {
        !self.profile.validation.soft.valid
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricResult> {
        self.metrics.get(&metric)
    }

    /// Region-level annual change for `metric` (zeros if absent).
    pub fn annual(&self, metric: Metric) -> Change {
        self.metric(metric)
            .map(|m| m.annual.region)
            .unwrap_or_default()
    }

    /// Region-level emission rate change for `pollutant` (zeros if absent).
    pub fn rate(&self, pollutant: Pollutant) -> Change {
        self.emission_rates
            .get(&pollutant)
            .map(|r| r.region)
            .unwrap_or_default()
    }
}

fn limit_line(check: &LimitCheck) -> String {
    if check.valid {
        "ok".to_string()
    } else {
        format!(
            "EXCEEDED (worst hour {}, severity {:.2})",
            check.top_exceedance_index, check.top_exceedance_value
        )
    }
}

impl fmt::Display for DisplacementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Displacement Report: {} ({}) ---",
            self.region, self.year
        )?;
        writeln!(
            f,
            "EERE load change:      {:.1} MWh over {} hours, {} units",
            self.profile.total_mwh(),
            self.hours,
            self.units
        )?;
        let v = self.validation();
        writeln!(
            f,
            "Soft limit ({:>4.1}%):    {}",
            self.max_ee_percent,
            limit_line(&v.soft)
        )?;
        writeln!(
            f,
            "Hard limit ({:>4.1}%):    {}",
            HARD_LIMIT_PERCENT,
            limit_line(&v.hard)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:>16} {:>16} {:>14} {:>9}",
            "", "original", "post", "impact", "change"
        )?;
        for metric in Metric::ALL {
            let c = self.annual(metric);
            writeln!(
                f,
                "{:<12} {:>16.2} {:>16.2} {:>14.2} {:>8.3}%  {}",
                metric.to_string(),
                c.original,
                c.post,
                c.impact,
                c.percent,
                metric.unit()
            )?;
        }
        writeln!(f)?;
        write!(f, "Emission rates (per MWh):")?;
        for p in Pollutant::ALL {
            let r = self.rate(p);
            write!(
                f,
                "\n  {:<8} {:>12.5} -> {:>12.5} {}",
                p.to_string(),
                r.original,
                r.post,
                p.mass_unit()
            )?;
        }
        Ok(())
    }
}
