//! Regional baseline dataset: hourly load, generating units, and limits.

use serde::{Deserialize, Serialize};

use crate::dataset::calendar::{self, HourStamp};
use crate::error::{Error, Result};
use crate::pollutant::Pollutant;

/// One stamped hour of regional load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadHour {
    #[serde(flatten)]
    pub stamp: HourStamp,
    /// Regional load (MW).
    pub load_mw: f64,
}

/// Hourly emission rates for one unit, one series per pollutant.
///
/// SO2, NOX and PM2.5 rates are lb/MWh; CO2 is tons/MWh. An empty
/// series means the unit reports no rate for that pollutant and is
/// treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionRates {
    pub so2: Vec<f64>,
    pub nox: Vec<f64>,
    pub co2: Vec<f64>,
    pub pm25: Vec<f64>,
}

impl EmissionRates {
    pub fn series(&self, pollutant: Pollutant) -> &[f64] {
        match pollutant {
            Pollutant::So2 => &self.so2,
            Pollutant::Nox => &self.nox,
            Pollutant::Co2 => &self.co2,
            Pollutant::Pm25 => &self.pm25,
        }
    }

    /// Rate for `pollutant` at `hour`, zero when the series is absent.
    pub fn rate(&self, pollutant: Pollutant, hour: usize) -> f64 {
        self.series(pollutant).get(hour).copied().unwrap_or(0.0)
    }
}

/// A fossil generating unit with its baseline hourly operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratingUnit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Two-letter state code.
    pub state: String,
    pub county: String,
    /// Baseline hourly generation (MWh).
    pub generation: Vec<f64>,
    #[serde(default)]
    pub emission_rates: EmissionRates,
}

/// Immutable per-region baseline used by every run against that region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalBaseline {
    /// Region identifier used by the dataset catalog (e.g., `"NE"`).
    pub region: String,
    #[serde(default)]
    pub name: String,
    /// Data year the hour stamps belong to.
    pub year: i32,
    /// Maximum share of hourly load (percent) an EERE profile should offset.
    pub max_ee_percent: f64,
    pub hours: Vec<LoadHour>,
    pub units: Vec<GeneratingUnit>,
}

impl RegionalBaseline {
    /// Parses and validates a baseline from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` for malformed JSON and `Error::DegenerateSeries`
    /// for structural problems (see [`RegionalBaseline::validate`]).
    pub fn from_json_str(s: &str) -> Result<Self> {
        let baseline: Self = serde_json::from_str(s)?;
        baseline.validate()?;
        Ok(baseline)
    }

    pub fn hour_count(&self) -> usize {
        self.hours.len()
    }

    /// Hourly regional load series (MW), ordered by hour.
    pub fn loads(&self) -> Vec<f64> {
        self.hours.iter().map(|h| h.load_mw).collect()
    }

    /// Zero-based month index for every hour.
    pub fn month_indices(&self) -> Vec<usize> {
        self.hours.iter().map(|h| h.stamp.month_index()).collect()
    }

    /// Checks that every series lines up with the hourly load records.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateSeries` when the load series is empty, a
    /// stamp is not a real date in `year`, a load value is non-positive or
    /// non-finite, unit generation is negative or non-finite, or a unit
    /// series length differs from the hour count.
    /// Returns `Error::InvalidInput` when `max_ee_percent` is out of range.
    pub fn validate(&self) -> Result<()> {
        let n = self.hours.len();
        if n == 0 {
            return Err(Error::DegenerateSeries(format!(
                "region \"{}\" has an empty load series",
                self.region
            )));
        }
        if !(self.max_ee_percent > 0.0 && self.max_ee_percent <= 100.0) {
            return Err(Error::invalid(
                "baseline.max_ee_percent",
                format!("must be in (0, 100], got {}", self.max_ee_percent),
            ));
        }

        for (i, h) in self.hours.iter().enumerate() {
            if !h.stamp.is_valid_in(self.year) {
                return Err(Error::DegenerateSeries(format!(
                    "hour {i} has invalid stamp {:?} for year {}",
                    h.stamp, self.year
                )));
            }
            if !h.load_mw.is_finite() || h.load_mw <= 0.0 {
                return Err(Error::DegenerateSeries(format!(
                    "hour {i} has non-positive regional load {}",
                    h.load_mw
                )));
            }
        }

        for unit in &self.units {
            if unit.generation.len() != n {
                return Err(Error::DegenerateSeries(format!(
                    "unit \"{}\" has {} generation values, expected {n}",
                    unit.id,
                    unit.generation.len()
                )));
            }
            if let Some((i, g)) = unit
                .generation
                .iter()
                .enumerate()
                .find(|(_, g)| !g.is_finite() || **g < 0.0)
            {
                return Err(Error::DegenerateSeries(format!(
                    "unit \"{}\" has generation {g} at hour {i}, expected a finite value >= 0",
                    unit.id
                )));
            }
            for p in Pollutant::ALL {
                let rates = unit.emission_rates.series(p);
                if !rates.is_empty() && rates.len() != n {
                    return Err(Error::DegenerateSeries(format!(
                        "unit \"{}\" has {} {p} rates, expected {n}",
                        unit.id,
                        rates.len()
                    )));
                }
            }
        }

        let expected = calendar::hours_in_year(self.year);
        if n != expected {
            tracing::debug!(
                region = %self.region,
                hours = n,
                expected,
                "baseline covers a partial year"
            );
        }
        Ok(())
    }
}
