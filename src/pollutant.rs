//! Pollutant and metric identifiers used to key series and results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tracked pollutant.
///
/// SO2, NOX and PM2.5 are reported in pounds, CO2 in short tons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    So2,
    Nox,
    Co2,
    Pm25,
}

impl Pollutant {
    pub const ALL: [Pollutant; 4] = [Pollutant::So2, Pollutant::Nox, Pollutant::Co2, Pollutant::Pm25];

    /// Position of this pollutant in [`Pollutant::ALL`].
    pub fn index(self) -> usize {
        match self {
            Pollutant::So2 => 0,
            Pollutant::Nox => 1,
            Pollutant::Co2 => 2,
            Pollutant::Pm25 => 3,
        }
    }

    /// Mass unit of emission totals.
    pub fn mass_unit(self) -> &'static str {
        match self {
            Pollutant::Co2 => "tons",
            _ => "lb",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pollutant::So2 => "SO2",
            Pollutant::Nox => "NOX",
            Pollutant::Co2 => "CO2",
            Pollutant::Pm25 => "PM2.5",
        })
    }
}

/// A result dimension: generation or one pollutant's emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Generation,
    So2,
    Nox,
    Co2,
    Pm25,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Generation,
        Metric::So2,
        Metric::Nox,
        Metric::Co2,
        Metric::Pm25,
    ];

    /// Position of this metric in [`Metric::ALL`].
    pub fn index(self) -> usize {
        match self {
            Metric::Generation => 0,
            Metric::So2 => 1,
            Metric::Nox => 2,
            Metric::Co2 => 3,
            Metric::Pm25 => 4,
        }
    }

    /// The pollutant measured by this metric, if any.
    pub fn pollutant(self) -> Option<Pollutant> {
        match self {
            Metric::Generation => None,
            Metric::So2 => Some(Pollutant::So2),
            Metric::Nox => Some(Pollutant::Nox),
            Metric::Co2 => Some(Pollutant::Co2),
            Metric::Pm25 => Some(Pollutant::Pm25),
        }
    }

    pub fn unit(self) -> &'static str {
        self.pollutant().map_or("MWh", Pollutant::mass_unit)
    }
}

impl From<Pollutant> for Metric {
    fn from(p: Pollutant) -> Self {
        match p {
            Pollutant::So2 => Metric::So2,
            Pollutant::Nox => Metric::Nox,
            Pollutant::Co2 => Metric::Co2,
            Pollutant::Pm25 => Metric::Pm25,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pollutant() {
            Some(p) => p.fmt(f),
            None => f.write_str("Generation"),
        }
    }
}
