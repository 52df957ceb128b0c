//! Apportions the regional hourly load change across generating units.

use crate::dataset::GeneratingUnit;
use crate::error::{Error, Result};
use crate::pollutant::{Metric, Pollutant};

/// Per-hour ratio of regional load change to total unit generation.
///
/// Each unit absorbs the regional change in proportion to its share of
/// that hour's generation: `delta_u = generation_u * ratio`. Hours with no
/// generation get a ratio of zero. Ratios are floored at `-1.0` so no
/// unit is pushed below zero output.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionRatios {
    ratios: Vec<f64>,
    floored_hours: usize,
}

impl ReductionRatios {
    /// Derives ratios from an hourly load change and the units serving it.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateSeries` if a unit's generation series does
    /// not have one value per profile hour or holds a negative value.
    pub fn new(profile_mw: &[f64], units: &[GeneratingUnit]) -> Result<Self> {
        let hours = profile_mw.len();
        let mut totals = vec![0.0; hours];
        for unit in units {
            if unit.generation.len() != hours {
                return Err(Error::DegenerateSeries(format!(
                    "unit \"{}\" has {} generation values, profile has {hours}",
                    unit.id,
                    unit.generation.len()
                )));
            }
            for (h, (total, &g)) in totals.iter_mut().zip(&unit.generation).enumerate() {
                if g < 0.0 {
                    return Err(Error::DegenerateSeries(format!(
                        "unit \"{}\" has negative generation {g} at hour {h}",
                        unit.id
                    )));
                }
                *total += g;
            }
        }

        let mut floored_hours = 0;
        let ratios: Vec<f64> = profile_mw
            .iter()
            .zip(&totals)
            .map(|(&change, &total)| {
                if total <= 0.0 {
                    return 0.0;
                }
                let ratio = change / total;
                if ratio < -1.0 {
                    floored_hours += 1;
                    -1.0
                } else {
                    ratio
                }
            })
            .collect();

        Ok(Self {
            ratios,
            floored_hours,
        })
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn ratio(&self, hour: usize) -> f64 {
        self.ratios[hour]
    }

    /// Hours where the requested change exceeded all available generation.
    pub fn floored_hours(&self) -> usize {
        self.floored_hours
    }
}

/// Baseline and change series for one metric of one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    pub original: Vec<f64>,
    pub delta: Vec<f64>,
}

impl MetricSeries {
    fn with_capacity(hours: usize) -> Self {
        Self {
            original: Vec::with_capacity(hours),
            delta: Vec::with_capacity(hours),
        }
    }

    pub fn post(&self, hour: usize) -> f64 {
        self.original[hour] + self.delta[hour]
    }

    pub fn total_delta(&self) -> f64 {
        self.delta.iter().sum()
    }
}

/// Hourly generation and emission changes for one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDisplacement {
    series: [MetricSeries; 5],
}

impl UnitDisplacement {
    pub fn metric(&self, metric: Metric) -> &MetricSeries {
        &self.series[metric.index()]
    }

    /// Signed generation change per hour (MWh, negative = displaced).
    pub fn generation_delta(&self) -> &[f64] {
        &self.metric(Metric::Generation).delta
    }

    /// Signed emission change per hour for `pollutant`.
    pub fn emissions_delta(&self, pollutant: Pollutant) -> &[f64] {
        &self.metric(pollutant.into()).delta
    }

    pub fn hours(&self) -> usize {
        self.series[0].original.len()
    }
}

/// Applies the hourly ratios to one unit.
///
/// Generation change is `generation * ratio`; each pollutant's change is the
/// generation change times that hour's emission rate. Baseline emissions
/// are generation times rate.
pub fn displace_unit(unit: &GeneratingUnit, ratios: &ReductionRatios) -> UnitDisplacement {
    let hours = ratios.len();
    let mut series: [MetricSeries; 5] = std::array::from_fn(|_| MetricSeries::with_capacity(hours));

    for (h, &generation) in unit.generation.iter().enumerate().take(hours) {
        let delta = generation * ratios.ratio(h);
        let gen_series = &mut series[Metric::Generation.index()];
        gen_series.original.push(generation);
        gen_series.delta.push(delta);

        for p in Pollutant::ALL {
            let rate = unit.emission_rates.rate(p, h);
            let s = &mut series[Metric::from(p).index()];
            s.original.push(generation * rate);
            s.delta.push(delta * rate);
        }
    }

    UnitDisplacement { series }
}
