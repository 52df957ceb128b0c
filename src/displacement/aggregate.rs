//! Rolls per-unit hourly deltas up into monthly and annual views at region,
//! state, and county level.

use std::collections::BTreeMap;

use super::result::{Breakdown, Change, EmissionRateResult, MetricResult, Monthly, safe_ratio};
use super::unit::UnitDisplacement;
use crate::dataset::GeneratingUnit;
use crate::dataset::calendar::MONTHS;
use crate::pollutant::{Metric, Pollutant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    original: f64,
    post: f64,
}

impl Totals {
    fn add(&mut self, other: Totals) {
        self.original += other.original;
        self.post += other.post;
    }
}

/// Monthly original/post totals for every metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Bucket([[Totals; MONTHS]; Metric::ALL.len()]);

impl Bucket {
    fn add(&mut self, other: &Bucket) {
        for (mine, theirs) in self.0.iter_mut().zip(&other.0) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                a.add(*b);
            }
        }
    }

    fn monthly(&self, metric: Metric) -> Monthly<Change> {
        self.0[metric.index()]
            .iter()
            .map(|t| Change::new(t.original, t.post))
            .collect()
    }

    fn annual(&self, metric: Metric) -> Totals {
        let mut total = Totals::default();
        for t in &self.0[metric.index()] {
            total.add(*t);
        }
        total
    }

    /// Emission rate (pollutant per MWh) before and after.
    fn rate(&self, pollutant: Pollutant) -> Change {
        let generation = self.annual(Metric::Generation);
        let emissions = self.annual(pollutant.into());
        Change::new(
            safe_ratio(emissions.original, generation.original),
            safe_ratio(emissions.post, generation.post),
        )
    }
}

/// Aggregated views produced by [`Aggregator::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub metrics: BTreeMap<Metric, MetricResult>,
    pub emission_rates: BTreeMap<Pollutant, EmissionRateResult>,
}

/// Accumulates unit results into region, state, and county buckets.
///
/// Each unit is summed into its own bucket first and that bucket is then
/// added once to the region, its state, and its county, so county totals
/// re-aggregate to their state totals.
#[derive(Debug, Clone)]
pub struct Aggregator {
    month_of_hour: Vec<usize>,
    region: Bucket,
    state: BTreeMap<String, Bucket>,
    county: BTreeMap<String, BTreeMap<String, Bucket>>,
}

impl Aggregator {
    /// `month_of_hour` maps each hour index to its zero-based month.
    pub fn new(month_of_hour: Vec<usize>) -> Self {
        Self {
            month_of_hour,
            region: Bucket::default(),
            state: BTreeMap::new(),
            county: BTreeMap::new(),
        }
    }

    pub fn add_unit(&mut self, unit: &GeneratingUnit, displacement: &UnitDisplacement) {
        let mut bucket = Bucket::default();
        for metric in Metric::ALL {
            let series = displacement.metric(metric);
            let months = &mut bucket.0[metric.index()];
            for (h, (&original, &delta)) in series.original.iter().zip(&series.delta).enumerate() {
                let Some(&month) = self.month_of_hour.get(h) else {
                    break;
                };
                let t = &mut months[month.min(MONTHS - 1)];
                t.original += original;
                t.post += original + delta;
            }
        }

        self.region.add(&bucket);
        self.state
            .entry(unit.state.clone())
            .or_default()
            .add(&bucket);
        self.county
            .entry(unit.state.clone())
            .or_default()
            .entry(unit.county.clone())
            .or_default()
            .add(&bucket);
    }

    pub fn finish(self) -> Aggregates {
        let buckets = Breakdown {
            region: self.region,
            state: self.state,
            county: self.county,
        };

        let metrics = Metric::ALL
            .into_iter()
            .map(|metric| {
                let emissions = buckets.map(|b| b.monthly(metric));
                let annual = buckets.map(|b| {
                    let t = b.annual(metric);
                    Change::new(t.original, t.post)
                });
                let percentages = emissions.map(|months| months.iter().map(|c| c.percent).collect());
                (
                    metric,
                    MetricResult {
                        annual,
                        emissions,
                        percentages,
                    },
                )
            })
            .collect();

        let emission_rates = Pollutant::ALL
            .into_iter()
            .map(|p| {
                let rates = EmissionRateResult {
                    region: buckets.region.rate(p),
                    state: buckets
                        .state
                        .iter()
                        .map(|(s, b)| (s.clone(), b.rate(p)))
                        .collect(),
                };
                (p, rates)
            })
            .collect();

        Aggregates {
            metrics,
            emission_rates,
        }
    }
}
