//! Runs the profile → per-unit → aggregation pipeline for one region.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::aggregate::{Aggregates, Aggregator};
use super::result::DisplacementResult;
use super::unit::{ReductionRatios, displace_unit};
use crate::dataset::{DatasetSource, RegionalBaseline, RenewableDefaults};
use crate::eere::{EereInputs, calculate_profile};
use crate::error::{Error, Result};

/// Computes the displacement result for one region and one set of inputs.
///
/// # Arguments
///
/// * `baseline` - The region's baseline load, units, and soft limit
/// * `renewables` - Capacity factors aligned with the baseline hours
/// * `inputs` - EERE program parameters
///
/// # Errors
///
/// * `Error::InvalidInput` if `inputs` fail validation.
/// * `Error::NoActivePrograms` if every program field is zero.
/// * `Error::DegenerateSeries` if the baseline or renewable series are
///   empty or misaligned, unit generation is negative, or a capacity factor
///   falls outside [0, 1].
///
/// A hard-limit breach is not an error: the returned result reports it
/// through [`DisplacementResult::hard_limit_exceeded`].
#[instrument(skip_all, fields(region = %baseline.region))]
pub fn displace(
    baseline: &RegionalBaseline,
    renewables: &RenewableDefaults,
    inputs: &EereInputs,
) -> Result<DisplacementResult> {
    inputs.check()?;
    if inputs.is_empty() {
        return Err(Error::NoActivePrograms);
    }
    baseline.validate()?;
    renewables.validate()?;

    let loads = baseline.loads();
    let profile = calculate_profile(inputs, &loads, renewables, baseline.max_ee_percent)?;
    debug!(
        hours = profile.len(),
        total_mwh = profile.total_mwh(),
        "calculated EERE profile"
    );

    let validation = profile.validation;
    if !validation.hard.valid {
        warn!(
            hour = validation.hard.top_exceedance_index,
            severity = validation.hard.top_exceedance_value,
            "EERE profile exceeds the hard displacement limit"
        );
    } else if !validation.soft.valid {
        info!(
            hour = validation.soft.top_exceedance_index,
            severity = validation.soft.top_exceedance_value,
            "EERE profile exceeds the soft displacement limit"
        );
    }

    let ratios = ReductionRatios::new(&profile.hourly_mw, &baseline.units)?;
    if ratios.floored_hours() > 0 {
        warn!(
            hours = ratios.floored_hours(),
            "load change exceeds total unit generation; capped at full displacement"
        );
    }

    let mut aggregator = Aggregator::new(baseline.month_indices());
    for unit in &baseline.units {
        aggregator.add_unit(unit, &displace_unit(unit, &ratios));
    }
    let Aggregates {
        metrics,
        emission_rates,
    } = aggregator.finish();
    debug!(units = baseline.units.len(), "aggregated unit displacement");

    Ok(DisplacementResult {
        region: baseline.region.clone(),
        year: baseline.year,
        hours: baseline.hour_count(),
        units: baseline.units.len(),
        max_ee_percent: baseline.max_ee_percent,
        profile,
        metrics,
        emission_rates,
    })
}

/// One independent displacement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub region: String,
    pub inputs: EereInputs,
}

impl Job {
    pub fn new(region: impl Into<String>, inputs: EereInputs) -> Self {
        Self {
            region: region.into(),
            inputs,
        }
    }
}

/// Resolves regions against a dataset source and runs displacements.
pub struct DisplacementEngine<'a, S> {
    source: &'a S,
}

impl<'a, S: DatasetSource> DisplacementEngine<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Runs the pipeline for `region`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingDataset` when the source has no baseline or
    /// no renewable defaults for `region`, otherwise whatever [`displace`]
    /// returns.
    pub fn run(&self, region: &str, inputs: &EereInputs) -> Result<DisplacementResult> {
        let baseline = self
            .source
            .baseline(region)
            .ok_or_else(|| Error::MissingDataset {
                region: region.to_string(),
                kind: "baseline dataset",
            })?;
        let renewables = self
            .source
            .renewables(region)
            .ok_or_else(|| Error::MissingDataset {
                region: region.to_string(),
                kind: "renewable defaults",
            })?;
        displace(baseline, renewables, inputs)
    }
}

impl<S: DatasetSource + Sync> DisplacementEngine<'_, S> {
    /// Runs independent jobs in parallel. Results come back in job order.
    pub fn run_many(&self, jobs: &[Job]) -> Vec<Result<DisplacementResult>> {
        jobs.par_iter()
            .map(|job| self.run(&job.region, &job.inputs))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::calendar::year_stamps;
    use crate::dataset::{EmissionRates, GeneratingUnit, LoadHour, RegionCatalog};
    use crate::pollutant::{Metric, Pollutant};

    fn region(id: &str, loads: &[f64], generation: &[f64], so2: f64) -> RegionalBaseline {
        let hours = loads
            .iter()
            .zip(year_stamps(2023))
            .map(|(&load_mw, stamp)| LoadHour { stamp, load_mw })
            .collect();
        RegionalBaseline {
            region: id.to_string(),
            name: String::new(),
            year: 2023,
            max_ee_percent: 15.0,
            hours,
            units: vec![GeneratingUnit {
                id: "u1".to_string(),
                name: String::new(),
                state: "MA".to_string(),
                county: "Suffolk".to_string(),
                generation: generation.to_vec(),
                emission_rates: EmissionRates {
                    so2: vec![so2; generation.len()],
                    ..EmissionRates::default()
                },
            }],
        }
    }

    fn catalog() -> RegionCatalog {
        let mut catalog = RegionCatalog::new();
        let baseline = region("NE", &[100.0, 100.0], &[50.0, 50.0], 2.0);
        catalog.insert(baseline, RenewableDefaults::zeros("NE", 2));
        catalog
    }

    #[test]
    fn single_unit_scenario() {
        let catalog = catalog();
        let engine = DisplacementEngine::new(&catalog);
        let inputs = EereInputs {
            constant_mw: 10.0,
            ..EereInputs::default()
        };
        let result = engine.run("NE", &inputs).expect("run");
        assert_eq!(result.annual(Metric::Generation).impact, -20.0);
        assert_eq!(result.annual(Metric::So2).impact, -40.0);
        assert!(!result.hard_limit_exceeded());
        assert!(!result.soft_limit_exceeded());
        assert_eq!(result.rate(Pollutant::So2).original, 2.0);
    }

    #[test]
    fn unknown_region_is_missing_dataset() {
        let catalog = catalog();
        let engine = DisplacementEngine::new(&catalog);
        let inputs = EereInputs {
            constant_mw: 1.0,
            ..EereInputs::default()
        };
        let err = engine.run("XX", &inputs).expect_err("must fail");
        assert!(matches!(err, Error::MissingDataset { kind: "baseline dataset", .. }));
    }

    #[test]
    fn empty_inputs_rejected() {
        let catalog = catalog();
        let engine = DisplacementEngine::new(&catalog);
        let err = engine
            .run("NE", &EereInputs::default())
            .expect_err("must fail");
        assert!(matches!(err, Error::NoActivePrograms));
    }

    #[test]
    fn contradictory_inputs_rejected() {
        let catalog = catalog();
        let engine = DisplacementEngine::new(&catalog);
        let inputs = EereInputs {
            constant_mw: 1.0,
            annual_gwh: 1.0,
            ..EereInputs::default()
        };
        let err = engine.run("NE", &inputs).expect_err("must fail");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn out_of_range_capacity_factor_rejected() {
        let mut renewables = RenewableDefaults::zeros("NE", 2);
        renewables.onshore_wind = vec![0.5, 1.5];
        let mut catalog = RegionCatalog::new();
        catalog.insert(region("NE", &[100.0, 100.0], &[50.0, 50.0], 2.0), renewables);
        let engine = DisplacementEngine::new(&catalog);
        let inputs = EereInputs {
            onshore_wind_mw: 10.0,
            ..EereInputs::default()
        };
        let err = engine.run("NE", &inputs).expect_err("must fail");
        assert!(matches!(err, Error::DegenerateSeries(ref msg) if msg.contains("1.5")));
    }

    #[test]
    fn negative_unit_generation_rejected() {
        let mut catalog = RegionCatalog::new();
        let baseline = region("NE", &[100.0, 100.0], &[50.0, -20.0], 2.0);
        catalog.insert(baseline, RenewableDefaults::zeros("NE", 2));
        let engine = DisplacementEngine::new(&catalog);
        let inputs = EereInputs {
            constant_mw: 10.0,
            ..EereInputs::default()
        };
        let err = engine.run("NE", &inputs).expect_err("must fail");
        assert!(matches!(err, Error::DegenerateSeries(_)));
    }

    #[test]
    fn hard_limit_breach_still_returns_result() {
        let catalog = catalog();
        let engine = DisplacementEngine::new(&catalog);
        let inputs = EereInputs {
            constant_mw: 40.0,
            ..EereInputs::default()
        };
        let result = engine.run("NE", &inputs).expect("run");
        assert!(result.hard_limit_exceeded());
        assert!(result.soft_limit_exceeded());
        assert_eq!(result.annual(Metric::Generation).impact, -80.0);
    }

    #[test]
    fn run_many_preserves_job_order() {
        let catalog = catalog();
        let engine = DisplacementEngine::new(&catalog);
        let jobs = [
            Job::new("NE", EereInputs { constant_mw: 5.0, ..EereInputs::default() }),
            Job::new("XX", EereInputs { constant_mw: 5.0, ..EereInputs::default() }),
            Job::new("NE", EereInputs { constant_mw: 10.0, ..EereInputs::default() }),
        ];
        let results = engine.run_many(&jobs);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().map(|r| r.annual(Metric::Generation).impact).ok(),
            Some(-10.0)
        );
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().map(|r| r.annual(Metric::Generation).impact).ok(),
            Some(-20.0)
        );
    }
}
