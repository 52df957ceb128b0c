//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use avert::dataset::calendar::year_stamps;
use avert::dataset::catalog::{BASELINE_FILE, RENEWABLES_FILE};
use avert::dataset::{EmissionRates, GeneratingUnit, LoadHour, RegionalBaseline, RenewableDefaults};
use avert::eere::EereInputs;

/// Data year used by every fixture.
pub const YEAR: i32 = 2023;

/// Unit with constant per-pollutant rates across all hours.
pub fn unit(id: &str, state: &str, county: &str, generation: Vec<f64>, so2: f64) -> GeneratingUnit {
    let n = generation.len();
    GeneratingUnit {
        id: id.to_string(),
        name: format!("Unit {id}"),
        state: state.to_string(),
        county: county.to_string(),
        generation,
        emission_rates: EmissionRates {
            so2: vec![so2; n],
            nox: vec![so2 / 2.0; n],
            co2: vec![0.6; n],
            pm25: vec![0.05; n],
        },
    }
}

/// Region whose hours are the first `loads.len()` hours of [`YEAR`].
pub fn region(id: &str, loads: &[f64], units: Vec<GeneratingUnit>) -> RegionalBaseline {
    let hours = loads
        .iter()
        .zip(year_stamps(YEAR))
        .map(|(&load_mw, stamp)| LoadHour { stamp, load_mw })
        .collect();
    RegionalBaseline {
        region: id.to_string(),
        name: format!("Region {id}"),
        year: YEAR,
        max_ee_percent: 15.0,
        hours,
        units,
    }
}

/// Flat 100 MW region with one 50 MWh unit emitting 2 lb/MWh SO2.
pub fn flat_region(id: &str, hours: usize) -> RegionalBaseline {
    region(
        id,
        &vec![100.0; hours],
        vec![unit("u1", "MA", "Suffolk", vec![50.0; hours], 2.0)],
    )
}

const STATES: [&str; 3] = ["MA", "VT", "CT"];
const COUNTIES: [&str; 3] = ["Franklin", "Essex", "Windham"];

/// Synthetic region spanning the whole year, one sampled hour per day.
///
/// The first unit always runs at 150 MWh or more, so the programs from
/// [`random_inputs`] never exceed total generation in any hour.
pub fn random_region(id: &str, seed: u64, units: usize) -> (RegionalBaseline, RenewableDefaults) {
    let mut rng = StdRng::seed_from_u64(seed);
    let stamps: Vec<_> = year_stamps(YEAR).into_iter().step_by(24).collect();
    let hours = stamps.len();

    let mut fleet = Vec::with_capacity(units);
    for u in 0..units {
        let generation: Vec<f64> = (0..hours)
            .map(|_| {
                if u == 0 {
                    rng.random_range(150.0..300.0)
                } else if rng.random_bool(0.2) {
                    0.0
                } else {
                    rng.random_range(10.0..200.0)
                }
            })
            .collect();
        let rate = |rng: &mut StdRng, lo: f64, hi: f64| -> Vec<f64> {
            (0..hours).map(|_| rng.random_range(lo..hi)).collect()
        };
        let emission_rates = EmissionRates {
            so2: rate(&mut rng, 0.0, 5.0),
            nox: rate(&mut rng, 0.0, 3.0),
            co2: rate(&mut rng, 0.3, 1.2),
            pm25: if rng.random_bool(0.5) { Vec::new() } else { rate(&mut rng, 0.0, 0.2) },
        };
        fleet.push(GeneratingUnit {
            id: format!("{id}-{u}"),
            name: String::new(),
            state: STATES[rng.random_range(0..STATES.len())].to_string(),
            county: COUNTIES[rng.random_range(0..COUNTIES.len())].to_string(),
            generation,
            emission_rates,
        });
    }

    let load_hours = stamps
        .into_iter()
        .enumerate()
        .map(|(h, stamp)| {
            let total: f64 = fleet.iter().map(|u| u.generation[h]).sum();
            LoadHour {
                stamp,
                load_mw: total + rng.random_range(10.0..50.0),
            }
        })
        .collect();

    let mut factors = |scale: f64| -> Vec<f64> {
        (0..hours).map(|_| rng.random_range(0.0..1.0) * scale).collect()
    };
    let renewables = RenewableDefaults {
        region: id.to_string(),
        onshore_wind: factors(1.0),
        offshore_wind: factors(1.0),
        utility_solar: factors(0.8),
        rooftop_solar: factors(0.8),
    };

    let baseline = RegionalBaseline {
        region: id.to_string(),
        name: String::new(),
        year: YEAR,
        max_ee_percent: 15.0,
        hours: load_hours,
        units: fleet,
    };
    (baseline, renewables)
}

/// A random mix of programs that respects the exclusivity rules.
pub fn random_inputs(seed: u64) -> EereInputs {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut inputs = EereInputs {
        line_loss: rng.random_range(0.0..0.1),
        ..EereInputs::default()
    };
    if rng.random_bool(0.5) {
        inputs.annual_gwh = rng.random_range(0.0..20.0);
    } else {
        inputs.constant_mw = rng.random_range(0.0..20.0);
    }
    if rng.random_bool(0.5) {
        inputs.broad_percent = rng.random_range(0.0..5.0);
    } else {
        inputs.targeted_percent = rng.random_range(0.0..10.0);
        inputs.top_hours = rng.random_range(1.0..30.0);
    }
    inputs.onshore_wind_mw = rng.random_range(0.0..20.0);
    inputs.utility_solar_mw = rng.random_range(0.0..10.0);
    inputs
}

/// Writes a region's two dataset files under `dir/<region>/`.
pub fn write_region(dir: &Path, baseline: &RegionalBaseline, renewables: &RenewableDefaults) {
    let region_dir = dir.join(&baseline.region);
    fs::create_dir_all(&region_dir).expect("mkdir");
    let b = serde_json::to_string(baseline).expect("serialize baseline");
    let r = serde_json::to_string(renewables).expect("serialize renewables");
    fs::write(region_dir.join(BASELINE_FILE), b).expect("write baseline");
    fs::write(region_dir.join(RENEWABLES_FILE), r).expect("write renewables");
}

/// `|a - b|` relative to the larger magnitude (absolute near zero).
pub fn relative_diff(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale < 1.0 { (a - b).abs() } else { (a - b).abs() / scale }
}
