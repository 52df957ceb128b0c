//! `avert` entry point: CLI wiring, dataset loading, and report output.

mod cli;

use std::process;

use avert::config::ScenarioConfig;
use avert::dataset::RegionCatalog;
use avert::displacement::{DisplacementEngine, DisplacementResult};
use avert::logging;
use clap::Parser;

use crate::cli::Cli;

/// Exit status when the run completes but breaks the hard limit.
const EXIT_HARD_LIMIT: i32 = 3;

fn load_scenario(cli: &Cli) -> avert::Result<ScenarioConfig> {
    // --scenario takes priority, then --preset, then the efficiency preset
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::efficiency()
    };
    if let Some(ref region) = cli.region {
        scenario.run.region = region.clone();
    }
    Ok(scenario)
}

fn run(cli: &Cli) -> avert::Result<DisplacementResult> {
    let scenario = load_scenario(cli)?;
    let errors = scenario.validate();
    if !errors.is_empty() {
        return Err(avert::Error::InvalidInput(errors));
    }

    let catalog = RegionCatalog::load_dir(&cli.data_dir)?;
    DisplacementEngine::new(&catalog).run(&scenario.run.region, &scenario.eere)
}

fn print_hard_limit_banner(result: &DisplacementResult) {
    let hard = &result.validation().hard;
    eprintln!("************************************************************");
    eprintln!("  HARD LIMIT EXCEEDED: the EERE profile displaces more than");
    eprintln!("  30% of regional load in at least one hour.");
    eprintln!(
        "  Worst hour: {} (severity {:.2}). Results are not reliable.",
        hard.top_exceedance_index, hard.top_exceedance_value
    );
    eprintln!("************************************************************");
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match run(&cli) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize result: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{result}");
    }

    if result.soft_limit_exceeded() && !result.hard_limit_exceeded() {
        let soft = &result.validation().soft;
        eprintln!(
            "warning: soft limit of {}% exceeded (worst hour {}, severity {:.2})",
            result.max_ee_percent, soft.top_exceedance_index, soft.top_exceedance_value
        );
    }
    if result.hard_limit_exceeded() {
        print_hard_limit_banner(&result);
        process::exit(EXIT_HARD_LIMIT);
    }
}
