//! Command-line arguments for the `avert` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Estimate emissions displaced by energy-efficiency and renewable-energy
/// programs in a grid region.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory with one subdirectory of dataset files per region
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Load the scenario from a TOML file
    #[arg(short, long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in scenario (efficiency, peak, wind, solar)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Override the scenario's region
    #[arg(short, long)]
    pub region: Option<String>,

    /// Print the full result as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
