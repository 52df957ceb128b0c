//! Region lookup: the seam between dataset loading and the pipeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use super::baseline::RegionalBaseline;
use super::renewables::RenewableDefaults;
use crate::error::{Error, Result};

/// File name of a region's baseline dataset inside its catalog directory.
pub const BASELINE_FILE: &str = "baseline.json";
/// File name of a region's renewable defaults inside its catalog directory.
pub const RENEWABLES_FILE: &str = "renewables.json";

/// Resolves region identifiers to their read-only datasets.
///
/// Implementations must be `Sync` to be shared across concurrent runs.
pub trait DatasetSource {
    fn baseline(&self, region: &str) -> Option<&RegionalBaseline>;
    fn renewables(&self, region: &str) -> Option<&RenewableDefaults>;
}

/// In-memory catalog of loaded regions, keyed by region id.
#[derive(Debug, Default, Clone)]
pub struct RegionCatalog {
    baselines: BTreeMap<String, RegionalBaseline>,
    renewables: BTreeMap<String, RenewableDefaults>,
}

impl RegionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a region's datasets.
    pub fn insert(&mut self, baseline: RegionalBaseline, renewables: RenewableDefaults) {
        let id = baseline.region.clone();
        self.renewables.insert(id.clone(), renewables);
        self.baselines.insert(id, baseline);
    }

    /// Region ids present in the catalog, sorted.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.baselines.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }

    /// Loads every region found under `dir`.
    ///
    /// Each subdirectory is one region and must contain [`BASELINE_FILE`]
    /// and [`RENEWABLES_FILE`]. Subdirectories without a baseline file are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed or any region fails to
    /// load or validate.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|source| Error::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut region_dirs = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.join(BASELINE_FILE).is_file() {
                region_dirs.push(path);
            } else {
                debug!(path = %path.display(), "skipping entry without baseline");
            }
        }
        region_dirs.sort();

        let mut catalog = Self::new();
        for region_dir in region_dirs {
            let (baseline, renewables) = load_region(&region_dir)?;
            catalog.insert(baseline, renewables);
        }
        info!(regions = catalog.len(), "dataset catalog loaded");
        Ok(catalog)
    }
}

impl DatasetSource for RegionCatalog {
    fn baseline(&self, region: &str) -> Option<&RegionalBaseline> {
        self.baselines.get(region)
    }

    fn renewables(&self, region: &str) -> Option<&RenewableDefaults> {
        self.renewables.get(region)
    }
}

/// Loads one region directory and checks its two files agree.
fn load_region(dir: &Path) -> Result<(RegionalBaseline, RenewableDefaults)> {
    let baseline = RegionalBaseline::from_json_str(&read(&dir.join(BASELINE_FILE))?)?;
    let renewables_path = dir.join(RENEWABLES_FILE);
    if !renewables_path.is_file() {
        return Err(Error::MissingDataset {
            region: baseline.region.clone(),
            kind: "renewable defaults",
        });
    }
    let renewables = RenewableDefaults::from_json_str(&read(&renewables_path)?)?;
    if renewables.region != baseline.region {
        return Err(Error::invalid(
            "renewables.region",
            format!(
                "\"{}\" does not match baseline region \"{}\"",
                renewables.region, baseline.region
            ),
        ));
    }
    renewables.check_alignment(baseline.hour_count())?;
    debug!(
        region = %baseline.region,
        hours = baseline.hour_count(),
        units = baseline.units.len(),
        "region loaded"
    );
    Ok((baseline, renewables))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
