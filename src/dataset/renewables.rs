//! Per-region hourly capacity factors for the renewable EERE programs.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Renewable technologies an EERE scenario can add capacity for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technology {
    OnshoreWind,
    OffshoreWind,
    UtilitySolar,
    RooftopSolar,
}

impl Technology {
    pub const ALL: [Technology; 4] = [
        Technology::OnshoreWind,
        Technology::OffshoreWind,
        Technology::UtilitySolar,
        Technology::RooftopSolar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Technology::OnshoreWind => "onshore_wind",
            Technology::OffshoreWind => "offshore_wind",
            Technology::UtilitySolar => "utility_solar",
            Technology::RooftopSolar => "rooftop_solar",
        }
    }
}

/// Hourly fractional output (0.0–1.0 of nameplate) per technology.
///
/// Series are aligned index-for-index with the region's load series.
/// `offshore_wind` is empty for regions without an offshore resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenewableDefaults {
    pub region: String,
    pub onshore_wind: Vec<f64>,
    #[serde(default)]
    pub offshore_wind: Vec<f64>,
    pub utility_solar: Vec<f64>,
    pub rooftop_solar: Vec<f64>,
}

impl RenewableDefaults {
    /// Parses and validates renewable defaults from JSON.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let defaults: Self = serde_json::from_str(s)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// A profile with zero output everywhere, for regions or tests that only
    /// model efficiency programs.
    pub fn zeros(region: &str, hours: usize) -> Self {
        Self {
            region: region.to_string(),
            onshore_wind: vec![0.0; hours],
            offshore_wind: vec![0.0; hours],
            utility_solar: vec![0.0; hours],
            rooftop_solar: vec![0.0; hours],
        }
    }

    pub fn series(&self, tech: Technology) -> &[f64] {
        match tech {
            Technology::OnshoreWind => &self.onshore_wind,
            Technology::OffshoreWind => &self.offshore_wind,
            Technology::UtilitySolar => &self.utility_solar,
            Technology::RooftopSolar => &self.rooftop_solar,
        }
    }

    pub fn has_offshore_wind(&self) -> bool {
        !self.offshore_wind.is_empty()
    }

    /// Capacity factor for `tech` at `hour`; zero past the end of the series.
    pub fn factor(&self, tech: Technology, hour: usize) -> f64 {
        self.series(tech).get(hour).copied().unwrap_or(0.0)
    }

    /// Checks every capacity factor is finite and within [0, 1].
    pub fn validate(&self) -> Result<()> {
        for tech in Technology::ALL {
            if let Some((i, v)) = self
                .series(tech)
                .iter()
                .enumerate()
                .find(|(_, v)| !(0.0..=1.0).contains(*v))
            {
                return Err(Error::DegenerateSeries(format!(
                    "{} factor at hour {i} is {v}, expected [0, 1]",
                    tech.name()
                )));
            }
        }
        Ok(())
    }

    /// Checks that the required series line up with `hours` load records.
    ///
    /// Offshore wind may be absent; a present offshore series must match.
    pub fn check_alignment(&self, hours: usize) -> Result<()> {
        for tech in Technology::ALL {
            let len = self.series(tech).len();
            let optional = tech == Technology::OffshoreWind && len == 0;
            if !optional && len != hours {
                return Err(Error::DegenerateSeries(format!(
                    "{} defaults for region \"{}\" have {len} hours, expected {hours}",
                    tech.name(),
                    self.region
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_are_aligned() {
        let d = RenewableDefaults::zeros("T", 4);
        assert!(d.check_alignment(4).is_ok());
        assert!(d.check_alignment(5).is_err());
    }

    #[test]
    fn offshore_may_be_absent() {
        let mut d = RenewableDefaults::zeros("T", 3);
        d.offshore_wind.clear();
        assert!(!d.has_offshore_wind());
        assert!(d.check_alignment(3).is_ok());
        assert_eq!(d.factor(Technology::OffshoreWind, 1), 0.0);
    }

    #[test]
    fn out_of_range_factor_rejected() {
        let mut d = RenewableDefaults::zeros("T", 3);
        d.utility_solar[2] = 1.5;
        assert!(matches!(d.validate(), Err(Error::DegenerateSeries(_))));
    }

    #[test]
    fn parses_json_without_offshore() {
        let json = r#"{
            "region": "T",
            "onshore_wind": [0.3, 0.4],
            "utility_solar": [0.0, 0.2],
            "rooftop_solar": [0.0, 0.1]
        }"#;
        let d = RenewableDefaults::from_json_str(json).ok();
        assert_eq!(d.as_ref().map(RenewableDefaults::has_offshore_wind), Some(false));
        assert_eq!(d.map(|d| d.factor(Technology::OnshoreWind, 1)), Some(0.4));
    }
}
