//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::eere::EereInputs;
use crate::error::{Error, FieldError, Result};

/// Top-level scenario configuration parsed from TOML.
///
/// Every field has a default. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or pick a built-in with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Which region to run against.
    #[serde(default)]
    pub run: RunConfig,
    /// EERE program parameters.
    #[serde(default)]
    pub eere: EereInputs,
}

/// Run-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Region identifier in the dataset catalog (e.g., `"NE"`).
    pub region: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            region: "NE".to_string(),
        }
    }
}

/// New England transmission and distribution losses.
const DEFAULT_LINE_LOSS: f64 = 0.07;

impl ScenarioConfig {
    /// Economy-wide efficiency: 2% off every hour.
    pub fn efficiency() -> Self {
        Self {
            run: RunConfig::default(),
            eere: EereInputs {
                broad_percent: 2.0,
                line_loss: DEFAULT_LINE_LOSS,
                ..EereInputs::default()
            },
        }
    }

    /// Peak shaving: 5% off the top 10% of load hours.
    pub fn peak() -> Self {
        Self {
            run: RunConfig::default(),
            eere: EereInputs {
                targeted_percent: 5.0,
                top_hours: 10.0,
                line_loss: DEFAULT_LINE_LOSS,
                ..EereInputs::default()
            },
        }
    }

    /// 500 MW of onshore wind.
    pub fn wind() -> Self {
        Self {
            run: RunConfig::default(),
            eere: EereInputs {
                onshore_wind_mw: 500.0,
                line_loss: DEFAULT_LINE_LOSS,
                ..EereInputs::default()
            },
        }
    }

    /// 300 MW utility-scale plus 100 MW rooftop solar.
    pub fn solar() -> Self {
        Self {
            run: RunConfig::default(),
            eere: EereInputs {
                utility_solar_mw: 300.0,
                rooftop_solar_mw: 100.0,
                line_loss: DEFAULT_LINE_LOSS,
                ..EereInputs::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["efficiency", "peak", "wind", "solar"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self> {
        match name {
            "efficiency" => Ok(Self::efficiency()),
            "peak" => Ok(Self::peak()),
            "wind" => Ok(Self::wind()),
            "solar" => Ok(Self::solar()),
            _ => Err(Error::invalid(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Read` if the file cannot be read and `Error::Toml` if
    /// the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Toml` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.run.region.trim().is_empty() {
            errors.push(FieldError::new("run.region", "must not be empty"));
        }
        errors.extend(self.eere.validate());
        errors
    }
}
