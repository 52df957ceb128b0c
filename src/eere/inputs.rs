//! User-entered EERE program parameters.

use serde::{Deserialize, Serialize};

use crate::dataset::Technology;
use crate::error::{Error, FieldError, Result};

/// One scenario's EERE program parameters.
///
/// Every field defaults to zero. At most one of `annual_gwh` /
/// `constant_mw` and at most one of `broad_percent` / `targeted_percent`
/// may be non-zero; [`EereInputs::validate`] reports violations rather than
/// picking one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EereInputs {
    /// Annual energy reduction spread evenly across hours (GWh).
    pub annual_gwh: f64,
    /// Constant reduction applied to every hour (MW).
    pub constant_mw: f64,
    /// Percentage reduction applied to all hours.
    pub broad_percent: f64,
    /// Percentage reduction applied only to the top-load hours.
    pub targeted_percent: f64,
    /// Share of highest-load hours targeted by `targeted_percent` (percent).
    pub top_hours: f64,
    /// Added onshore wind capacity (MW).
    pub onshore_wind_mw: f64,
    /// Added offshore wind capacity (MW).
    pub offshore_wind_mw: f64,
    /// Added utility-scale solar capacity (MW).
    pub utility_solar_mw: f64,
    /// Added distributed rooftop solar capacity (MW).
    pub rooftop_solar_mw: f64,
    /// Regional transmission and distribution loss fraction (0.0–1.0).
    pub line_loss: f64,
}

impl EereInputs {
    /// Installed capacity entered for a renewable technology (MW).
    pub fn capacity_mw(&self, tech: Technology) -> f64 {
        match tech {
            Technology::OnshoreWind => self.onshore_wind_mw,
            Technology::OffshoreWind => self.offshore_wind_mw,
            Technology::UtilitySolar => self.utility_solar_mw,
            Technology::RooftopSolar => self.rooftop_solar_mw,
        }
    }

    /// Active percentage program (broad or targeted), zero if neither.
    pub fn percent_reduction(&self) -> f64 {
        if self.broad_percent != 0.0 {
            self.broad_percent
        } else {
            self.targeted_percent
        }
    }

    pub fn is_broad(&self) -> bool {
        self.broad_percent != 0.0
    }

    /// Returns `true` when no program field carries a value.
    ///
    /// `line_loss` is a regional property and `top_hours` only qualifies
    /// a targeted program, so neither counts.
    pub fn is_empty(&self) -> bool {
        self.program_fields()
            .iter()
            .filter(|(name, _)| *name != "top_hours")
            .all(|(_, v)| *v == 0.0)
    }

    fn program_fields(&self) -> [(&'static str, f64); 9] {
        [
            ("annual_gwh", self.annual_gwh),
            ("constant_mw", self.constant_mw),
            ("broad_percent", self.broad_percent),
            ("targeted_percent", self.targeted_percent),
            ("top_hours", self.top_hours),
            ("onshore_wind_mw", self.onshore_wind_mw),
            ("offshore_wind_mw", self.offshore_wind_mw),
            ("utility_solar_mw", self.utility_solar_mw),
            ("rooftop_solar_mw", self.rooftop_solar_mw),
        ]
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the inputs are usable.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for (name, value) in self.program_fields() {
            if !value.is_finite() || value < 0.0 {
                errors.push(FieldError::new(
                    format!("eere.{name}"),
                    format!("must be a finite number >= 0, got {value}"),
                ));
            }
        }
        for (name, value) in [
            ("broad_percent", self.broad_percent),
            ("targeted_percent", self.targeted_percent),
            ("top_hours", self.top_hours),
        ] {
            if value > 100.0 {
                errors.push(FieldError::new(
                    format!("eere.{name}"),
                    format!("must be <= 100, got {value}"),
                ));
            }
        }
        if !(0.0..1.0).contains(&self.line_loss) {
            errors.push(FieldError::new(
                "eere.line_loss",
                format!("must be in [0.0, 1.0), got {}", self.line_loss),
            ));
        }

        if self.annual_gwh != 0.0 && self.constant_mw != 0.0 {
            errors.push(FieldError::new(
                "eere.constant_mw",
                "cannot be combined with eere.annual_gwh; choose one",
            ));
        }
        if self.broad_percent != 0.0 && self.targeted_percent != 0.0 {
            errors.push(FieldError::new(
                "eere.targeted_percent",
                "cannot be combined with eere.broad_percent; choose one",
            ));
        }
        if self.targeted_percent > 0.0 && self.top_hours <= 0.0 {
            errors.push(FieldError::new(
                "eere.top_hours",
                "must be > 0 when eere.targeted_percent is set",
            ));
        }

        errors
    }

    /// Like [`EereInputs::validate`] but as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` carrying every failing field.
    pub fn check(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(errors))
        }
    }
}
