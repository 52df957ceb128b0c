//! Error types shared across the displacement pipeline.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A single rejected input field with a human-readable constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted field path (e.g., `"eere.constant_mw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised while loading datasets or running a displacement.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or contradictory EERE inputs. Carries every failing field.
    #[error("invalid input: {}", join_fields(.0))]
    InvalidInput(Vec<FieldError>),

    /// Every EERE program field is zero, so there is nothing to displace.
    #[error("no EERE programs are active (all inputs are zero)")]
    NoActivePrograms,

    /// The region has no baseline dataset or renewable defaults loaded.
    #[error("missing {kind} for region \"{region}\"")]
    MissingDataset { region: String, kind: &'static str },

    /// An empty or structurally broken hourly series.
    #[error("degenerate series: {0}")]
    DegenerateSeries(String),

    /// Failed to read a dataset or scenario file.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset JSON could not be parsed.
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Scenario TOML could not be parsed.
    #[error("invalid scenario TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Shorthand for a single-field [`Error::InvalidInput`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidInput(vec![FieldError::new(field, message)])
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
