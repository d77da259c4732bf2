//! Error taxonomy for the recommendation pipeline
//!
//! Boundary errors (`InputError`, `ArtifactError`) stop a request or the
//! process. Unknown labels and missing explanations are not errors: they
//! resolve to fallback decisions inside the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Raw input could not be turned into a `FeatureVector`
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("field '{field}' is not a finite number: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("expected {expected} measurements, got {got}")]
    WrongArity { expected: usize, got: usize },
}

/// A fitted artifact failed to load or does not fit the 6-feature layout
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact '{artifact}' is incompatible: {reason}")]
    Incompatible {
        artifact: &'static str,
        reason: String,
    },
}

impl ArtifactError {
    pub(crate) fn incompatible(artifact: &'static str, reason: impl Into<String>) -> Self {
        ArtifactError::Incompatible {
            artifact,
            reason: reason.into(),
        }
    }
}

/// The classifier could not produce a label
#[derive(Debug, Error, PartialEq)]
pub enum ClassifyError {
    #[error("classifier failed: {0}")]
    Failed(String),
}

/// Caller-visible failure of a single `recommend` call
#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}
