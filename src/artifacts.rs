//! Fitted Artifact Loading
//!
//! Reads the three artifacts produced by the training/export pipeline from a
//! single directory:
//! - `minmaxscaler.json`: min-max bounds
//! - `standscaler.json`: standardization mean / scale
//! - `model.json`: classifier parameters
//!
//! Any failure here is fatal at startup; nothing is served with a partial set.

use crate::classifier::{load_classifier, Classifier};
use crate::error::ArtifactError;
use crate::normalization::{FeatureNormalizer, MinMaxScaler, StandardScaler};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const MIN_MAX_FILE: &str = "minmaxscaler.json";
pub const STANDARD_FILE: &str = "standscaler.json";
pub const MODEL_FILE: &str = "model.json";

/// The two scalers and the classifier, loaded together
pub struct ArtifactSet {
    pub normalizer: FeatureNormalizer,
    pub classifier: Box<dyn Classifier>,
}

impl ArtifactSet {
    /// Load all three artifacts from `dir`
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        tracing::info!("Loading fitted artifacts from {:?}", dir);

        let min_max = MinMaxScaler::load(&dir.join(MIN_MAX_FILE))?;
        let standard = StandardScaler::load(&dir.join(STANDARD_FILE))?;
        let classifier = load_classifier(&dir.join(MODEL_FILE))?;

        tracing::info!(
            "Artifacts loaded: classifier emits {} labels",
            classifier.labels().len()
        );

        Ok(Self {
            normalizer: FeatureNormalizer::new(min_max, standard),
            classifier,
        })
    }
}

/// Read and deserialize one JSON artifact
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts")
    }

    #[test]
    fn test_load_shipped_artifacts() {
        let set = ArtifactSet::load(&shipped_dir()).unwrap();
        assert_eq!(set.classifier.labels().len(), 22);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = ArtifactSet::load(Path::new("/nonexistent/crop-artifacts")).err().unwrap();
        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(err.to_string().contains(MIN_MAX_FILE));
    }

    #[test]
    fn test_read_json_parse_error() {
        // Cargo.toml is not JSON
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }
}
