//! Classifier adapters
//!
//! The recommendation engine only depends on the `Classifier` trait. Concrete
//! models are loaded from `model.json`, whose `kind` field selects the
//! adapter:
//! - `nearest_centroid`: `centroid::CentroidClassifier`
//! - `decision_tree`: `tree::DecisionTreeClassifier`

pub mod centroid;
pub mod tree;

pub use centroid::{CentroidClassifier, CentroidParams};
pub use tree::{DecisionTreeClassifier, TreeNode, TreeParams};

use crate::artifacts::read_json;
use crate::catalog::Label;
use crate::error::{ArtifactError, ClassifyError};
use crate::features::NormalizedVector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A fitted classifier over normalized feature vectors
///
/// Implementations must be deterministic and side-effect free; the engine
/// calls them concurrently from many threads. Extreme inputs can normalize to
/// infinite components, which must still yield a label.
pub trait Classifier: Send + Sync {
    fn classify(&self, n: &NormalizedVector) -> Result<Label, ClassifyError>;

    /// Every label this model can emit
    fn labels(&self) -> Vec<Label>;
}

/// Serialized model, tagged by adapter kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    NearestCentroid(CentroidParams),
    DecisionTree(TreeParams),
}

impl ModelArtifact {
    /// Validate the parameters and build the matching adapter
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ArtifactError> {
        Ok(match self {
            ModelArtifact::NearestCentroid(params) => Box::new(CentroidClassifier::from_params(params)?),
            ModelArtifact::DecisionTree(params) => Box::new(DecisionTreeClassifier::from_params(params)?),
        })
    }
}

/// Load `model.json` into a boxed classifier
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ArtifactError> {
    let artifact: ModelArtifact = read_json(path)?;
    artifact.into_classifier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_artifact_dispatch() {
        let centroid = r#"{
            "kind": "nearest_centroid",
            "centroids": [
                {"label": 1, "center": [0, 0, 0, 0, 0, 0]},
                {"label": 2, "center": [1, 1, 1, 1, 1, 1]}
            ]
        }"#;
        let model: ModelArtifact = serde_json::from_str(centroid).unwrap();
        let classifier = model.into_classifier().unwrap();
        assert_eq!(classifier.labels(), vec![Label(1), Label(2)]);

        let tree = r#"{
            "kind": "decision_tree",
            "nodes": [
                {"type": "split", "feature": 0, "threshold": 0.5, "left": 1, "right": 2},
                {"type": "leaf", "label": 3},
                {"type": "leaf", "label": 4}
            ]
        }"#;
        let model: ModelArtifact = serde_json::from_str(tree).unwrap();
        let classifier = model.into_classifier().unwrap();
        let n = NormalizedVector::new([0.9, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(classifier.classify(&n).unwrap(), Label(4));
    }

    #[test]
    fn test_unknown_kind_fails_to_parse() {
        let json = r#"{"kind": "random_forest", "trees": []}"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }
}
