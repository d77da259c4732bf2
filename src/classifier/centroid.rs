//! Nearest-centroid classifier
//!
//! One centroid per label in normalized feature space; the closest centroid
//! (squared Euclidean distance) wins. Ties go to the centroid listed first.

use crate::catalog::Label;
use crate::classifier::Classifier;
use crate::error::{ArtifactError, ClassifyError};
use crate::features::{NormalizedVector, FEATURE_COUNT};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentroidParams {
    pub centroids: Vec<CentroidEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentroidEntry {
    pub label: u32,
    pub center: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct CentroidClassifier {
    centroids: Vec<(Label, [f64; FEATURE_COUNT])>,
}

impl CentroidClassifier {
    const ARTIFACT: &'static str = "model";

    pub fn from_params(params: CentroidParams) -> Result<Self, ArtifactError> {
        if params.centroids.is_empty() {
            return Err(ArtifactError::incompatible(Self::ARTIFACT, "no centroids"));
        }

        let mut seen = FxHashSet::default();
        let mut centroids = Vec::with_capacity(params.centroids.len());

        for entry in params.centroids {
            if !seen.insert(entry.label) {
                return Err(ArtifactError::incompatible(
                    Self::ARTIFACT,
                    format!("duplicate centroid for label {}", entry.label),
                ));
            }

            let center: [f64; FEATURE_COUNT] = entry.center.as_slice().try_into().map_err(|_| {
                ArtifactError::incompatible(
                    Self::ARTIFACT,
                    format!(
                        "centroid for label {} has {} values, expected {}",
                        entry.label,
                        entry.center.len(),
                        FEATURE_COUNT
                    ),
                )
            })?;

            if center.iter().any(|c| !c.is_finite()) {
                return Err(ArtifactError::incompatible(
                    Self::ARTIFACT,
                    format!("centroid for label {} is not finite", entry.label),
                ));
            }

            centroids.push((Label(entry.label), center));
        }

        Ok(Self { centroids })
    }
}

impl Classifier for CentroidClassifier {
    fn classify(&self, n: &NormalizedVector) -> Result<Label, ClassifyError> {
        let mut best: Option<(Label, f64)> = None;
        for (label, center) in &self.centroids {
            let dist: f64 = n
                .values()
                .iter()
                .zip(center.iter())
                .map(|(x, c)| (x - c) * (x - c))
                .sum();

            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((*label, dist)),
            }
        }

        best.map(|(label, _)| label)
            .ok_or_else(|| ClassifyError::Failed("model has no centroids".to_string()))
    }

    fn labels(&self) -> Vec<Label> {
        self.centroids.iter().map(|(label, _)| *label).collect()
    }
}
