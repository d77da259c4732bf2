//! Recommendation Engine - public entry point of the pipeline
//!
//! raw FeatureVector → FeatureNormalizer → Classifier → Label Catalog →
//! Explanation Catalog → Decision
//!
//! Normalization and classification failures propagate to the caller. An
//! unknown label or a crop without explanation text resolves to a fallback
//! Decision instead.

use crate::artifacts::ArtifactSet;
use crate::catalog::{ExplanationCatalog, Label, LabelCatalog, GENERIC_EXPLANATION};
use crate::classifier::Classifier;
use crate::decision::Decision;
use crate::error::{ArtifactError, RecommendError};
use crate::features::FeatureVector;
use crate::normalization::FeatureNormalizer;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Stateless inference pipeline over read-only artifacts and catalogs
pub struct RecommendationEngine {
    normalizer: FeatureNormalizer,
    classifier: Box<dyn Classifier>,
    labels: Arc<LabelCatalog>,
    explanations: Arc<ExplanationCatalog>,
}

impl RecommendationEngine {
    /// Engine over the embedded catalogs
    pub fn new(normalizer: FeatureNormalizer, classifier: Box<dyn Classifier>) -> Self {
        Self::with_catalogs(
            normalizer,
            classifier,
            LabelCatalog::builtin(),
            ExplanationCatalog::builtin(),
        )
    }

    pub fn with_catalogs(
        normalizer: FeatureNormalizer,
        classifier: Box<dyn Classifier>,
        labels: Arc<LabelCatalog>,
        explanations: Arc<ExplanationCatalog>,
    ) -> Self {
        let unexplained = explanations.missing_for(&labels);
        if !unexplained.is_empty() {
            tracing::warn!(
                "{} crops have no explanation text, generic text will be used: {:?}",
                unexplained.len(),
                unexplained
            );
        }

        let uncatalogued: Vec<Label> = classifier
            .labels()
            .into_iter()
            .filter(|label| !labels.contains(*label))
            .collect();
        if !uncatalogued.is_empty() {
            tracing::warn!(
                "Classifier can emit labels missing from the catalog: {:?}",
                uncatalogued
            );
        }

        Self {
            normalizer,
            classifier,
            labels,
            explanations,
        }
    }

    pub fn from_artifacts(artifacts: ArtifactSet) -> Self {
        Self::new(artifacts.normalizer, artifacts.classifier)
    }

    /// Load artifacts from `dir` and build an engine over the embedded catalogs
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        Ok(Self::from_artifacts(ArtifactSet::load(dir)?))
    }

    /// Run the full pipeline for one vector
    pub fn recommend(&self, v: &FeatureVector) -> Result<Decision, RecommendError> {
        let normalized = self.normalizer.normalize(v);
        let label = self.classifier.classify(&normalized)?;
        let decision = self.resolve(label);

        tracing::debug!(
            "Features {:?} → label {} → {:?}",
            v.to_array(),
            label,
            decision.crop_name
        );

        Ok(decision)
    }

    /// Recommend for many vectors in parallel, preserving input order
    pub fn recommend_batch(&self, vectors: &[FeatureVector]) -> Vec<Result<Decision, RecommendError>> {
        vectors.par_iter().map(|v| self.recommend(v)).collect()
    }

    /// Map a classifier label onto a Decision
    pub fn resolve(&self, label: Label) -> Decision {
        let Some(record) = self.labels.lookup(label) else {
            tracing::warn!("Classifier emitted label {} outside the crop catalog", label);
            return Decision::undetermined();
        };

        let explanation = match self.explanations.lookup(&record.name) {
            Some(text) => text,
            None => {
                tracing::warn!("No explanation for crop '{}'", record.name);
                GENERIC_EXPLANATION
            }
        };

        Decision::recommended(record, explanation)
    }

    pub fn labels(&self) -> &LabelCatalog {
        &self.labels
    }

    pub fn explanations(&self) -> &ExplanationCatalog {
        &self.explanations
    }
}
