//! Normalization Utilities
//!
//! Applies the two pre-fitted scalers to a feature vector:
//! 1. Min-max scaling onto the fitted feature range
//! 2. Standardization with the fitted mean / scale
//!
//! The order is part of the model contract. The standard scaler was fitted on
//! min-max output, so swapping the steps silently produces a different
//! distribution.

use crate::artifacts::read_json;
use crate::error::ArtifactError;
use crate::features::{FeatureVector, NormalizedVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A fitted per-dimension transform
pub trait Transform: Send + Sync {
    fn transform(&self, values: [f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT];
}

/// Serialized min-max parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxParams {
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: [f64; 2],
}

fn default_feature_range() -> [f64; 2] {
    [0.0, 1.0]
}

/// Serialized standardization parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Linear rescaling using fitted per-dimension bounds
///
/// Inputs outside the fitted bounds map outside the feature range; nothing is
/// clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    scale: [f64; FEATURE_COUNT],
    min: [f64; FEATURE_COUNT],
}

impl MinMaxScaler {
    const ARTIFACT: &'static str = "minmaxscaler";

    pub fn from_params(params: &MinMaxParams) -> Result<Self, ArtifactError> {
        let data_min = fixed_width(Self::ARTIFACT, "data_min", &params.data_min)?;
        let data_max = fixed_width(Self::ARTIFACT, "data_max", &params.data_max)?;
        let [lo, hi] = params.feature_range;

        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return Err(ArtifactError::incompatible(
                Self::ARTIFACT,
                format!("invalid feature_range [{}, {}]", lo, hi),
            ));
        }

        let mut scale = [0.0; FEATURE_COUNT];
        let mut min = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let range = data_max[i] - data_min[i];
            if range < 0.0 {
                return Err(ArtifactError::incompatible(
                    Self::ARTIFACT,
                    format!("data_max < data_min for feature {}", i),
                ));
            }
            // Constant training column: keep unit scale instead of dividing by zero
            let data_range = if range == 0.0 { 1.0 } else { range };
            scale[i] = (hi - lo) / data_range;
            min[i] = lo - data_min[i] * scale[i];
        }

        Ok(Self { scale, min })
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let params: MinMaxParams = read_json(path)?;
        Self::from_params(&params)
    }
}

impl Transform for MinMaxScaler {
    fn transform(&self, values: [f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = values[i] * self.scale[i] + self.min[i];
        }
        out
    }
}

/// Centering and scaling using fitted per-dimension mean / standard deviation
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    const ARTIFACT: &'static str = "standscaler";

    pub fn from_params(params: &StandardParams) -> Result<Self, ArtifactError> {
        let mean = fixed_width(Self::ARTIFACT, "mean", &params.mean)?;
        let scale = fixed_width(Self::ARTIFACT, "scale", &params.scale)?;

        if let Some(i) = scale.iter().position(|&s| s == 0.0) {
            return Err(ArtifactError::incompatible(
                Self::ARTIFACT,
                format!("zero scale for feature {}", i),
            ));
        }

        Ok(Self { mean, scale })
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let params: StandardParams = read_json(path)?;
        Self::from_params(&params)
    }
}

impl Transform for StandardScaler {
    fn transform(&self, values: [f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (values[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// Both fitted scalers, applied min-max first
#[derive(Debug, Clone)]
pub struct FeatureNormalizer {
    min_max: MinMaxScaler,
    standard: StandardScaler,
}

impl FeatureNormalizer {
    pub fn new(min_max: MinMaxScaler, standard: StandardScaler) -> Self {
        Self { min_max, standard }
    }

    /// Min-max then standardize. Pure; no error path.
    pub fn normalize(&self, v: &FeatureVector) -> NormalizedVector {
        let scaled = self.min_max.transform(v.to_array());
        NormalizedVector::new(self.standard.transform(scaled))
    }
}

/// Check a parameter vector has exactly one value per feature, all finite
fn fixed_width(
    artifact: &'static str,
    field: &str,
    values: &[f64],
) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        ArtifactError::incompatible(
            artifact,
            format!("{} has {} values, expected {}", field, values.len(), FEATURE_COUNT),
        )
    })?;

    if let Some(i) = array.iter().position(|v| !v.is_finite()) {
        return Err(ArtifactError::incompatible(
            artifact,
            format!("{}[{}] is not finite", field, i),
        ));
    }

    Ok(array)
}
