//! Crop Recommender
//!
//! Recommends a crop from six soil/environment measurements (nitrogen,
//! phosphorus, potassium, temperature, humidity, pH).
//!
//! Pipeline:
//! - `features`: validated input vectors
//! - `normalization`: min-max then standardization, with fitted parameters
//! - `classifier`: pluggable fitted classifier behind the `Classifier` trait
//! - `catalog`: label → crop and crop → explanation tables
//! - `recommender`: orchestration producing a `Decision`
//!
//! The web layer (`api_server`) is behind the `api` feature.

pub mod error;
pub mod features;
pub mod catalog;
pub mod normalization;
pub mod classifier;
pub mod artifacts;
pub mod decision;
pub mod recommender;
pub mod batch;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::{ArtifactError, ClassifyError, InputError, RecommendError};
pub use features::{FeatureVector, NormalizedVector, FEATURE_COUNT, FEATURE_NAMES, FORM_FIELDS};
pub use catalog::{CropRecord, ExplanationCatalog, Label, LabelCatalog, GENERIC_EXPLANATION};
pub use normalization::{FeatureNormalizer, MinMaxScaler, StandardScaler, Transform};
pub use classifier::{load_classifier, Classifier, ModelArtifact};
pub use artifacts::ArtifactSet;
pub use decision::Decision;
pub use recommender::RecommendationEngine;
pub use config::ServiceConfig;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
