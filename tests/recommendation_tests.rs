//! Recommendation Integration Tests
//!
//! Runs the full pipeline against the fitted artifacts shipped in `artifacts/`.

use crop_recommender::{
    ArtifactError, ArtifactSet, Decision, ExplanationCatalog, FeatureVector, Label,
    LabelCatalog, RecommendationEngine,
};
use std::fs;
use std::path::{Path, PathBuf};

fn artifact_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts")
}

fn engine() -> RecommendationEngine {
    RecommendationEngine::load(&artifact_dir()).expect("shipped artifacts load")
}

/// Scratch copy of the shipped artifacts, one directory per test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("crop_recommender_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    for file in ["minmaxscaler.json", "standscaler.json", "model.json"] {
        fs::copy(artifact_dir().join(file), dir.join(file)).unwrap();
    }
    dir
}

// =========================================================================
// End-to-end scenarios
// =========================================================================

#[test]
fn test_rice_scenario() {
    let v = FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5).unwrap();
    let decision = engine().recommend(&v).unwrap();

    assert!(decision.matched);
    assert_eq!(decision.crop_name.as_deref(), Some("Rice"));
    assert_eq!(decision.image_asset, "rice.png");
    assert!(decision.headline.contains("Rice"));
    assert_eq!(
        Some(decision.explanation.as_str()),
        ExplanationCatalog::builtin().lookup("Rice")
    );
}

#[test]
fn test_typical_conditions_per_crop() {
    // Training-set averages for a few contrasting crops
    let cases = [
        ([20.8, 134.2, 199.9, 22.6, 92.3, 5.9], "Apple"),
        ([40.1, 67.8, 79.9, 18.9, 16.9, 7.3], "Chickpea"),
        ([101.2, 28.7, 29.9, 25.5, 58.9, 6.8], "Coffee"),
        ([117.8, 46.2, 19.6, 24.0, 79.8, 6.9], "Cotton"),
        ([21.4, 48.0, 20.2, 28.2, 53.2, 6.8], "Mothbeans"),
    ];

    let engine = engine();
    for (values, crop) in cases {
        let v = FeatureVector::from_array(values).unwrap();
        let decision = engine.recommend(&v).unwrap();
        assert_eq!(decision.crop_name.as_deref(), Some(crop), "input {:?}", values);
    }
}

#[test]
fn test_extreme_input_still_decides() {
    let engine = engine();
    let extremes = [
        [-999.0, 42.0, 43.0, 20.8, 82.0, 6.5],
        [1e6, 1e6, 1e6, 1e6, 1e6, 1e6],
        [-1e6, -1e6, -1e6, -1e6, -1e6, -1e6],
        [0.0; 6],
    ];

    for values in extremes {
        let v = FeatureVector::from_array(values).unwrap();
        let decision = engine.recommend(&v).unwrap();
        assert!(!decision.headline.is_empty());
        assert!(!decision.explanation.is_empty());
    }
}

#[test]
fn test_overflowing_input_still_decides() {
    // Finite inputs whose normalized form overflows to infinity
    let engine = engine();
    let extremes = [
        [90.0, 42.0, 43.0, 20.8, 82.0, f64::MAX],
        [f64::MAX, 42.0, 43.0, 20.8, 82.0, 6.5],
        [-f64::MAX, -f64::MAX, 43.0, 20.8, 82.0, 6.5],
        [1e200; 6],
    ];

    for values in extremes {
        let v = FeatureVector::from_array(values).unwrap();
        let decision = engine.recommend(&v).unwrap();
        assert!(decision.matched, "input {:?}", values);
        assert!(decision.crop_name.is_some());
        assert!(!decision.explanation.is_empty());
    }
}

#[test]
fn test_every_model_label_is_catalogued() {
    let set = ArtifactSet::load(&artifact_dir()).unwrap();
    let catalog = LabelCatalog::builtin();
    for label in set.classifier.labels() {
        assert!(catalog.contains(label), "label {} not in catalog", label);
    }
}

#[test]
fn test_batch_matches_single_calls() {
    let engine = engine();
    let vectors: Vec<FeatureVector> = (0..50)
        .map(|i| {
            let f = i as f64;
            FeatureVector::new(f * 2.8, 5.0 + f * 2.6, 5.0 + f * 4.0, 10.0 + f * 0.6, 15.0 + f * 1.7, 4.0 + f * 0.1)
                .unwrap()
        })
        .collect();

    let batch = engine.recommend_batch(&vectors);
    for (v, result) in vectors.iter().zip(batch) {
        assert_eq!(result.unwrap(), engine.recommend(v).unwrap());
    }
}

#[test]
fn test_resolve_outside_label_space() {
    assert_eq!(engine().resolve(Label(23)), Decision::undetermined());
}

// =========================================================================
// Artifact loading failures
// =========================================================================

#[test]
fn test_missing_model_is_fatal() {
    let dir = scratch_dir("missing_model");
    fs::remove_file(dir.join("model.json")).unwrap();

    let err = RecommendationEngine::load(&dir).err().unwrap();
    assert!(matches!(err, ArtifactError::Io { .. }));
}

#[test]
fn test_wrong_dimensionality_is_fatal() {
    let dir = scratch_dir("wrong_dim");
    fs::write(
        dir.join("standscaler.json"),
        r#"{"mean": [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7], "scale": [1, 1, 1, 1, 1, 1, 1]}"#,
    )
    .unwrap();

    let err = RecommendationEngine::load(&dir).err().unwrap();
    assert!(matches!(err, ArtifactError::Incompatible { artifact: "standscaler", .. }));
}

#[test]
fn test_corrupt_model_is_fatal() {
    let dir = scratch_dir("corrupt_model");
    fs::write(dir.join("model.json"), "{\"kind\": \"nearest_centroid\", \"centroids\": [").unwrap();

    let err = RecommendationEngine::load(&dir).err().unwrap();
    assert!(matches!(err, ArtifactError::Parse { .. }));
}

#[test]
fn test_decision_tree_artifact() {
    let dir = scratch_dir("tree_model");
    // humidity (index 4) splits dry from humid, then nitrogen
    fs::write(
        dir.join("model.json"),
        r#"{
            "kind": "decision_tree",
            "nodes": [
                {"type": "split", "feature": 4, "threshold": 0.0, "left": 1, "right": 2},
                {"type": "leaf", "label": 21},
                {"type": "split", "feature": 0, "threshold": 0.0, "left": 3, "right": 4},
                {"type": "leaf", "label": 7},
                {"type": "leaf", "label": 1}
            ]
        }"#,
    )
    .unwrap();

    let engine = RecommendationEngine::load(&dir).unwrap();
    let humid_rich = FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5).unwrap();
    let dry = FeatureVector::new(40.0, 67.0, 80.0, 18.0, 16.0, 7.3).unwrap();
    let humid_poor = FeatureVector::new(10.0, 16.0, 10.0, 22.0, 92.0, 7.0).unwrap();

    assert_eq!(engine.recommend(&humid_rich).unwrap().crop_name.as_deref(), Some("Rice"));
    assert_eq!(engine.recommend(&dry).unwrap().crop_name.as_deref(), Some("Chickpea"));
    assert_eq!(engine.recommend(&humid_poor).unwrap().crop_name.as_deref(), Some("Orange"));
}
