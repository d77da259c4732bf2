//! Decision tree classifier
//!
//! Flat node array exported from a fitted tree. Node 0 is the root; a split
//! sends `x[feature] <= threshold` left. Children always sit after their
//! parent, so traversal is bounded by the node count.

use crate::catalog::Label;
use crate::classifier::Classifier;
use crate::error::{ArtifactError, ClassifyError};
use crate::features::{NormalizedVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        label: u32,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    nodes: Vec<TreeNode>,
}

impl DecisionTreeClassifier {
    const ARTIFACT: &'static str = "model";

    pub fn from_params(params: TreeParams) -> Result<Self, ArtifactError> {
        let nodes = params.nodes;
        if nodes.is_empty() {
            return Err(ArtifactError::incompatible(Self::ARTIFACT, "tree has no nodes"));
        }

        for (idx, node) in nodes.iter().enumerate() {
            if let TreeNode::Split { feature, threshold, left, right } = *node {
                if feature >= FEATURE_COUNT {
                    return Err(ArtifactError::incompatible(
                        Self::ARTIFACT,
                        format!("node {} splits on feature {} (only {} features)", idx, feature, FEATURE_COUNT),
                    ));
                }
                if !threshold.is_finite() {
                    return Err(ArtifactError::incompatible(
                        Self::ARTIFACT,
                        format!("node {} has a non-finite threshold", idx),
                    ));
                }
                for child in [left, right] {
                    if child <= idx || child >= nodes.len() {
                        return Err(ArtifactError::incompatible(
                            Self::ARTIFACT,
                            format!("node {} has invalid child index {}", idx, child),
                        ));
                    }
                }
            }
        }

        Ok(Self { nodes })
    }
}

impl Classifier for DecisionTreeClassifier {
    fn classify(&self, n: &NormalizedVector) -> Result<Label, ClassifyError> {
        let x = n.values();
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { label }) => return Ok(Label(*label)),
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ClassifyError::Failed(format!("tree node {} out of range", idx)));
                }
            }
        }
    }

    fn labels(&self) -> Vec<Label> {
        let labels: BTreeSet<u32> = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                TreeNode::Leaf { label } => Some(*label),
                TreeNode::Split { .. } => None,
            })
            .collect();
        labels.into_iter().map(Label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode::Split { feature, threshold, left, right }
    }

    fn leaf(label: u32) -> TreeNode {
        TreeNode::Leaf { label }
    }

    //          [0] humidity <= 0.0
    //         /                \
    //   [1] N <= 0.5          leaf 1 (rice)
    //    /        \
    // leaf 20   leaf 2
    fn small_tree() -> DecisionTreeClassifier {
        DecisionTreeClassifier::from_params(TreeParams {
            nodes: vec![
                split(4, 0.0, 1, 4),
                split(0, 0.5, 2, 3),
                leaf(20),
                leaf(2),
                leaf(1),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_traversal() {
        let tree = small_tree();
        let humid = NormalizedVector::new([0.0, 0.0, 0.0, 0.0, 0.8, 0.0]);
        let dry_low_n = NormalizedVector::new([-1.0, 0.0, 0.0, 0.0, -0.8, 0.0]);
        let dry_high_n = NormalizedVector::new([1.0, 0.0, 0.0, 0.0, -0.8, 0.0]);
        assert_eq!(tree.classify(&humid).unwrap(), Label(1));
        assert_eq!(tree.classify(&dry_low_n).unwrap(), Label(20));
        assert_eq!(tree.classify(&dry_high_n).unwrap(), Label(2));
    }

    #[test]
    fn test_threshold_goes_left() {
        let tree = small_tree();
        let on_threshold = NormalizedVector::new([0.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(tree.classify(&on_threshold).unwrap(), Label(20));
    }

    #[test]
    fn test_infinite_components_follow_comparison() {
        let tree = small_tree();
        let wet = NormalizedVector::new([f64::NEG_INFINITY, 0.0, 0.0, 0.0, f64::INFINITY, 0.0]);
        let dry_rich = NormalizedVector::new([f64::INFINITY, 0.0, 0.0, 0.0, f64::NEG_INFINITY, 0.0]);
        assert_eq!(tree.classify(&wet).unwrap(), Label(1));
        assert_eq!(tree.classify(&dry_rich).unwrap(), Label(2));
    }

    #[test]
    fn test_labels_sorted_unique() {
        assert_eq!(small_tree().labels(), vec![Label(1), Label(2), Label(20)]);
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = DecisionTreeClassifier::from_params(TreeParams { nodes: vec![leaf(9)] }).unwrap();
        assert_eq!(tree.classify(&NormalizedVector::new([3.0; 6])).unwrap(), Label(9));
    }

    #[test]
    fn test_malformed_trees_rejected() {
        let empty = DecisionTreeClassifier::from_params(TreeParams { nodes: vec![] });
        assert!(empty.is_err());

        let bad_feature = DecisionTreeClassifier::from_params(TreeParams {
            nodes: vec![split(6, 0.0, 1, 2), leaf(1), leaf(2)],
        });
        assert!(bad_feature.unwrap_err().to_string().contains("feature 6"));

        let cycle = DecisionTreeClassifier::from_params(TreeParams {
            nodes: vec![split(0, 0.0, 1, 2), split(1, 0.0, 0, 2), leaf(2)],
        });
        assert!(cycle.is_err());

        let dangling = DecisionTreeClassifier::from_params(TreeParams {
            nodes: vec![split(0, 0.0, 1, 5), leaf(1)],
        });
        assert!(dangling.is_err());

        let nan = DecisionTreeClassifier::from_params(TreeParams {
            nodes: vec![split(0, f64::NAN, 1, 2), leaf(1), leaf(2)],
        });
        assert!(nan.is_err());
    }
}
