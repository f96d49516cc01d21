//! Gradient-boosted decision trees for binary classification.
//!
//! Trees are stored as flat node lists with the root at index 0. Children
//! always sit after their parent, so evaluation terminates without a visited
//! set.

use serde::{Deserialize, Serialize};

use super::{ArtifactError, BinaryClassifier, ensure_len};

/// Single tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Terminal node contributing `leaf` to the margin.
    Leaf { leaf: f64 },
    /// Internal node: `value < threshold` goes left.
    Split {
        feature: u16,
        threshold: f64,
        left: u32,
        right: u32,
        /// Branch taken for missing (NaN) values.
        /// Infinities compare like any other number.
        #[serde(default = "default_left")]
        default_left: bool,
    },
}

fn default_left() -> bool {
    true
}

/// One boosted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(format!("node {idx} has a non-finite leaf"));
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if *feature as usize >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature} but the model has {n_features}"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {idx} has a NaN threshold"));
                    }
                    for child in [*left, *right] {
                        let child = child as usize;
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child {child}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its value.
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { leaf } => return *leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = features[*feature as usize];
                    let go_left = if value.is_nan() {
                        *default_left
                    } else {
                        value < *threshold
                    };
                    let next = if go_left { *left } else { *right };
                    idx = next as usize;
                }
            }
        }
    }
}

/// Model format version understood by [`GbdtClassifier`].
pub const MODEL_VERSION: i64 = 1;

/// Boosted tree ensemble with a logistic link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtClassifier {
    /// Model format version; files without the key are read as the current one.
    #[serde(default = "default_model_version")]
    pub model_version: i64,
    /// Number of features per input vector.
    pub n_features: usize,
    /// Prior probability of the positive class.
    pub base_score: f64,
    /// Probability at or above which the positive label is returned.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub trees: Vec<Tree>,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_model_version() -> i64 {
    MODEL_VERSION
}

impl GbdtClassifier {
    /// Validate structural invariants of the model.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_version != MODEL_VERSION {
            return Err(format!(
                "Unsupported model_version {} (expected {MODEL_VERSION})",
                self.model_version
            ));
        }
        if self.n_features == 0 {
            return Err("n_features must be > 0".to_string());
        }
        if !(self.base_score > 0.0 && self.base_score < 1.0) {
            return Err("base_score must be in (0, 1)".to_string());
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err("threshold must be in [0, 1]".to_string());
        }
        if self.trees.is_empty() {
            return Err("model has no trees".to_string());
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| format!("tree {tree_idx}: {reason}"))?;
        }
        Ok(())
    }

    /// Raw margin: logit of the base score plus every tree's leaf.
    pub fn predict_margin(&self, features: &[f64]) -> Result<f64, ArtifactError> {
        ensure_len("classifier", self.n_features, features)?;
        let base = (self.base_score / (1.0 - self.base_score)).ln();
        Ok(self
            .trees
            .iter()
            .fold(base, |margin, tree| margin + tree.evaluate(features)))
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, features: &[f64]) -> Result<f64, ArtifactError> {
        self.predict_margin(features).map(sigmoid)
    }
}

impl BinaryClassifier for GbdtClassifier {
    fn input_len(&self) -> usize {
        self.n_features
    }

    fn predict(&self, input: &[f64]) -> Result<u8, ArtifactError> {
        let proba = self.predict_proba(input)?;
        Ok(u8::from(proba >= self.threshold))
    }
}

/// Logistic function.
pub fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}
