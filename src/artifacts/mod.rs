//! Serialized model artifacts and the capability traits they implement.
//!
//! The predictor only relies on [`FeatureTransform`] and [`BinaryClassifier`];
//! the JSON-backed types in this module are the implementations loaded by the
//! command-line tool:
//! - [`RfeSelector`]: keeps the features chosen by recursive elimination.
//! - [`StandardScaler`]: per-feature `(x - mean) / scale`.
//! - [`GbdtClassifier`]: gradient-boosted trees with a logistic link.

mod gbdt;
mod scaler;
mod selector;

pub use gbdt::{GbdtClassifier, MODEL_VERSION, Tree, TreeNode, sigmoid};
pub use scaler::StandardScaler;
pub use selector::RfeSelector;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::features::FEATURE_COUNT;

/// Errors raised while loading or running an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file could not be read.
    #[error("Failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The artifact file is not valid JSON for its kind.
    #[error("Invalid artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The artifact parsed but violates a structural invariant.
    #[error("Invalid artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
    /// Two artifacts disagree about the width of the data passed between them.
    #[error("{upstream} produces {produced} features but {downstream} expects {expected}")]
    Incompatible {
        upstream: &'static str,
        produced: usize,
        downstream: &'static str,
        expected: usize,
    },
    /// An artifact was handed a vector of the wrong length.
    #[error("{artifact} expected {expected} features, got {actual}")]
    ShapeMismatch {
        artifact: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// A fitted vector-to-vector transform (feature selector, scaler).
pub trait FeatureTransform: Send + Sync {
    /// Number of values accepted by [`FeatureTransform::transform`].
    fn input_len(&self) -> usize;
    /// Number of values produced by [`FeatureTransform::transform`].
    fn output_len(&self) -> usize;
    fn transform(&self, input: &[f64]) -> Result<Vec<f64>, ArtifactError>;
}

/// A fitted classifier producing a 0/1 label.
pub trait BinaryClassifier: Send + Sync {
    /// Number of values accepted by [`BinaryClassifier::predict`].
    fn input_len(&self) -> usize;
    fn predict(&self, input: &[f64]) -> Result<u8, ArtifactError>;
}

/// Locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub selector: PathBuf,
    pub scaler: PathBuf,
    pub classifier: PathBuf,
}

/// The selector, scaler and classifier, checked to fit together.
pub struct ArtifactBundle {
    selector: Box<dyn FeatureTransform>,
    scaler: Box<dyn FeatureTransform>,
    classifier: Box<dyn BinaryClassifier>,
}

impl ArtifactBundle {
    /// Combine three artifacts, verifying the widths line up end to end.
    pub fn new(
        selector: Box<dyn FeatureTransform>,
        scaler: Box<dyn FeatureTransform>,
        classifier: Box<dyn BinaryClassifier>,
    ) -> Result<Self, ArtifactError> {
        ensure_width("input", FEATURE_COUNT, "selector", selector.input_len())?;
        ensure_width(
            "selector",
            selector.output_len(),
            "scaler",
            scaler.input_len(),
        )?;
        ensure_width(
            "scaler",
            scaler.output_len(),
            "classifier",
            classifier.input_len(),
        )?;
        Ok(Self {
            selector,
            scaler,
            classifier,
        })
    }

    /// Load the JSON artifacts from disk.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let selector: RfeSelector = load_json(&paths.selector)?;
        selector.validate().map_err(|reason| invalid(&paths.selector, reason))?;
        let scaler: StandardScaler = load_json(&paths.scaler)?;
        scaler.validate().map_err(|reason| invalid(&paths.scaler, reason))?;
        let classifier: GbdtClassifier = load_json(&paths.classifier)?;
        classifier
            .validate()
            .map_err(|reason| invalid(&paths.classifier, reason))?;
        tracing::info!(
            selected = selector.output_len(),
            trees = classifier.trees.len(),
            "Loaded model artifacts"
        );
        Self::new(Box::new(selector), Box::new(scaler), Box::new(classifier))
    }

    pub fn selector(&self) -> &dyn FeatureTransform {
        self.selector.as_ref()
    }

    pub fn scaler(&self) -> &dyn FeatureTransform {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn BinaryClassifier {
        self.classifier.as_ref()
    }
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("selected", &self.selector.output_len())
            .field("classifier_inputs", &self.classifier.input_len())
            .finish()
    }
}

fn ensure_width(
    upstream: &'static str,
    produced: usize,
    downstream: &'static str,
    expected: usize,
) -> Result<(), ArtifactError> {
    if produced == expected {
        Ok(())
    } else {
        Err(ArtifactError::Incompatible {
            upstream,
            produced,
            downstream,
            expected,
        })
    }
}

pub(crate) fn ensure_len(
    artifact: &'static str,
    expected: usize,
    input: &[f64],
) -> Result<(), ArtifactError> {
    if input.len() == expected {
        Ok(())
    } else {
        Err(ArtifactError::ShapeMismatch {
            artifact,
            expected,
            actual: input.len(),
        })
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: String) -> ArtifactError {
    ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason,
    }
}
