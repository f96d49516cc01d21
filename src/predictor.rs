//! Churn prediction over one raw customer record.
//!
//! [`ChurnPredictor::classify`] returns a tagged result. [`ChurnPredictor::predict`]
//! is the text boundary: every failure, including a panic inside an artifact,
//! comes back as a single `⚠️ Error: ...` string.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::artifacts::{ArtifactBundle, ArtifactError, ArtifactPaths};
use crate::encoding::InputError;
use crate::features::{FeatureVector, RawInputRecord};

/// Text returned for a positive prediction.
pub const CHURN_LABEL: &str = "❌ Churn";
/// Text returned for a negative prediction.
pub const NOT_CHURN_LABEL: &str = "✅ Not Churn";
/// Prefix of every flattened failure.
pub const ERROR_PREFIX: &str = "⚠️ Error: ";

/// Binary outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChurnLabel {
    Churn,
    NotChurn,
}

impl ChurnLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ChurnLabel::Churn => CHURN_LABEL,
            ChurnLabel::NotChurn => NOT_CHURN_LABEL,
        }
    }
}

/// Why a prediction could not be produced.
#[derive(Debug, Error)]
pub enum PredictError {
    /// A field failed encoding or numeric coercion.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The selector, scaler or classifier rejected its input.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    /// The classifier returned something other than 0 or 1.
    #[error("classifier returned label {0}, expected 0 or 1")]
    UnexpectedLabel(u8),
    /// An artifact implementation panicked.
    #[error("prediction panicked: {0}")]
    Panicked(String),
}

/// Loaded artifacts plus the fixed encoding, ready to serve predictions.
#[derive(Debug)]
pub struct ChurnPredictor {
    artifacts: ArtifactBundle,
}

impl ChurnPredictor {
    pub fn new(artifacts: ArtifactBundle) -> Self {
        Self { artifacts }
    }

    /// Load the artifacts from disk. Any failure here should abort start-up.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        ArtifactBundle::load(paths).map(Self::new)
    }

    pub fn artifacts(&self) -> &ArtifactBundle {
        &self.artifacts
    }

    /// Encode, select, scale and classify one record.
    pub fn classify(&self, record: &RawInputRecord) -> Result<ChurnLabel, PredictError> {
        let features = FeatureVector::assemble(record)?;
        let named: Vec<(&str, f64)> = features.named().collect();
        tracing::debug!(features = ?named, "Encoded record");
        let selected = self.artifacts.selector().transform(features.as_slice())?;
        let scaled = self.artifacts.scaler().transform(&selected)?;
        match self.artifacts.classifier().predict(&scaled)? {
            1 => Ok(ChurnLabel::Churn),
            0 => Ok(ChurnLabel::NotChurn),
            other => Err(PredictError::UnexpectedLabel(other)),
        }
    }

    /// Predict and render the outcome as text. Never panics and never fails.
    pub fn predict(&self, record: &RawInputRecord) -> String {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.classify(record)))
            .unwrap_or_else(|payload| Err(PredictError::Panicked(panic_message(payload))));
        match outcome {
            Ok(label) => label.as_str().to_string(),
            Err(err) => {
                tracing::debug!("Prediction failed: {err}");
                format!("{ERROR_PREFIX}{err}")
            }
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
