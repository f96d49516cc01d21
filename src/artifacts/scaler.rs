use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::{ArtifactError, FeatureTransform, ensure_len};

/// Per-feature standardization fitted on the training set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    /// Standard deviation per feature. Zero marks a constant feature and is
    /// treated as 1.
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Validate structural invariants of the scaler.
    pub fn validate(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("scaler has no features".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err("mean and scale must be finite".to_string());
        }
        if self.scale.iter().any(|s| *s < 0.0) {
            return Err("scale must be non-negative".to_string());
        }
        Ok(())
    }
}

impl FeatureTransform for StandardScaler {
    fn input_len(&self) -> usize {
        self.mean.len()
    }

    fn output_len(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, input: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        ensure_len("scaler", self.mean.len(), input)?;
        let x = ArrayView1::from(input);
        let mean = ArrayView1::from(self.mean.as_slice());
        let scale = ArrayView1::from(self.scale.as_slice())
            .mapv(|s| if s == 0.0 { 1.0 } else { s });
        Ok(((&x - &mean) / &scale).to_vec())
    }
}
