use serde::{Deserialize, Serialize};

use super::{ArtifactError, FeatureTransform, ensure_len};

/// Support mask produced by recursive feature elimination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfeSelector {
    /// Width of the vectors the selector was fit on.
    pub n_features_in: usize,
    /// `true` for each kept feature, in input order.
    pub support: Vec<bool>,
    /// Elimination rank per feature (1 = kept). Optional; checked against
    /// `support` when present.
    #[serde(default)]
    pub ranking: Vec<u32>,
}

impl RfeSelector {
    /// Validate structural invariants of the selector.
    pub fn validate(&self) -> Result<(), String> {
        if self.support.len() != self.n_features_in {
            return Err(format!(
                "support has {} entries but n_features_in is {}",
                self.support.len(),
                self.n_features_in
            ));
        }
        if !self.support.iter().any(|kept| *kept) {
            return Err("support selects no features".to_string());
        }
        if !self.ranking.is_empty() {
            if self.ranking.len() != self.n_features_in {
                return Err("ranking length must match n_features_in".to_string());
            }
            for (idx, (&rank, &kept)) in self.ranking.iter().zip(&self.support).enumerate() {
                if (rank == 1) != kept {
                    return Err(format!(
                        "feature {idx} has rank {rank} but support is {kept}"
                    ));
                }
            }
        }
        Ok(())
    }

    /// Indices of the kept features.
    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.support
            .iter()
            .enumerate()
            .filter_map(|(idx, kept)| kept.then_some(idx))
    }
}

impl FeatureTransform for RfeSelector {
    fn input_len(&self) -> usize {
        self.n_features_in
    }

    fn output_len(&self) -> usize {
        self.support.iter().filter(|kept| **kept).count()
    }

    fn transform(&self, input: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        ensure_len("selector", self.n_features_in, input)?;
        Ok(self.selected_indices().map(|idx| input[idx]).collect())
    }
}
