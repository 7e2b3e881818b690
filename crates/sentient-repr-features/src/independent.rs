//! Independent discretization: one indicator per (dimension, bin)

use ndarray::Array1;
use sentient_repr_core::{FeatureFunction, FeatureIndexer, FeatureVector, Result};

/// Activates exactly one feature per dimension
///
/// Feature count is `sum(bins_per_dim)`, which grows linearly with the
/// number of dimensions instead of exponentially like [`crate::Tabular`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndependentDiscretization {
    features_num: usize,
}

impl IndependentDiscretization {
    /// Size the features from the indexer's bins
    #[must_use]
    pub fn new(indexer: &FeatureIndexer) -> Self {
        Self {
            features_num: indexer.initial_features_num(),
        }
    }
}

impl FeatureFunction for IndependentDiscretization {
    fn features_num(&self) -> usize {
        self.features_num
    }

    fn phi_non_terminal(&self, indexer: &FeatureIndexer, state: &[f64]) -> Result<FeatureVector> {
        let mut phi: FeatureVector = Array1::zeros(self.features_num);
        for index in indexer.active_initial_features(state)? {
            phi[index] = 1.0;
        }
        Ok(phi)
    }

    fn name(&self) -> &str {
        "IndependentDiscretization"
    }
}
