//! Tabular features discovered online

use indexmap::IndexSet;
use ndarray::Array1;
use sentient_repr_core::{FeatureFunction, FeatureIndexer, FeatureVector, Result};

/// Starts empty and adds one indicator per newly visited aggregated state
///
/// Feature `i` is the `i`-th distinct aggregated state passed to
/// [`FeatureFunction::discover`]. States never discovered have an all-zero
/// phi. Use through [`sentient_repr_core::Representation::discover`] so the
/// weights grow with the features.
#[derive(Debug, Clone, Default)]
pub struct IncrementalTabular {
    seen: IndexSet<u64>,
}

impl IncrementalTabular {
    /// Create an empty representation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feature index of an aggregated-state id, if discovered
    #[must_use]
    pub fn feature_of(&self, id: u64) -> Option<usize> {
        self.seen.get_index_of(&id)
    }
}

impl FeatureFunction for IncrementalTabular {
    fn features_num(&self) -> usize {
        self.seen.len()
    }

    fn phi_non_terminal(&self, indexer: &FeatureIndexer, state: &[f64]) -> Result<FeatureVector> {
        let id = indexer.hash_state(state)?;
        let mut phi: FeatureVector = Array1::zeros(self.seen.len());
        if let Some(i) = self.feature_of(id) {
            phi[i] = 1.0;
        }
        Ok(phi)
    }

    fn discover(&mut self, indexer: &FeatureIndexer, state: &[f64]) -> Result<usize> {
        let id = indexer.hash_state(state)?;
        Ok(usize::from(self.seen.insert(id)))
    }

    fn name(&self) -> &str {
        "IncrementalTabular"
    }
}
