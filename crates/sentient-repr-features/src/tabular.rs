//! Tabular representation: one feature per aggregated state

use ndarray::Array1;
use sentient_repr_core::{FeatureFunction, FeatureIndexer, FeatureVector, ReprError, Result};

/// Indicator of the aggregated state a state falls into
///
/// `features_num` equals the number of aggregated states; the active
/// feature is the state's mixed-radix id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabular {
    features_num: usize,
}

impl Tabular {
    /// Size the table from the indexer's bins
    pub fn new(indexer: &FeatureIndexer) -> Result<Self> {
        let bins = indexer.bins();
        let features_num = bins
            .checked_agg_states_num()
            .and_then(|states| usize::try_from(states).ok())
            .ok_or_else(|| {
                ReprError::Configuration(format!(
                    "aggregated state space of {:?} bins is too large for a table",
                    bins.as_slice()
                ))
            })?;
        Ok(Self { features_num })
    }
}

impl FeatureFunction for Tabular {
    fn features_num(&self) -> usize {
        self.features_num
    }

    fn phi_non_terminal(&self, indexer: &FeatureIndexer, state: &[f64]) -> Result<FeatureVector> {
        let id = indexer.hash_state(state)?;
        let mut phi: FeatureVector = Array1::zeros(self.features_num);
        #[allow(clippy::cast_possible_truncation)]
        let slot = phi
            .get_mut(id as usize)
            .ok_or(ReprError::FeatureLengthMismatch {
                expected: self.features_num,
                actual: id as usize + 1,
            })?;
        *slot = 1.0;
        Ok(phi)
    }

    fn name(&self) -> &str {
        "Tabular"
    }
}
