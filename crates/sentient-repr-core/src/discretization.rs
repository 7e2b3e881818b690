//! Bins per state dimension

use serde::{Deserialize, Serialize};

use crate::Domain;

/// Number of bins each state dimension is split into
///
/// Continuous dimensions get `resolution` bins. Discrete dimensions get
/// one bin per integer step, `high - low`. Every entry is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinsPerDimension(Vec<usize>);

impl BinsPerDimension {
    /// Derive the bins from a domain and a continuous resolution
    pub fn from_domain<D: Domain + ?Sized>(domain: &D, resolution: usize) -> Self {
        let bins = domain
            .statespace_limits()
            .iter()
            .enumerate()
            .map(|(d, &(low, high))| {
                if domain.is_continuous(d) {
                    resolution.max(1)
                } else {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let span = (high - low) as usize;
                    span.max(1)
                }
            })
            .collect();
        Self(bins)
    }

    /// Wrap explicit bin counts, flooring each at 1
    #[must_use]
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self(counts.into_iter().map(|b| b.max(1)).collect())
    }

    /// Number of dimensions
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check for a zero-dimensional state space
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bins of one dimension
    #[must_use]
    pub fn get(&self, dim: usize) -> Option<usize> {
        self.0.get(dim).copied()
    }

    /// Bin counts as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Iterate over the bin counts
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.0.iter().copied()
    }

    /// Number of aggregated states at this resolution
    #[must_use]
    pub fn agg_states_num(&self) -> u64 {
        self.0
            .iter()
            .fold(1u64, |acc, &b| acc.saturating_mul(b as u64))
    }

    /// Number of aggregated states, `None` if it does not fit in a `u64`
    #[must_use]
    pub fn checked_agg_states_num(&self) -> Option<u64> {
        self.0
            .iter()
            .try_fold(1u64, |acc, &b| acc.checked_mul(u64::try_from(b).ok()?))
    }

    /// Total of all bin counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxDomain;

    #[test]
    fn test_mixed_dimensions() {
        let domain = BoxDomain::new(vec![(0.0, 5.0), (-1.0, 1.0), (2.0, 4.0)], vec![1], 4).unwrap();
        let bins = BinsPerDimension::from_domain(&domain, 10);
        assert_eq!(bins.as_slice(), &[5, 10, 2]);
        assert_eq!(bins.agg_states_num(), 100);
        assert_eq!(bins.total(), 17);
    }

    #[test]
    fn test_narrow_discrete_dimension_keeps_one_bin() {
        let domain = BoxDomain::new(vec![(0.0, 0.5)], vec![], 2).unwrap();
        let bins = BinsPerDimension::from_domain(&domain, 20);
        assert_eq!(bins.as_slice(), &[1]);
    }

    #[test]
    fn test_agg_states_saturates() {
        let bins = BinsPerDimension::from_counts(vec![usize::MAX, usize::MAX, 2]);
        assert_eq!(bins.agg_states_num(), u64::MAX);
        assert_eq!(bins.checked_agg_states_num(), None);
    }

    #[test]
    fn test_checked_agg_states_num() {
        let bins = BinsPerDimension::from_counts(vec![4, 5, 6]);
        assert_eq!(bins.checked_agg_states_num(), Some(120));
        let bins = BinsPerDimension::from_counts(vec![1 << 17; 4]);
        assert_eq!(bins.checked_agg_states_num(), None);
    }
}
