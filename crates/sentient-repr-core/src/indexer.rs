//! Binning of raw states into bin coordinates and feature indices

use crate::{BinsPerDimension, Domain, ReprError, Result};

/// Zero-indexed bin of `value` when `[low, high]` is cut into `bins` equal bins
///
/// The upper edge is inclusive: `high` lands in the last bin. Values
/// outside the bounds are clamped into the first or last bin.
#[must_use]
pub fn bin_number(value: f64, bins: usize, (low, high): (f64, f64)) -> usize {
    let last = bins.saturating_sub(1);
    if value <= low {
        return 0;
    }
    if value >= high {
        return last;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let bin = ((value - low) * bins as f64 / (high - low)).floor() as usize;
    bin.min(last)
}

/// Maps states to bins, aggregated-state ids and initial feature indices
///
/// Aggregated-state ids are mixed-radix numbers over the bins with the
/// least significant digit first: `id = b[0] + b[1]*n[0] + b[2]*n[0]*n[1] + ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureIndexer {
    bins: BinsPerDimension,
    limits: Vec<(f64, f64)>,
    shifts: Vec<usize>,
}

impl FeatureIndexer {
    /// Create an indexer from bins and matching bounds
    pub fn new(bins: BinsPerDimension, limits: Vec<(f64, f64)>) -> Result<Self> {
        if bins.len() != limits.len() {
            return Err(ReprError::DimensionMismatch {
                expected: bins.len(),
                actual: limits.len(),
            });
        }
        let shifts = bins
            .iter()
            .scan(0usize, |offset, b| {
                let shift = *offset;
                *offset += b;
                Some(shift)
            })
            .collect();
        Ok(Self { bins, limits, shifts })
    }

    /// Create an indexer for a domain at the given continuous resolution
    pub fn from_domain<D: Domain + ?Sized>(domain: &D, resolution: usize) -> Result<Self> {
        if domain.statespace_limits().len() != domain.state_space_dims() {
            return Err(ReprError::DimensionMismatch {
                expected: domain.state_space_dims(),
                actual: domain.statespace_limits().len(),
            });
        }
        let bins = BinsPerDimension::from_domain(domain, resolution);
        Self::new(bins, domain.statespace_limits().to_vec())
    }

    /// Bins per dimension
    #[must_use]
    pub fn bins(&self) -> &BinsPerDimension {
        &self.bins
    }

    /// Per-dimension bounds
    #[must_use]
    pub fn limits(&self) -> &[(f64, f64)] {
        &self.limits
    }

    /// Number of state dimensions
    #[must_use]
    pub fn dims(&self) -> usize {
        self.bins.len()
    }

    /// Number of one-indicator-per-bin features, `sum(bins)`
    #[must_use]
    pub fn initial_features_num(&self) -> usize {
        self.bins.total()
    }

    /// Reject states of the wrong length or with NaN components
    pub fn check_state(&self, state: &[f64]) -> Result<()> {
        if state.len() != self.dims() {
            return Err(ReprError::DimensionMismatch {
                expected: self.dims(),
                actual: state.len(),
            });
        }
        if let Some(d) = state.iter().position(|x| x.is_nan()) {
            return Err(ReprError::InvalidState(format!("dimension {d} is NaN")));
        }
        Ok(())
    }

    /// Bin of a single dimension
    pub fn bin_of(&self, state: &[f64], dim: usize) -> Result<usize> {
        let bins = self
            .bins
            .get(dim)
            .ok_or_else(|| ReprError::InvalidState(format!("dimension {dim} out of range")))?;
        let value = state.get(dim).copied().ok_or(ReprError::DimensionMismatch {
            expected: self.dims(),
            actual: state.len(),
        })?;
        if value.is_nan() {
            return Err(ReprError::InvalidState(format!("dimension {dim} is NaN")));
        }
        Ok(bin_number(value, bins, self.limits[dim]))
    }

    /// Bin of every dimension
    pub fn bin_state(&self, state: &[f64]) -> Result<Vec<usize>> {
        self.check_state(state)?;
        Ok(state
            .iter()
            .zip(self.bins.iter())
            .zip(&self.limits)
            .map(|((&x, bins), &limits)| bin_number(x, bins, limits))
            .collect())
    }

    /// Aggregated-state id of a state
    ///
    /// Fails when the aggregated state space does not fit in a `u64`, since
    /// distinct states would then share ids.
    pub fn hash_state(&self, state: &[f64]) -> Result<u64> {
        if self.bins.checked_agg_states_num().is_none() {
            return Err(ReprError::Configuration(
                "aggregated state space does not fit in a u64 id".to_string(),
            ));
        }
        let bins = self.bin_state(state)?;
        Ok(self.bins_to_id(&bins))
    }

    /// Encode bin coordinates as an aggregated-state id
    #[must_use]
    pub fn bins_to_id(&self, bin_coords: &[usize]) -> u64 {
        bin_coords
            .iter()
            .zip(self.bins.iter())
            .rev()
            .fold(0u64, |id, (&b, radix)| {
                id.saturating_mul(radix as u64).saturating_add(b as u64)
            })
    }

    /// Decode an aggregated-state id back into bin coordinates
    #[must_use]
    pub fn bins_of_id(&self, id: u64) -> Vec<usize> {
        let mut rest = id;
        self.bins
            .iter()
            .map(|radix| {
                let radix = radix as u64;
                #[allow(clippy::cast_possible_truncation)]
                let digit = (rest % radix) as usize;
                rest /= radix;
                digit
            })
            .collect()
    }

    /// Indices of the active one-indicator-per-(dimension, bin) features
    ///
    /// Dimension `d` owns the index range starting at `sum(bins[..d])`.
    pub fn active_initial_features(&self, state: &[f64]) -> Result<Vec<usize>> {
        let bins = self.bin_state(state)?;
        Ok(bins
            .into_iter()
            .zip(&self.shifts)
            .map(|(b, shift)| b + shift)
            .collect())
    }
}
