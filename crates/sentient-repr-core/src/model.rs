//! Linear state-action value model
//!
//! One weight vector encodes a linear function per action. Weights are laid
//! out in contiguous per-action blocks of `features_num` entries, so the
//! weights of action `a` live in `[a * features_num, (a + 1) * features_num)`.

use ndarray::{s, Array1, ArrayView1, ArrayViewMut1};
use serde::{Deserialize, Serialize};

use crate::{ReprError, Result};

/// Per-state feature vector, phi(s)
pub type FeatureVector = Array1<f64>;

/// Weight vector over all per-action blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearValueModel {
    theta: Array1<f64>,
    features_num: usize,
    actions_num: usize,
}

impl LinearValueModel {
    /// Create an all-zero model
    ///
    /// Fails when `features_num * actions_num` weights cannot be allocated.
    pub fn new(features_num: usize, actions_num: usize) -> Result<Self> {
        let len = features_num
            .checked_mul(actions_num)
            .filter(|&len| {
                len.checked_mul(std::mem::size_of::<f64>())
                    .is_some_and(|bytes| isize::try_from(bytes).is_ok())
            })
            .ok_or_else(|| {
                ReprError::Configuration(format!(
                    "{features_num} features x {actions_num} actions is too many weights"
                ))
            })?;
        Ok(Self {
            theta: Array1::zeros(len),
            features_num,
            actions_num,
        })
    }

    /// Number of features per action block
    #[must_use]
    pub fn features_num(&self) -> usize {
        self.features_num
    }

    /// Number of action blocks
    #[must_use]
    pub fn actions_num(&self) -> usize {
        self.actions_num
    }

    /// The weight vector
    #[must_use]
    pub fn theta(&self) -> &Array1<f64> {
        &self.theta
    }

    /// Mutable view of the weights; the length cannot change through it
    pub fn theta_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.theta.view_mut()
    }

    /// Replace the weight vector
    pub fn set_theta(&mut self, theta: Array1<f64>) -> Result<()> {
        let expected = self.features_num * self.actions_num;
        if theta.len() != expected {
            return Err(ReprError::DimensionMismatch {
                expected,
                actual: theta.len(),
            });
        }
        self.theta = theta;
        Ok(())
    }

    /// Weights of a single action
    pub fn action_weights(&self, action: usize) -> Result<ArrayView1<'_, f64>> {
        self.check_action(action)?;
        let f = self.features_num;
        Ok(self.theta.slice(s![action * f..(action + 1) * f]))
    }

    /// Check an action id against the action count
    pub fn check_action(&self, action: usize) -> Result<()> {
        if action >= self.actions_num {
            return Err(ReprError::InvalidAction {
                action,
                actions_num: self.actions_num,
            });
        }
        Ok(())
    }

    /// Check a feature vector against the current feature count
    pub fn check_phi(&self, phi_s: &FeatureVector) -> Result<()> {
        if phi_s.len() != self.features_num {
            return Err(ReprError::FeatureLengthMismatch {
                expected: self.features_num,
                actual: phi_s.len(),
            });
        }
        Ok(())
    }

    /// Expand phi(s) into phi(s, a) by copying it into the block of `action`
    pub fn phi_sa_from_phi_s(&self, phi_s: &FeatureVector, action: usize) -> Result<Array1<f64>> {
        self.check_action(action)?;
        self.check_phi(phi_s)?;
        let f = self.features_num;
        let mut phi_sa: Array1<f64> = Array1::zeros(f * self.actions_num);
        phi_sa.slice_mut(s![action * f..(action + 1) * f]).assign(phi_s);
        Ok(phi_sa)
    }

    /// Q(s, a) from an already computed phi(s)
    ///
    /// Only the block of `action` is read; phi(s, a) is never materialised.
    pub fn q_using_phi_s(&self, phi_s: &FeatureVector, action: usize) -> Result<f64> {
        self.check_phi(phi_s)?;
        Ok(self.action_weights(action)?.dot(phi_s))
    }

    /// Register one new feature, returning its index
    ///
    /// A zero weight is appended to the end of every action block so the
    /// existing blocks stay contiguous and keep their values.
    pub fn grow_features(&mut self) -> usize {
        let old = self.features_num;
        let new = old + 1;
        let mut theta: Array1<f64> = Array1::zeros(new * self.actions_num);
        for a in 0..self.actions_num {
            theta
                .slice_mut(s![a * new..a * new + old])
                .assign(&self.theta.slice(s![a * old..(a + 1) * old]));
        }
        self.theta = theta;
        self.features_num = new;
        old
    }
}
