//! Domain capabilities consumed by representations

use serde::{Deserialize, Serialize};

use crate::{ReprError, Result};

/// What a representation needs to know about an environment
///
/// States are plain `f64` slices with one entry per dimension. Discrete
/// dimensions hold integer values with unit step inside their limits.
pub trait Domain: Send + Sync {
    /// Number of state dimensions
    fn state_space_dims(&self) -> usize;

    /// Inclusive `(low, high)` bounds for every dimension
    fn statespace_limits(&self) -> &[(f64, f64)];

    /// Indices of the continuous dimensions
    fn continuous_dims(&self) -> &[usize];

    /// Number of discrete actions
    fn actions_num(&self) -> usize;

    /// Whether the episode ends in this state
    fn is_terminal(&self, state: &[f64]) -> bool;

    /// Legal actions in this state, in a stable order
    fn possible_actions(&self, _state: &[f64]) -> Vec<usize> {
        (0..self.actions_num()).collect()
    }

    /// Check if a dimension is continuous
    fn is_continuous(&self, dim: usize) -> bool {
        self.continuous_dims().contains(&dim)
    }
}

/// Terminal region `state[dim] >= threshold`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Dimension the goal is tested on
    pub dim: usize,
    /// Values at or above this end the episode
    pub threshold: f64,
}

/// Box-bounded domain described entirely by data
///
/// Every action is legal everywhere. Useful for configuring a
/// representation from JSON and for tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDomain {
    /// Per-dimension bounds
    pub limits: Vec<(f64, f64)>,
    /// Continuous dimension indices
    #[serde(default)]
    pub continuous_dims: Vec<usize>,
    /// Number of discrete actions
    pub actions_num: usize,
    /// Optional terminal region
    #[serde(default)]
    pub goal: Option<Goal>,
}

impl BoxDomain {
    /// Create a new box domain
    pub fn new(limits: Vec<(f64, f64)>, continuous_dims: Vec<usize>, actions_num: usize) -> Result<Self> {
        let domain = Self {
            limits,
            continuous_dims,
            actions_num,
            goal: None,
        };
        domain.validate()?;
        Ok(domain)
    }

    /// Set the terminal region
    #[must_use]
    pub fn with_goal(mut self, dim: usize, threshold: f64) -> Self {
        self.goal = Some(Goal { dim, threshold });
        self
    }

    /// Parse a domain description from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let domain: Self = serde_json::from_str(json)?;
        domain.validate()?;
        Ok(domain)
    }

    /// Check bounds, dimension indices and the action count
    pub fn validate(&self) -> Result<()> {
        validate_domain(self)?;
        if let Some(goal) = self.goal {
            if goal.dim >= self.limits.len() {
                return Err(ReprError::Configuration(format!(
                    "goal dimension {} out of range for {} dimensions",
                    goal.dim,
                    self.limits.len()
                )));
            }
        }
        Ok(())
    }
}

impl Domain for BoxDomain {
    fn state_space_dims(&self) -> usize {
        self.limits.len()
    }

    fn statespace_limits(&self) -> &[(f64, f64)] {
        &self.limits
    }

    fn continuous_dims(&self) -> &[usize] {
        &self.continuous_dims
    }

    fn actions_num(&self) -> usize {
        self.actions_num
    }

    fn is_terminal(&self, state: &[f64]) -> bool {
        match self.goal {
            Some(goal) => state.get(goal.dim).is_some_and(|&x| x >= goal.threshold),
            None => false,
        }
    }
}

/// Validate the parts of a domain a representation depends on
pub fn validate_domain<D: Domain + ?Sized>(domain: &D) -> Result<()> {
    let dims = domain.state_space_dims();
    let limits = domain.statespace_limits();
    if limits.len() != dims {
        return Err(ReprError::DimensionMismatch {
            expected: dims,
            actual: limits.len(),
        });
    }
    for (d, &(low, high)) in limits.iter().enumerate() {
        if !(low.is_finite() && high.is_finite()) || high <= low {
            return Err(ReprError::Configuration(format!(
                "dimension {d} has malformed bounds [{low}, {high}]"
            )));
        }
    }
    if let Some(&d) = domain.continuous_dims().iter().find(|&&d| d >= dims) {
        return Err(ReprError::Configuration(format!(
            "continuous dimension {d} out of range for {dims} dimensions"
        )));
    }
    if domain.actions_num() == 0 {
        return Err(ReprError::Configuration("domain has no actions".to_string()));
    }
    Ok(())
}
