//! Representation: features, linear values and greedy action selection
//!
//! A [`Representation`] wires a [`Domain`], a [`FeatureIndexer`] and a
//! [`LinearValueModel`] around a [`FeatureFunction`]. Concrete
//! representations only implement the feature function; terminal handling,
//! the state-action layout and action selection live here.

use ndarray::{Array1, ArrayViewMut1};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::{
    domain::validate_domain, BinsPerDimension, Domain, FeatureIndexer, FeatureVector,
    LinearValueModel, ReprError, RepresentationConfig, Result,
};

/// Feature generation of a concrete representation
pub trait FeatureFunction: Send + Sync {
    /// Current number of features
    fn features_num(&self) -> usize;

    /// phi(s) for a non-terminal state, of length `features_num()`
    ///
    /// Never called on terminal states.
    fn phi_non_terminal(&self, indexer: &FeatureIndexer, state: &[f64]) -> Result<FeatureVector>;

    /// Let the representation add features for a visited state
    ///
    /// Returns how many features were appended. The owning
    /// [`Representation`] grows the weights to match.
    fn discover(&mut self, _indexer: &FeatureIndexer, _state: &[f64]) -> Result<usize> {
        Ok(0)
    }

    /// Name used in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Q-values of the legal actions of a state, in domain order
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValues {
    /// Q(s, a) for each entry of `actions`
    pub values: Vec<f64>,
    /// Legal actions
    pub actions: Vec<usize>,
}

impl ActionValues {
    /// Largest Q-value, if any action is legal
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Every action whose value equals the maximum exactly
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn argmax(&self) -> Vec<usize> {
        let Some(max) = self.max() else {
            return Vec::new();
        };
        self.values
            .iter()
            .zip(&self.actions)
            .filter(|&(&q, _)| q == max)
            .map(|(_, &a)| a)
            .collect()
    }
}

/// Builder for [`Representation`]
pub struct RepresentationBuilder<D> {
    domain: D,
    config: RepresentationConfig,
}

impl<D: Domain> RepresentationBuilder<D> {
    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: RepresentationConfig) -> Self {
        self.config = config;
        self
    }

    /// Bins per continuous dimension
    #[must_use]
    pub fn discretization(mut self, discretization: usize) -> Self {
        self.config.discretization = discretization;
        self
    }

    /// Seed the tie-break RNG
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate, bin the domain and construct the feature function
    ///
    /// `make_features` sees the finished indexer so it can size itself
    /// from the bins.
    pub fn build<F, M>(self, make_features: M) -> Result<Representation<D, F>>
    where
        F: FeatureFunction,
        M: FnOnce(&FeatureIndexer) -> Result<F>,
    {
        self.config.validate()?;
        validate_domain(&self.domain)?;

        let indexer = FeatureIndexer::from_domain(&self.domain, self.config.discretization)?;
        let features = make_features(&indexer)?;
        let model = LinearValueModel::new(features.features_num(), self.domain.actions_num())?;
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let representation = Representation {
            domain: self.domain,
            features,
            indexer,
            model,
            config: self.config,
            rng,
        };
        info!(
            representation = representation.features.name(),
            discretization = representation.config.discretization,
            starting_features = representation.features_num(),
            aggregated_states = representation.agg_states_num(),
            "Representation initialized"
        );
        Ok(representation)
    }
}

/// Linear approximation of Q(s, a) over a domain
pub struct Representation<D, F> {
    domain: D,
    features: F,
    indexer: FeatureIndexer,
    model: LinearValueModel,
    config: RepresentationConfig,
    rng: StdRng,
}

impl<D: Domain> Representation<D, ()> {
    /// Start building a representation for a domain
    pub fn builder(domain: D) -> RepresentationBuilder<D> {
        RepresentationBuilder {
            domain,
            config: RepresentationConfig::default(),
        }
    }
}

impl<D: Domain, F: FeatureFunction> Representation<D, F> {
    /// The domain
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// The feature function
    pub fn features(&self) -> &F {
        &self.features
    }

    /// Mutable feature function
    ///
    /// Features added through this handle must each be followed by
    /// [`Representation::add_new_weight`]; prefer [`Representation::discover`].
    pub fn features_mut(&mut self) -> &mut F {
        &mut self.features
    }

    /// The state indexer
    pub fn indexer(&self) -> &FeatureIndexer {
        &self.indexer
    }

    /// Bins per dimension
    pub fn bins_per_dim(&self) -> &BinsPerDimension {
        self.indexer.bins()
    }

    /// Bins per continuous dimension
    pub fn discretization(&self) -> usize {
        self.config.discretization
    }

    /// Number of aggregated states at the configured resolution
    pub fn agg_states_num(&self) -> u64 {
        self.indexer.bins().agg_states_num()
    }

    /// Number of features per action block
    pub fn features_num(&self) -> usize {
        self.model.features_num()
    }

    /// Number of actions
    pub fn actions_num(&self) -> usize {
        self.model.actions_num()
    }

    /// The linear model
    pub fn model(&self) -> &LinearValueModel {
        &self.model
    }

    /// The weight vector
    pub fn theta(&self) -> &Array1<f64> {
        self.model.theta()
    }

    /// Mutable view of the weights for learning updates
    pub fn theta_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.model.theta_mut()
    }

    /// Replace the weight vector
    pub fn set_theta(&mut self, theta: Array1<f64>) -> Result<()> {
        self.model.set_theta(theta)
    }

    /// phi(s); all zeros for terminal states
    pub fn phi(&self, state: &[f64]) -> Result<FeatureVector> {
        self.indexer.check_state(state)?;
        if self.domain.is_terminal(state) {
            return Ok(Array1::zeros(self.model.features_num()));
        }
        let phi = self.features.phi_non_terminal(&self.indexer, state)?;
        self.model.check_phi(&phi)?;
        Ok(phi)
    }

    /// phi(s, a): phi(s) copied into the block of `action`
    pub fn phi_sa(&self, state: &[f64], action: usize) -> Result<Array1<f64>> {
        let phi = self.phi(state)?;
        self.model.phi_sa_from_phi_s(&phi, action)
    }

    /// Q(s, a) from an already computed phi(s)
    pub fn q_using_phi_s(&self, phi_s: &FeatureVector, action: usize) -> Result<f64> {
        self.model.q_using_phi_s(phi_s, action)
    }

    /// Q(s, a); 0.0 while the model has no weights
    pub fn q(&self, state: &[f64], action: usize) -> Result<f64> {
        self.indexer.check_state(state)?;
        if self.model.theta().is_empty() {
            self.model.check_action(action)?;
            debug!(action, "Q requested from a model without features");
            return Ok(0.0);
        }
        let phi = self.phi(state)?;
        self.model.q_using_phi_s(&phi, action)
    }

    /// Q-values of every legal action, computing phi(s) once
    pub fn qs(&self, state: &[f64]) -> Result<ActionValues> {
        let phi = self.phi(state)?;
        let actions = self.domain.possible_actions(state);
        let values = actions
            .iter()
            .map(|&a| self.model.q_using_phi_s(&phi, a))
            .collect::<Result<Vec<_>>>()?;
        Ok(ActionValues { values, actions })
    }

    /// V(s) = max over legal actions of Q(s, a)
    pub fn v(&self, state: &[f64]) -> Result<f64> {
        let v = self.qs(state)?.max().ok_or(ReprError::NoLegalActions)?;
        if v.is_nan() {
            return Err(ReprError::Computation("every Q-value is NaN".to_string()));
        }
        Ok(v)
    }

    /// Every legal action with the maximal Q-value
    ///
    /// Ties are exact: actions with identical activations score identical
    /// values and all of them are returned.
    pub fn best_actions(&self, state: &[f64]) -> Result<Vec<usize>> {
        let qs = self.qs(state)?;
        if qs.actions.is_empty() {
            return Err(ReprError::NoLegalActions);
        }
        let best = qs.argmax();
        if best.is_empty() {
            return Err(ReprError::Computation("every Q-value is NaN".to_string()));
        }
        debug!(
            ?state,
            actions = ?qs.actions,
            values = ?qs.values,
            best = ?best,
            "Best actions"
        );
        Ok(best)
    }

    /// One best action, ties broken uniformly with the given RNG
    pub fn best_action_with<R: Rng + ?Sized>(&self, state: &[f64], rng: &mut R) -> Result<usize> {
        let best = self.best_actions(state)?;
        best.choose(rng).copied().ok_or(ReprError::NoLegalActions)
    }

    /// One best action, ties broken with the representation's own RNG
    pub fn best_action(&mut self, state: &[f64]) -> Result<usize> {
        let best = self.best_actions(state)?;
        best.choose(&mut self.rng).copied().ok_or(ReprError::NoLegalActions)
    }

    /// Append a zero weight per action for one new feature
    ///
    /// Call once per feature added through [`Representation::features_mut`],
    /// before the next Q computation. Returns the new feature's index.
    pub fn add_new_weight(&mut self) -> usize {
        self.model.grow_features()
    }

    /// Let the feature function grow for a visited state
    ///
    /// Feature growth and the matching weight growth happen together.
    /// Terminal states never add features. Returns the number of features
    /// added.
    pub fn discover(&mut self, state: &[f64]) -> Result<usize> {
        self.indexer.check_state(state)?;
        if self.domain.is_terminal(state) {
            return Ok(0);
        }
        let added = self.features.discover(&self.indexer, state)?;
        let expected = self.model.features_num() + added;
        if self.features.features_num() != expected {
            return Err(ReprError::Configuration(format!(
                "{} reports {} features after adding {added} to {}",
                self.features.name(),
                self.features.features_num(),
                self.model.features_num()
            )));
        }
        for _ in 0..added {
            self.model.grow_features();
        }
        if added > 0 {
            info!(added, features_num = self.model.features_num(), "Features added");
        }
        Ok(added)
    }

    /// Bin of every dimension of a state
    pub fn bin_state(&self, state: &[f64]) -> Result<Vec<usize>> {
        self.indexer.bin_state(state)
    }

    /// Aggregated-state id of a state
    pub fn hash_state(&self, state: &[f64]) -> Result<u64> {
        self.indexer.hash_state(state)
    }

    /// Indices of the active one-indicator-per-bin features
    pub fn active_initial_features(&self, state: &[f64]) -> Result<Vec<usize>> {
        self.indexer.active_initial_features(state)
    }
}
