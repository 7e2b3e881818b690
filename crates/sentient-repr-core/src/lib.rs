//! Linear state-action value representations for SentientOS
//!
//! This crate provides the shared machinery behind linear function
//! approximation of Q(s, a): binning of continuous state spaces, the
//! per-action weight layout, and greedy action selection with random
//! tie-breaking. Concrete representations only supply phi(s).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod discretization;
pub mod domain;
pub mod error;
pub mod indexer;
pub mod model;
pub mod representation;

// Re-export core traits and types
pub use config::{RepresentationConfig, DEFAULT_DISCRETIZATION};
pub use discretization::BinsPerDimension;
pub use domain::{BoxDomain, Domain, Goal};
pub use error::{ReprError, Result};
pub use indexer::{bin_number, FeatureIndexer};
pub use model::{FeatureVector, LinearValueModel};
pub use representation::{ActionValues, FeatureFunction, Representation, RepresentationBuilder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ActionValues, BoxDomain, Domain, FeatureFunction, FeatureIndexer, FeatureVector,
        ReprError, Representation, RepresentationConfig, Result,
    };
}
