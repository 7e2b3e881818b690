//! Concrete feature representations for SentientOS
//!
//! Each representation implements [`FeatureFunction`] and is plugged into a
//! [`sentient_repr_core::Representation`]:
//! - [`Tabular`]: one indicator per aggregated state
//! - [`IndependentDiscretization`]: one indicator per (dimension, bin)
//! - [`RadialBasis`]: Gaussian bumps with random centres
//! - [`IncrementalTabular`]: tabular features discovered online

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod incremental;
pub mod independent;
pub mod rbf;
pub mod tabular;

pub use incremental::IncrementalTabular;
pub use independent::IndependentDiscretization;
pub use rbf::{RadialBasis, RadialBasisConfig};
pub use tabular::Tabular;

// Re-export core types
pub use sentient_repr_core::{
    BoxDomain, Domain, FeatureFunction, FeatureIndexer, Representation, RepresentationConfig,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{IncrementalTabular, IndependentDiscretization, RadialBasis, RadialBasisConfig, Tabular};
    pub use sentient_repr_core::prelude::*;
}
