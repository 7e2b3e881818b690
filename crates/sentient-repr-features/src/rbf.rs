//! Gaussian radial basis functions with random centres

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;
use sentient_repr_core::{FeatureFunction, FeatureIndexer, FeatureVector, ReprError, Result};

/// Configuration for [`RadialBasis`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialBasisConfig {
    /// Number of Gaussian bumps
    pub centers: usize,
    /// Each dimension's width is its range divided by this
    pub width_divisor: f64,
    /// Append a constant 1.0 feature
    pub include_bias: bool,
    /// Seed for centre placement
    pub seed: Option<u64>,
}

impl Default for RadialBasisConfig {
    fn default() -> Self {
        Self {
            centers: 20,
            width_divisor: 10.0,
            include_bias: true,
            seed: None,
        }
    }
}

/// Real-valued features `exp(-sum_d (s_d - c_d)^2 / w_d)`
#[derive(Debug, Clone)]
pub struct RadialBasis {
    centers: Array2<f64>,
    widths: Array1<f64>,
    include_bias: bool,
}

impl RadialBasis {
    /// Place centres uniformly inside the indexer's bounds
    pub fn new(indexer: &FeatureIndexer, config: &RadialBasisConfig) -> Result<Self> {
        if !(config.width_divisor.is_finite() && config.width_divisor > 0.0) {
            return Err(ReprError::Configuration(format!(
                "width_divisor must be positive, got {}",
                config.width_divisor
            )));
        }
        if config.centers == 0 && !config.include_bias {
            return Err(ReprError::Configuration(
                "radial basis needs at least one centre or a bias feature".to_string(),
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let limits = indexer.limits();
        let centers = Array2::from_shape_fn((config.centers, limits.len()), |(_, d)| {
            let (low, high) = limits[d];
            rng.gen_range(low..=high)
        });
        let widths = limits
            .iter()
            .map(|&(low, high)| (high - low) / config.width_divisor)
            .collect();
        debug!(
            centers = config.centers,
            dims = limits.len(),
            include_bias = config.include_bias,
            "Placed radial basis centres"
        );

        Ok(Self {
            centers,
            widths,
            include_bias: config.include_bias,
        })
    }

    /// Centre coordinates, one row per bump
    #[must_use]
    pub fn centers(&self) -> &Array2<f64> {
        &self.centers
    }

    /// Per-dimension widths
    #[must_use]
    pub fn widths(&self) -> &Array1<f64> {
        &self.widths
    }
}

impl FeatureFunction for RadialBasis {
    fn features_num(&self) -> usize {
        self.centers.nrows() + usize::from(self.include_bias)
    }

    fn phi_non_terminal(&self, indexer: &FeatureIndexer, state: &[f64]) -> Result<FeatureVector> {
        indexer.check_state(state)?;
        let mut phi: FeatureVector = Array1::zeros(self.features_num());
        for (i, center) in self.centers.outer_iter().enumerate() {
            let distance: f64 = center
                .iter()
                .zip(state)
                .zip(&self.widths)
                .map(|((c, s), w)| (s - c).powi(2) / w)
                .sum();
            phi[i] = (-distance).exp();
        }
        if self.include_bias {
            phi[self.centers.nrows()] = 1.0;
        }
        Ok(phi)
    }

    fn name(&self) -> &str {
        "RadialBasis"
    }
}
