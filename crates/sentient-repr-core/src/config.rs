//! Representation configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{ReprError, Result};

/// Default number of bins per continuous dimension
pub const DEFAULT_DISCRETIZATION: usize = 20;

/// Configuration shared by every representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepresentationConfig {
    /// Bins used for each continuous dimension
    pub discretization: usize,
    /// Seed for the tie-break RNG (entropy when unset)
    pub seed: Option<u64>,
}

impl Default for RepresentationConfig {
    fn default() -> Self {
        Self {
            discretization: DEFAULT_DISCRETIZATION,
            seed: None,
        }
    }
}

impl RepresentationConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the configuration for values no representation can use
    pub fn validate(&self) -> Result<()> {
        if self.discretization == 0 {
            return Err(ReprError::Configuration(
                "discretization must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
