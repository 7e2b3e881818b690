//! Error types for the representation core

use thiserror::Error;

/// Core error type for representation operations
#[derive(Error, Debug)]
pub enum ReprError {
    /// Invalid construction input (discretization, bounds, feature sizes)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// State or weight vector of the wrong length
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Feature function disagrees with the weight layout
    #[error("Feature length mismatch: model has {expected} features, phi has {actual}")]
    FeatureLengthMismatch { expected: usize, actual: usize },

    /// The domain reported an empty legal action set
    #[error("No legal actions available in this state")]
    NoLegalActions,

    /// Action identifier outside the domain's action range
    #[error("Invalid action {action}: domain has {actions_num} actions")]
    InvalidAction { action: usize, actions_num: usize },

    /// State component that cannot be binned
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Q-values that cannot be ranked (all NaN)
    #[error("Computation error: {0}")]
    Computation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for representation operations
pub type Result<T> = std::result::Result<T, ReprError>;
