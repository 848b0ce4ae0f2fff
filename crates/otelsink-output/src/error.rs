//! Output error types

use otelsink_accessor::AccessorError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building or using an output context
#[derive(Error, Debug)]
pub enum OutputError {
    /// Body key pattern could not be compiled
    #[error("Invalid body key pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// Registry or metadata accessor assembly failed
    #[error("Build error: {0}")]
    Build(String),

    /// Malformed label, proxy or other option
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resource exhaustion during construction
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    /// Endpoint path could not be normalized
    #[error("Normalization failure: {0}")]
    NormalizationFailure(String),

    /// Upstream connection could not be set up
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Context used outside the Ready state
    #[error("Context not ready: {0}")]
    NotReady(String),
}

impl From<AccessorError> for OutputError {
    fn from(e: AccessorError) -> Self {
        match e {
            AccessorError::InvalidPattern { pattern, reason } => {
                OutputError::InvalidPattern { pattern, reason }
            }
            AccessorError::Build(msg) => OutputError::Build(msg),
        }
    }
}

impl From<ConfigError> for OutputError {
    fn from(e: ConfigError) -> Self {
        OutputError::Configuration(e.to_string())
    }
}
