//! Accessor error types

use thiserror::Error;

/// Errors that can occur while compiling accessors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessorError {
    /// Pattern could not be parsed into an accessor
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Source pattern as supplied
        pattern: String,
        /// What was wrong with it
        reason: String,
    },

    /// Composite accessor could not be assembled
    #[error("Build error: {0}")]
    Build(String),
}
