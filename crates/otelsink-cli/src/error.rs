//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] otelsink_output::ConfigError),

    /// Output context could not be built or used
    #[error("Output error: {0}")]
    Output(#[from] otelsink_output::OutputError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed input record
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord {
        /// 1-based line number
        line: usize,
        /// Parser message
        reason: String,
    },
}
