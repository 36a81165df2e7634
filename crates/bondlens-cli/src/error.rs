//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("Cannot read {path}: {reason}")]
    Input {
        /// File that failed.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// The settings file could not be loaded.
    #[error("Configuration error in {path}: {reason}")]
    Config {
        /// Settings file.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// The requested fund has no positions.
    #[error("Fund '{0}' not found. Available funds: {1}")]
    UnknownFund(String, String),

    /// Validation found errors and invalid rows were not allowed.
    #[error("Validation failed with {0} error(s). Re-run with --allow-invalid to skip invalid rows.")]
    ValidationFailed(usize),

    /// Nothing left to analyze.
    #[error("No valid bonds to analyze")]
    NoPositions,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
