//! Error types for the caller boundary and configuration loading.
//!
//! Segmentation, the risk layers and aggregation are total functions and never
//! fail. Errors only arise before the core runs: rejecting empty input and
//! loading a taxonomy or engine configuration from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to callers of the risk engine.
#[derive(Debug, Error)]
pub enum RiskError {
    /// The contract text was empty or whitespace-only.
    #[error("contract text cannot be empty")]
    EmptyInput,

    /// A taxonomy definition could not be parsed or failed validation.
    #[error("invalid taxonomy: {message}")]
    Taxonomy { message: String },

    /// An engine configuration could not be parsed.
    #[error("invalid engine configuration: {message}")]
    Config { message: String },

    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for fallible risk engine operations.
pub type RiskResult<T> = Result<T, RiskError>;
