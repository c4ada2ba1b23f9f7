//! Error types for the fixture harness.

use thiserror::Error;

/// Errors that can occur while loading or running fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Error parsing a fixture file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error loading a fixture file or the failures ledger.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// The engine refused the fixture text.
    #[error("analysis failed: {0}")]
    Analysis(#[from] layered_risk::RiskError),
}

/// Result type for harness operations.
pub type SpecResult<T> = Result<T, SpecError>;
