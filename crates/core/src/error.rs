//! Error types for the geothin thinning engine.

use thiserror::Error;

/// Primary error type for thinning operations.
#[derive(Error, Debug)]
pub enum ThinError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThinError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Convenience Result type alias for ThinError.
pub type Result<T> = std::result::Result<T, ThinError>;
