//! Unified error types for the GIM ecosystem
//!
//! This module provides a common error type [`GimError`] that can represent
//! errors from any part of the system. Domain-specific failures (schema
//! violations, cross-field invariants, I/O) convert to `GimError` for uniform
//! handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use gim_core::{GimError, GimResult};
//!
//! fn process_grid(path: &str) -> GimResult<()> {
//!     let topology = load_topology(path)?;
//!     check_cases(&topology)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::diagnostics::Diagnostics;

/// Unified error type for all GIM operations.
///
/// Validation failures carry the full [`Diagnostics`] collection so callers
/// see every offending field path, not just the first.
#[derive(Error, Debug)]
pub enum GimError {
    /// I/O errors (file access, directory creation, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Schema validation errors, aggregated over the whole document
    #[error("Validation error:\n{0}")]
    Validation(Diagnostics),

    /// Per-phase operand tuples of differing length
    #[error("Length mismatch: expected {expected} phases, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using GimError.
pub type GimResult<T> = Result<T, GimError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for GimError {
    fn from(err: anyhow::Error) -> Self {
        GimError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for GimError {
    fn from(s: String) -> Self {
        GimError::Other(s)
    }
}

impl From<&str> for GimError {
    fn from(s: &str) -> Self {
        GimError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for GimError {
    fn from(err: serde_json::Error) -> Self {
        GimError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GimError::Parse("unexpected token".into());
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let gim_err: GimError = io_err.into();
        assert!(matches!(gim_err, GimError::Io(_)));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = GimError::LengthMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch: expected 3 phases, found 2"
        );
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> GimResult<()> {
            Err(GimError::Other("test".into()))
        }

        fn outer() -> GimResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
