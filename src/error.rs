//! Error types for the finsift library.
//!
//! All fallible operations in finsift return [`Result`], whose error type is
//! the [`FinsiftError`] enum. Constructor helpers keep call sites short.
//!
//! # Examples
//!
//! ```
//! use finsift::error::{FinsiftError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FinsiftError::config("category set must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for finsift operations.
#[derive(Error, Debug)]
pub enum FinsiftError {
    /// I/O errors (reading or writing model artifacts).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (empty vocabulary, invalid ranges, etc.).
    /// These are fatal at generation time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis errors (tokenization, n-gram bounds).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Training errors (degenerate corpus, dimension mismatches).
    #[error("Training error: {0}")]
    Training(String),

    /// Artifact errors (missing, corrupt, or mismatched persisted model).
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Invalid request argument (rejected before inference runs).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`FinsiftError`].
pub type Result<T> = std::result::Result<T, FinsiftError>;

impl FinsiftError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FinsiftError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FinsiftError::Analysis(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        FinsiftError::Training(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        FinsiftError::Artifact(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FinsiftError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = FinsiftError::config("empty category set");
        assert_eq!(error.to_string(), "Configuration error: empty category set");

        let error = FinsiftError::analysis("bad n-gram range");
        assert_eq!(error.to_string(), "Analysis error: bad n-gram range");

        let error = FinsiftError::invalid_argument("topk out of range");
        assert_eq!(error.to_string(), "Invalid argument: topk out of range");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FinsiftError::from(io_error);

        match error {
            FinsiftError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
