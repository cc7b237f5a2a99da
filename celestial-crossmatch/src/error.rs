//! Error type for the cross-matching engine.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidInput`](CrossMatchError::InvalidInput) | bad coordinates, negative radius, zero iterations, ratios over empty catalogs |
//! | [`Cancelled`](CrossMatchError::Cancelled) | a Monte Carlo run abandoned through its cancel flag |
//! | [`Io`](CrossMatchError::Io) / [`Csv`](CrossMatchError::Csv) | catalog and match-table files |
//! | [`Config`](CrossMatchError::Config) | unreadable analysis configuration |
//! | [`ThreadPool`](CrossMatchError::ThreadPool) | worker pool construction |
//!
//! Zero matches and a zero-variance null distribution are *not* errors: the
//! former is a normal result and the latter is reported as an undefined
//! z-score on [`SignificanceResult`](crate::SignificanceResult).

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrossMatchError {
    /// Input rejected before any computation ran.
    #[error("Invalid input in {context}: {message}")]
    InvalidInput { context: String, message: String },

    #[error("Monte Carlo run cancelled after {completed} of {requested} iterations")]
    Cancelled { completed: usize, requested: usize },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error ({origin}): {message}")]
    Config { origin: String, message: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience alias for `Result<T, CrossMatchError>`.
pub type CrossMatchResult<T> = Result<T, CrossMatchError>;

impl CrossMatchError {
    /// Creates an [`InvalidInput`](Self::InvalidInput) error.
    pub fn invalid_input(context: &str, reason: &str) -> Self {
        Self::InvalidInput {
            context: context.to_string(),
            message: reason.to_string(),
        }
    }

    /// Creates an [`Io`](Self::Io) error tagged with the offending path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a [`Config`](Self::Config) error.
    pub fn config(origin: &str, reason: &str) -> Self {
        Self::Config {
            origin: origin.to_string(),
            message: reason.to_string(),
        }
    }

    /// Returns `true` for errors caused by caller-supplied values.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = CrossMatchError::invalid_input("cross_match", "radius -1 arcmin is negative");
        assert_eq!(
            err.to_string(),
            "Invalid input in cross_match: radius -1 arcmin is negative"
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_cancelled_message() {
        let err = CrossMatchError::Cancelled {
            completed: 12,
            requested: 100,
        };
        assert!(err.to_string().contains("12 of 100"));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = CrossMatchError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<CrossMatchError>();
        _assert_sync::<CrossMatchError>();
    }
}
