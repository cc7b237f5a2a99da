//! Error type for sky-position calculations.
//!
//! [`AstroError`] reports a numerical problem with an input value: a NaN or
//! infinite coordinate, or a declination beyond the pole. [`MathErrorKind`]
//! tells the two apart.
//!
//! ```
//! use celestial_core::{AstroError, MathErrorKind};
//!
//! fn checked_dec(dec: f64) -> Result<f64, AstroError> {
//!     if !(-90.0..=90.0).contains(&dec) {
//!         return Err(AstroError::math_error(
//!             "checked_dec",
//!             MathErrorKind::OutOfRange,
//!             "declination beyond the pole",
//!         ));
//!     }
//!     Ok(dec)
//! }
//! assert!(checked_dec(91.0).is_err());
//! ```

use thiserror::Error;

/// Classification of mathematical errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MathErrorKind {
    /// Input is NaN or infinity.
    NotFinite,
    /// Value outside valid domain (e.g., declination > 90°).
    OutOfRange,
}

/// Error type for position checks.
#[derive(Error, Debug)]
pub enum AstroError {
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },
}

/// Convenience alias for `Result<T, AstroError>`.
pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    /// Creates a [`MathError`](Self::MathError) with the given kind.
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    pub fn math_kind(&self) -> &MathErrorKind {
        match self {
            Self::MathError { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_with_kind() {
        let err = AstroError::math_error(
            "checked_position",
            MathErrorKind::OutOfRange,
            "Dec 95.00° out of range",
        );
        assert!(err.to_string().contains("Math error in checked_position"));
        assert!(err.to_string().contains("OutOfRange"));
        assert_eq!(err.math_kind(), &MathErrorKind::OutOfRange);
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<AstroError>();
        _assert_sync::<AstroError>();
    }
}
