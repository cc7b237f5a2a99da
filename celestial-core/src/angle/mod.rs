//! Typed angles plus the RA/Dec range rules catalogs rely on.
//!
//! - [`Angle`] stores radians and converts to degrees and arc-minutes.
//! - [`wrap_degrees`] folds right ascension into [0°, 360°).
//! - [`checked_position`] rejects non-finite and out-of-range values before
//!   they reach a catalog.

mod core;
mod normalize;
pub mod validate;

pub use self::core::Angle;
pub use normalize::wrap_degrees;
pub use validate::checked_position;
