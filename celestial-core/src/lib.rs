//! Sky-position primitives shared by the cross-matching crates.
//!
//! `celestial-core` is the small, dependency-light layer underneath
//! `celestial-crossmatch`: a typed [`Angle`], RA/Dec normalization and
//! validation, great-circle separation on the celestial sphere, and the
//! [`AstroError`] type those operations report through.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`angle`] | [`Angle`] type, RA wrapping, declination validation |
//! | [`separation`] | Exact angular separation, single pair or one-to-many |
//! | [`math`] | Vincenty kernel and float helpers |
//! | [`constants`] | Angular unit conversions |
//! | [`errors`] | [`AstroError`], [`AstroResult`], [`MathErrorKind`] |
//!
//! # Quick Start
//!
//! ```
//! use celestial_core::separation::angular_separation_deg;
//!
//! // Separation across the 0/360 seam is measured the short way round.
//! let sep = angular_separation_deg(10.0, 0.0, 350.0, 0.0);
//! assert!((sep - 20.0).abs() < 1e-10);
//! ```
//!
//! # Design Notes
//!
//! - **Degrees at the edges, radians inside**: public entry points take
//!   RA/Dec in degrees because that is how catalogs store them; trigonometry
//!   runs on radians through [`Angle`].
//! - **No hidden validation in hot paths**: separation functions accept any
//!   float and propagate NaN. Range checks live in [`angle::validate`] and
//!   are applied once when data enters a catalog.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod math;
pub mod separation;

pub use angle::Angle;
pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use separation::{angular_separation_deg, separations_deg};
