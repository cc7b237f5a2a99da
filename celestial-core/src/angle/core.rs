//! Core angle type.
//!
//! [`Angle`] stores radians so trigonometry needs no conversion, and offers
//! degree and arc-minute constructors because catalogs and match radii are
//! expressed in those units.
//!
//! ```
//! use celestial_core::Angle;
//!
//! let radius = Angle::from_arcminutes(30.0);
//! assert!((radius.degrees() - 0.5).abs() < 1e-12);
//!
//! let (sin, cos) = Angle::from_degrees(30.0).sin_cos();
//! assert!((sin - 0.5).abs() < 1e-12);
//! assert!((cos - 0.866025).abs() < 1e-5);
//! ```

use crate::constants::ARCMIN_PER_DEGREE;

/// An angular measurement stored as radians.
///
/// `PartialEq`/`PartialOrd` compare the radian values. `Eq` and `Ord` are not
/// implemented because the value can be NaN.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Angle {
    rad: f64,
}

impl Angle {
    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self {
            rad: deg.to_radians(),
        }
    }

    /// Creates an angle from arc-minutes (1/60 of a degree).
    #[inline]
    pub fn from_arcminutes(arcmin: f64) -> Self {
        Self::from_degrees(arcmin / ARCMIN_PER_DEGREE)
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.rad
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.rad.to_degrees()
    }

    /// Returns `(sin, cos)` in one call.
    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        libm::sincos(self.rad)
    }
}
