//! Angle wrapping for right ascension.
//!
//! Right ascension is cyclic: 370° and 10° name the same meridian.
//! [`wrap_degrees`] reduces with [`fmod`](crate::math::fmod) and then lift
//! negative remainders into range. Rust's `%` is a remainder, not a modulo,
//! so `-1.0 % 360.0` is `-1.0`; the lift turns that into `359.0`.
//!
//! Declination is never wrapped. Going "past" the pole is an input error and
//! is rejected by [`checked_position`](super::checked_position).

use crate::constants::DEGREES_PER_CIRCLE;
use crate::math::fmod;

/// Wraps an angle in degrees to [0, 360).
///
/// ```
/// use celestial_core::angle::wrap_degrees;
///
/// assert_eq!(wrap_degrees(370.0), 10.0);
/// assert_eq!(wrap_degrees(-90.0), 270.0);
/// assert_eq!(wrap_degrees(360.0), 0.0);
/// ```
#[inline]
pub fn wrap_degrees(x: f64) -> f64 {
    lift(fmod(x, DEGREES_PER_CIRCLE), DEGREES_PER_CIRCLE)
}

/// Moves a remainder in (-period, period) into [0, period).
///
/// Adding `period` to a tiny negative remainder can round up to exactly
/// `period`; that case folds back to zero so the upper bound stays open.
#[inline]
fn lift(w: f64, period: f64) -> f64 {
    if w >= 0.0 {
        return w;
    }
    let lifted = w + period;
    if lifted >= period {
        0.0
    } else {
        lifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(359.5), 359.5);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(-0.5), 359.5);
        assert_eq!(wrap_degrees(-720.0), 0.0);
    }

    #[test]
    fn test_wrap_degrees_tiny_negative_stays_below_360() {
        let w = wrap_degrees(-1e-15);
        assert!((0.0..360.0).contains(&w));
    }

    #[test]
    fn test_wrap_degrees_nan_propagates() {
        assert!(wrap_degrees(f64::NAN).is_nan());
    }
}
