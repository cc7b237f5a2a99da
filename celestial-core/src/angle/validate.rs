use super::normalize::wrap_degrees;
use crate::constants::MAX_DECLINATION_DEG;
use crate::{AstroError, AstroResult, MathErrorKind};

/// Checks an (RA, Dec) pair in degrees and returns it in canonical form.
///
/// RA must be finite and is wrapped to [0°, 360°). Dec must be finite and
/// within [-90°, +90°]. Declinations are never wrapped or clamped: a value
/// past the pole means the input is wrong, so it is reported rather than
/// silently corrected.
pub fn checked_position(ra_deg: f64, dec_deg: f64) -> AstroResult<(f64, f64)> {
    if !ra_deg.is_finite() {
        return Err(AstroError::math_error(
            "checked_position",
            MathErrorKind::NotFinite,
            "RA not finite",
        ));
    }
    if !dec_deg.is_finite() {
        return Err(AstroError::math_error(
            "checked_position",
            MathErrorKind::NotFinite,
            "Dec not finite",
        ));
    }
    if !(-MAX_DECLINATION_DEG..=MAX_DECLINATION_DEG).contains(&dec_deg) {
        return Err(AstroError::math_error(
            "checked_position",
            MathErrorKind::OutOfRange,
            &format!("Dec {:.2}° out of range [-90°, +90°]", dec_deg),
        ));
    }
    Ok((wrap_degrees(ra_deg), dec_deg))
}
