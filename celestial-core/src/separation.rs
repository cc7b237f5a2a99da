//! Great-circle angular separation on the celestial sphere.
//!
//! Both entry points take RA/Dec in degrees and return degrees in [0, 180].
//! The Vincenty formula is used throughout, so results are exact (to float
//! precision) for any pair of declinations, at the poles, and across the
//! 0°/360° RA seam. No flat-sky approximation is involved.
//!
//! Inputs are not validated: a NaN coordinate yields a NaN separation.

use crate::angle::Angle;
use crate::constants::RAD_TO_DEG;
use crate::math::vincenty_angular_separation;

/// Angular distance between two sky positions, in degrees.
///
/// ```
/// use celestial_core::angular_separation_deg;
///
/// let sep = angular_separation_deg(0.0, 90.0, 123.0, 89.0);
/// assert!((sep - 1.0).abs() < 1e-10);
/// ```
pub fn angular_separation_deg(ra1_deg: f64, dec1_deg: f64, ra2_deg: f64, dec2_deg: f64) -> f64 {
    Origin::new(ra1_deg, dec1_deg).separation_deg(ra2_deg, dec2_deg)
}

/// Separations from one position to each of `positions`, lazily, in degrees.
///
/// The trigonometry of the fixed position is evaluated once; each yielded
/// value costs one Vincenty evaluation. The iterator has the same length as
/// `positions`.
///
/// ```
/// use celestial_core::separations_deg;
///
/// let others = [(10.0, 0.0), (350.0, 0.0), (0.0, 90.0)];
/// let seps: Vec<f64> = separations_deg(0.0, 0.0, others).collect();
/// assert_eq!(seps.len(), 3);
/// assert!((seps[1] - 10.0).abs() < 1e-10);
/// assert!((seps[2] - 90.0).abs() < 1e-10);
/// ```
pub fn separations_deg<I>(ra_deg: f64, dec_deg: f64, positions: I) -> impl Iterator<Item = f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let origin = Origin::new(ra_deg, dec_deg);
    positions
        .into_iter()
        .map(move |(ra, dec)| origin.separation_deg(ra, dec))
}

/// A fixed position with its declination terms cached.
#[derive(Debug, Clone, Copy)]
pub struct Origin {
    ra_deg: f64,
    sin_dec: f64,
    cos_dec: f64,
}

impl Origin {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        let (sin_dec, cos_dec) = Angle::from_degrees(dec_deg).sin_cos();
        Self {
            ra_deg,
            sin_dec,
            cos_dec,
        }
    }

    /// Separation from this origin to `(ra_deg, dec_deg)`, in degrees.
    #[inline]
    pub fn separation_deg(&self, ra_deg: f64, dec_deg: f64) -> f64 {
        let (sin_dec, cos_dec) = Angle::from_degrees(dec_deg).sin_cos();
        let delta_lon = Angle::from_degrees(ra_deg - self.ra_deg).radians();
        vincenty_angular_separation(self.sin_dec, self.cos_dec, sin_dec, cos_dec, delta_lon)
            * RAD_TO_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point() {
        assert_eq!(angular_separation_deg(123.4, -56.7, 123.4, -56.7), 0.0);
    }

    #[test]
    fn test_90_degrees_on_equator() {
        let dist = angular_separation_deg(0.0, 0.0, 90.0, 0.0);
        assert!((dist - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_pole_to_pole() {
        let dist = angular_separation_deg(0.0, 90.0, 0.0, -90.0);
        assert!((dist - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_antipodes_on_equator() {
        let dist = angular_separation_deg(0.0, 0.0, 180.0, 0.0);
        assert!((dist - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_wrap_around_is_short_arc() {
        let dist = angular_separation_deg(10.0, 0.0, 350.0, 0.0);
        assert!((dist - 20.0).abs() < 1e-10, "got {}", dist);
    }

    #[test]
    fn test_ra_irrelevant_at_pole() {
        let a = angular_separation_deg(0.0, 90.0, 45.0, 80.0);
        let b = angular_separation_deg(200.0, 90.0, 45.0, 80.0);
        assert!((a - 10.0).abs() < 1e-10);
        assert!((a - b).abs() < 1e-10);
    }

    #[test]
    fn test_symmetry_and_bounds() {
        let points = [
            (0.0, 0.0),
            (359.9, -89.5),
            (180.0, 45.0),
            (12.3, 89.99),
            (271.0, -3.0),
        ];
        for &(ra1, dec1) in &points {
            for &(ra2, dec2) in &points {
                let ab = angular_separation_deg(ra1, dec1, ra2, dec2);
                let ba = angular_separation_deg(ra2, dec2, ra1, dec1);
                assert!((ab - ba).abs() < 1e-10);
                assert!((0.0..=180.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_small_separation() {
        // 0.01° of RA on the equator is 0.6 arcmin.
        let dist = angular_separation_deg(180.0, 0.0, 180.01, 0.0);
        assert!((dist * 60.0 - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(angular_separation_deg(f64::NAN, 0.0, 1.0, 1.0).is_nan());
        assert!(angular_separation_deg(0.0, 0.0, 1.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_separations_match_pairwise() {
        let others = vec![(1.0, 2.0), (300.0, -40.0), (180.0, 0.0)];
        let lazy: Vec<f64> = separations_deg(20.0, 10.0, others.iter().copied()).collect();
        assert_eq!(lazy.len(), others.len());
        for (sep, &(ra, dec)) in lazy.iter().zip(&others) {
            assert_eq!(*sep, angular_separation_deg(20.0, 10.0, ra, dec));
        }
    }

    #[test]
    fn test_separations_empty() {
        assert_eq!(separations_deg(0.0, 0.0, Vec::new()).count(), 0);
    }
}
