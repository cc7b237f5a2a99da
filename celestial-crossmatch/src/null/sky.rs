//! Isotropic random sky positions.

use celestial_core::constants::DEGREES_PER_CIRCLE;
use rand::Rng;

/// Draws one (RA, Dec) pair, in degrees, uniformly distributed on the sphere.
///
/// RA is uniform in [0, 360). Dec is `asin(2U - 1)` so that equal areas of
/// sky are equally likely; a uniform Dec would over-populate the poles.
pub fn uniform_sky_position<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    let ra = rng.gen_range(0.0..DEGREES_PER_CIRCLE);
    let u: f64 = rng.gen();
    let dec = (2.0 * u - 1.0).asin().to_degrees();
    (ra, dec)
}

/// Draws `n` independent uniform-sky positions.
pub fn uniform_sky_batch<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<(f64, f64)> {
    (0..n).map(|_| uniform_sky_position(rng)).collect()
}
