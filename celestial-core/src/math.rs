#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Central angle between two points given their latitude terms and the
/// longitude difference, in radians.
///
/// Vincenty's form of the great-circle distance. Unlike the haversine or
/// spherical law of cosines it stays well conditioned for both tiny and
/// near-antipodal separations.
#[inline]
pub fn vincenty_angular_separation(
    sin_lat1: f64,
    cos_lat1: f64,
    sin_lat2: f64,
    cos_lat2: f64,
    delta_lon: f64,
) -> f64 {
    let (sin_delta_lon, cos_delta_lon) = libm::sincos(delta_lon);

    let num = libm::sqrt(
        (cos_lat2 * sin_delta_lon).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_delta_lon).powi(2),
    );
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_delta_lon;

    libm::atan2(num, den)
}

/// Euclidean distance in a flat (RA, Dec) degree plane.
///
/// No RA wrap-around and no cos(Dec) compression: two points either side of
/// RA = 0 are ~360 degrees apart under this metric.
#[inline]
pub fn planar_distance_deg(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    libm::hypot(ra1 - ra2, dec1 - dec2)
}
