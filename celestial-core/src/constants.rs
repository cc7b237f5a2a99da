#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

pub const ARCMIN_PER_DEGREE: f64 = 60.0;

pub const DEGREES_PER_CIRCLE: f64 = 360.0;

/// Largest valid declination magnitude, in degrees.
pub const MAX_DECLINATION_DEG: f64 = 90.0;
