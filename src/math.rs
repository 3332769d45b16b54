//! Mathematical utilities for the ephemeris calculations.
//!
//! Angles cross module boundaries in degrees; every trigonometric call goes
//! through radians here.

/// Converts degrees to radians.
#[inline]
pub const fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub const fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Normalizes an angle in degrees to the range [0, 360).
pub fn normalize_degrees_0_to_360(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// Sine of an angle given in degrees.
#[inline]
pub fn sin_deg(degrees: f64) -> f64 {
    degrees_to_radians(degrees).sin()
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn cos_deg(degrees: f64) -> f64 {
    degrees_to_radians(degrees).cos()
}

/// Arcsine returning degrees.
#[inline]
pub fn asin_deg(x: f64) -> f64 {
    radians_to_degrees(x.asin())
}

/// Arccosine returning degrees.
#[inline]
pub fn acos_deg(x: f64) -> f64 {
    radians_to_degrees(x.acos())
}

/// Computes (x * a) + b with only one rounding error (fused multiply-add).
#[inline]
pub fn mul_add(x: f64, a: f64, b: f64) -> f64 {
    x.mul_add(a, b)
}

/// Rounds to the nearest integer, halves rounding towards +∞.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
