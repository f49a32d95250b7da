//! Conversions between geographic coordinates and unit direction vectors.

use glam::DVec3;

/// Latitude substituted for an exact pole before a point is rotated.
pub const POLAR_CLAMP_LAT: f64 = 89.9;

/// Wraps a longitude into the half-open range (-180, 180].
pub fn normalize_lon(lon: f64) -> f64 {
    let mut wrapped = lon % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Moves a latitude sitting exactly on a pole to ±89.9.
///
/// Longitude is undefined at the poles, so rotating an exact pole vertex
/// would produce an arbitrary output longitude.
pub fn clamp_polar_lat(lat: f64) -> f64 {
    if lat == 90.0 {
        POLAR_CLAMP_LAT
    } else if lat == -90.0 {
        -POLAR_CLAMP_LAT
    } else {
        lat
    }
}

/// Converts a (lat, lon) pair in degrees to direction cosines on the unit sphere.
///
/// The z axis points to the north pole and the x axis crosses (0, 0).
pub fn to_unit_vector(lat: f64, lon: f64) -> DVec3 {
    let colat = (90.0 - lat).to_radians();
    let lon = lon.to_radians();
    let sin_colat = colat.sin();
    DVec3::new(sin_colat * lon.cos(), sin_colat * lon.sin(), colat.cos())
}

/// Converts a unit vector back to (lat, lon) in degrees.
///
/// The z component is clamped before `acos` so rounding noise just past
/// ±1 cannot produce NaN.
pub fn from_unit_vector(v: DVec3) -> (f64, f64) {
    let colat = v.z.clamp(-1.0, 1.0).acos().to_degrees();
    let lat = 90.0 - colat;
    let lon = normalize_lon(v.y.atan2(v.x).to_degrees());
    (lat, lon)
}

/// Rounds a coordinate to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
