//! Geographic coordinate helpers.
//!
//! Latitude and longitude are always in degrees. Longitudes leaving this
//! module are normalized to (-180, 180].

mod coords;

pub use coords::{
    clamp_polar_lat, from_unit_vector, normalize_lon, round_to, to_unit_vector, POLAR_CLAMP_LAT,
};
