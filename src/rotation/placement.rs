//! Moving a shape drawn around (0, 0) onto an arbitrary spot on the sphere.
//!
//! Map symbols and labels are authored as small outlines in local degrees
//! centered on lat 0, lon 0. Placing one is two point rotations: spin the
//! outline about the north pole to the target meridian, then tilt it along
//! that meridian to the target latitude.

use glam::DVec2;

use super::{rotate_point, FiniteRotation};

/// Places `outline` (x = lon, y = lat, degrees around the origin) so that its
/// origin lands on (`dest_lat`, `dest_lon`). Returns (lon, lat) vertices.
pub fn place_at(outline: &[DVec2], dest_lat: f64, dest_lon: f64) -> Vec<DVec2> {
    let spin = FiniteRotation::new(90.0, 0.0, dest_lon);
    let tilt = FiniteRotation::new(0.0, 90.0 + dest_lon, -dest_lat);

    outline
        .iter()
        .map(|p| {
            let (lat, lon) = rotate_point(p.y, p.x, &spin);
            let (lat, lon) = rotate_point(lat, lon, &tilt);
            DVec2::new(lon, lat)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_lands_on_destination() {
        for &(lat, lon) in &[(0.0, 0.0), (45.0, 30.0), (-60.0, -150.0), (10.0, 175.0)] {
            let placed = place_at(&[DVec2::ZERO], lat, lon);
            assert!((placed[0].y - lat).abs() < 1e-9, "lat {} -> {:?}", lat, placed[0]);
            assert!((placed[0].x - lon).abs() < 1e-9, "lon {} -> {:?}", lon, placed[0]);
        }
    }

    #[test]
    fn test_place_at_origin_is_identity() {
        let outline = vec![DVec2::new(-1.0, -1.0), DVec2::new(1.0, -1.0), DVec2::new(0.0, 1.5)];
        let placed = place_at(&outline, 0.0, 0.0);
        assert_eq!(placed, outline);
    }

    #[test]
    fn test_shape_keeps_its_size() {
        let outline = vec![DVec2::new(0.0, 0.0), DVec2::new(0.0, 2.0)];
        let placed = place_at(&outline, 40.0, 100.0);
        // A 2° north offset stays a 2° north offset along the meridian.
        assert!((placed[1].y - 42.0).abs() < 1e-9);
        assert!((placed[1].x - 100.0).abs() < 1e-9);
    }
}
