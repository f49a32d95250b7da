//! Stroke fallback for features that are not drawn as filled rings.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::feature::{Pen, Vertex};

/// Drawing command attached to a path vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo,
    LineTo,
}

/// A path vertex in an unwrapped (lon, lat) plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathVertex {
    pub position: DVec2,
    pub command: PathCommand,
}

/// Converts feature vertices into a stroked path whose longitudes never
/// jump by more than 180° between connected vertices.
///
/// Longitudes past the antimeridian keep counting beyond ±180 until the
/// next `Move`, which starts again from the raw longitude.
pub fn unwrap_polyline(vertices: &[Vertex]) -> Vec<PathVertex> {
    let mut path = Vec::with_capacity(vertices.len());
    let mut offset = 0.0;
    let mut prev_lon: Option<f64> = None;

    for v in vertices {
        let command = match (v.pen, prev_lon) {
            (Pen::Draw, Some(_)) => PathCommand::LineTo,
            _ => PathCommand::MoveTo,
        };
        if command == PathCommand::MoveTo {
            offset = 0.0;
        } else if let Some(prev) = prev_lon {
            let jump = v.lon - prev;
            if jump > 180.0 {
                offset -= 360.0;
            } else if jump < -180.0 {
                offset += 360.0;
            }
        }
        path.push(PathVertex {
            position: DVec2::new(v.lon + offset, v.lat),
            command,
        });
        prev_lon = Some(v.lon);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_across_antimeridian() {
        let vertices = vec![
            Vertex::new(0.0, 170.0, Pen::Move),
            Vertex::new(1.0, -175.0, Pen::Draw),
            Vertex::new(2.0, -160.0, Pen::Draw),
            Vertex::new(3.0, 175.0, Pen::Draw),
        ];
        let path = unwrap_polyline(&vertices);
        let lons: Vec<_> = path.iter().map(|p| p.position.x).collect();
        assert_eq!(lons, vec![170.0, 185.0, 200.0, 175.0]);
        assert_eq!(path[0].command, PathCommand::MoveTo);
        assert!(path[1..].iter().all(|p| p.command == PathCommand::LineTo));
    }

    #[test]
    fn test_move_resets_offset() {
        let vertices = vec![
            Vertex::new(0.0, -170.0, Pen::Move),
            Vertex::new(0.0, 170.0, Pen::Draw),
            Vertex::new(5.0, 160.0, Pen::Move),
            Vertex::new(5.0, 150.0, Pen::Draw),
        ];
        let path = unwrap_polyline(&vertices);
        assert_eq!(path[1].position.x, -190.0);
        assert_eq!(path[2].position.x, 160.0);
        assert_eq!(path[2].command, PathCommand::MoveTo);
        assert_eq!(path[3].position.x, 150.0);
    }

    #[test]
    fn test_leading_draw_becomes_move() {
        let path = unwrap_polyline(&[Vertex::new(1.0, 2.0, Pen::Draw)]);
        assert_eq!(path[0].command, PathCommand::MoveTo);
        assert_eq!(path[0].position, DVec2::new(2.0, 1.0));
    }
}
