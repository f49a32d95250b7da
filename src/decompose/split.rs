//! Splitting a ring into per-hemisphere chains at meridian crossings.

use glam::DVec2;

/// Longitudes reserved for synthetic crossing points.
pub(crate) const MERIDIANS: [f64; 3] = [0.0, 180.0, -180.0];

/// Returns true if the vertex sits on a meridian marker longitude.
pub(crate) fn is_marker(v: DVec2) -> bool {
    MERIDIANS.contains(&v.x)
}

/// Vertices of one ring, routed by longitude sign.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct HemisphereChains {
    pub positive: Vec<DVec2>,
    pub negative: Vec<DVec2>,
    /// True if any edge crossed 0 or ±180.
    pub crossed: bool,
}

/// Moves real vertices off the marker meridians.
///
/// ±180 moves inward by `nudge`. A vertex on 0 moves toward the hemisphere
/// of the vertex before it; the first vertex looks ahead to the next
/// non-zero longitude and defaults to the east.
pub(crate) fn nudge_off_meridians(ring: &[DVec2], nudge: f64) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::with_capacity(ring.len());
    for (i, &v) in ring.iter().enumerate() {
        let lon = if v.x == 180.0 {
            180.0 - nudge
        } else if v.x == -180.0 {
            -180.0 + nudge
        } else if v.x == 0.0 {
            let east = match out.last() {
                Some(prev) => prev.x > 0.0,
                None => ring[i + 1..]
                    .iter()
                    .find(|w| w.x != 0.0)
                    .map_or(true, |w| w.x > 0.0),
            };
            if east {
                nudge
            } else {
                -nudge
            }
        } else {
            v.x
        };
        out.push(DVec2::new(lon, v.y));
    }
    out
}

/// Latitude where the edge `prev -> cur` crosses the antimeridian, measured
/// along the wrapped (short) way round.
fn antimeridian_latitude(prev: DVec2, cur: DVec2) -> (f64, f64) {
    let mid = if prev.x > 0.0 { 180.0 } else { -180.0 };
    let mut span = (mid - prev.x).abs() + (-mid - cur.x).abs();
    if prev.x < 0.0 {
        span = -span;
    }
    (mid, prev.y + (mid - prev.x) * (cur.y - prev.y) / span)
}

/// Latitude where the edge `prev -> cur` crosses the prime meridian.
fn prime_meridian_latitude(prev: DVec2, cur: DVec2) -> f64 {
    prev.y + (0.0 - prev.x) * (cur.y - prev.y) / (cur.x - prev.x)
}

/// Walks a nudged, open ring and its closing edge, routing vertices to the
/// east (`lon > 0`) or west chain and inserting marker points where an
/// edge changes hemisphere.
pub(crate) fn split_chains(ring: &[DVec2]) -> HemisphereChains {
    let mut chains = HemisphereChains::default();
    let Some(&start) = ring.first() else {
        return chains;
    };

    let mut prev = start;
    for &cur in ring.iter().chain(std::iter::once(&start)) {
        if (cur.x > 0.0) != (prev.x > 0.0) {
            chains.crossed = true;
            if (cur.x - prev.x).abs() > 180.0 {
                let (_, lat) = antimeridian_latitude(prev, cur);
                chains.positive.push(DVec2::new(180.0, lat));
                chains.negative.push(DVec2::new(-180.0, lat));
            } else {
                let lat = prime_meridian_latitude(prev, cur);
                chains.positive.push(DVec2::new(0.0, lat));
                chains.negative.push(DVec2::new(0.0, lat));
            }
        }
        if cur.x > 0.0 {
            chains.positive.push(cur);
        } else {
            chains.negative.push(cur);
        }
        prev = cur;
    }

    // The closing vertex repeats the start.
    if start.x > 0.0 {
        chains.positive.pop();
    } else {
        chains.negative.pop();
    }
    chains
}
