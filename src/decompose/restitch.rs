//! Rebuilding closed rings from one hemisphere chain.
//!
//! A chain is cut into sections at its marker points. Sections are then
//! merged pairwise wherever one section's endpoint latitudes nest inside
//! another's, detouring over the pole when the joined ends sit on
//! different meridians, and finally each remaining section is closed.

use glam::DVec2;

use super::split::is_marker;
use super::DecomposeError;

type Section = Vec<DVec2>;

fn endpoint_lats(section: &[DVec2]) -> (f64, f64) {
    match (section.first(), section.last()) {
        (Some(first), Some(last)) => (first.y.min(last.y), first.y.max(last.y)),
        _ => (f64::NAN, f64::NAN),
    }
}

fn pole_lat(higher_endpoint: f64) -> f64 {
    if higher_endpoint > 0.0 {
        90.0
    } else {
        -90.0
    }
}

/// Cuts a chain at marker points.
///
/// A marker directly after another marker opens a new section. If the
/// chain does not start on a marker, its head continues the last section.
fn cut_sections(chain: &[DVec2]) -> Vec<Section> {
    let mut sections: Vec<Section> = vec![Vec::new()];
    let mut prev_marker = false;

    for &point in chain {
        let marker = is_marker(point);
        if marker && prev_marker {
            sections.push(vec![point]);
            prev_marker = false;
        } else {
            if let Some(current) = sections.last_mut() {
                current.push(point);
            }
            prev_marker = marker;
        }
    }

    let starts_on_marker = sections[0].first().is_some_and(|&p| is_marker(p));
    if sections.len() > 1 && !starts_on_marker {
        let head = sections.remove(0);
        if let Some(tail) = sections.last_mut() {
            tail.extend(head);
        }
    }
    sections
}

/// Finds the first adjacent pair whose junction latitude nests inside the
/// earlier section's endpoint span.
fn find_mergeable(sections: &[Section]) -> Option<usize> {
    sections.windows(2).position(|pair| {
        let (lo, hi) = endpoint_lats(&pair[0]);
        let next_lat = pair[1][0].y;
        lo < next_lat && next_lat < hi
    })
}

fn merge_sections(
    mut sections: Vec<Section>,
    max_iterations: usize,
) -> Result<Vec<Section>, DecomposeError> {
    let mut iterations = 0;

    loop {
        sections.sort_by(|a, b| endpoint_lats(b).1.total_cmp(&endpoint_lats(a).1));
        let Some(i) = find_mergeable(&sections) else {
            return Ok(sections);
        };
        if iterations == max_iterations {
            return Err(DecomposeError::MergeLimit { iterations });
        }
        iterations += 1;

        let next = sections.remove(i + 1);
        let current = &mut sections[i];
        let (_, hi) = endpoint_lats(current);
        let end_lon = current[current.len() - 1].x;
        let start_lon = next[0].x;
        if end_lon != start_lon {
            let pole = pole_lat(hi);
            current.push(DVec2::new(end_lon, pole));
            current.push(DVec2::new(start_lon, pole));
        }
        current.extend(next);
    }
}

/// Closes a section on its first point, going over the pole when both ends
/// sit on different meridians.
fn close_section(mut section: Section) -> Section {
    let (Some(&first), Some(&last)) = (section.first(), section.last()) else {
        return section;
    };
    if is_marker(first) && is_marker(last) && first.x != last.x {
        let pole = pole_lat(first.y.max(last.y));
        section.push(DVec2::new(last.x, pole));
        section.push(DVec2::new(first.x, pole));
    }
    section.push(first);
    section
}

/// Turns one hemisphere chain into closed rings.
pub(crate) fn restitch(chain: &[DVec2], max_iterations: usize) -> Result<Vec<Section>, DecomposeError> {
    if chain.is_empty() {
        return Ok(Vec::new());
    }
    let merged = merge_sections(cut_sections(chain), max_iterations)?;
    Ok(merged.into_iter().map(close_section).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(points: &[(f64, f64)]) -> Vec<DVec2> {
        points.iter().map(|&(lon, lat)| DVec2::new(lon, lat)).collect()
    }

    #[test]
    fn test_cut_wraps_head_into_last_section() {
        let chain = pts(&[(170.0, 10.0), (180.0, 10.0), (180.0, -10.0), (170.0, -10.0)]);
        let sections = cut_sections(&chain);
        assert_eq!(sections, vec![pts(&[(180.0, -10.0), (170.0, -10.0), (170.0, 10.0), (180.0, 10.0)])]);
    }

    #[test]
    fn test_cut_keeps_marker_led_chain() {
        let chain = pts(&[(-180.0, 10.0), (-170.0, 10.0), (-170.0, -10.0), (-180.0, -10.0)]);
        assert_eq!(cut_sections(&chain), vec![chain]);
    }

    #[test]
    fn test_cut_two_lobes() {
        // Two separate excursions east of the prime meridian.
        let chain = pts(&[
            (0.0, 0.0),
            (5.0, 1.0),
            (0.0, 2.0),
            (0.0, 8.0),
            (5.0, 9.0),
            (0.0, 10.0),
        ]);
        let sections = cut_sections(&chain);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], pts(&[(0.0, 0.0), (5.0, 1.0), (0.0, 2.0)]));
        assert_eq!(sections[1], pts(&[(0.0, 8.0), (5.0, 9.0), (0.0, 10.0)]));
    }

    #[test]
    fn test_nested_sections_merge() {
        // An outer section spanning 0..10 and an inner one starting at 8.
        let outer = pts(&[(0.0, 0.0), (5.0, 5.0), (0.0, 10.0)]);
        let inner = pts(&[(0.0, 8.0), (2.0, 5.0), (0.0, 2.0)]);
        let rings = restitch(&[outer.clone(), inner.clone()].concat(), 8).unwrap();
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert_eq!(ring.len(), outer.len() + inner.len() + 1);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_pole_pair_on_differing_meridians() {
        // First section spans 60..70; the second starts at 65 on a different meridian.
        let sections = vec![
            pts(&[(0.0, 60.0), (90.0, 80.0), (180.0, 70.0)]),
            pts(&[(0.0, 65.0), (90.0, 62.0)]),
        ];
        let merged = merge_sections(sections, 8).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0][3], DVec2::new(180.0, 90.0));
        assert_eq!(merged[0][4], DVec2::new(0.0, 90.0));
    }

    #[test]
    fn test_closure_over_pole() {
        let closed = close_section(pts(&[(0.0, 70.0), (90.0, 75.0), (180.0, 72.0)]));
        assert_eq!(
            closed,
            pts(&[(0.0, 70.0), (90.0, 75.0), (180.0, 72.0), (180.0, 90.0), (0.0, 90.0), (0.0, 70.0)])
        );

        let south = close_section(pts(&[(-180.0, -70.0), (-90.0, -75.0), (0.0, -72.0)]));
        assert_eq!(south[3], DVec2::new(0.0, -90.0));
        assert_eq!(south[4], DVec2::new(-180.0, -90.0));
    }

    #[test]
    fn test_closure_same_meridian() {
        let closed = close_section(pts(&[(180.0, -10.0), (170.0, -10.0), (170.0, 10.0), (180.0, 10.0)]));
        assert_eq!(closed.len(), 5);
        assert_eq!(closed[4], DVec2::new(180.0, -10.0));
    }

    #[test]
    fn test_merge_limit() {
        let outer = pts(&[(0.0, 0.0), (5.0, 5.0), (0.0, 10.0)]);
        let inner = pts(&[(0.0, 8.0), (2.0, 5.0), (0.0, 2.0)]);
        let result = restitch(&[outer, inner].concat(), 0);
        assert!(matches!(result, Err(DecomposeError::MergeLimit { iterations: 0 })));
    }
}
