use geo::{Centroid, Contains};

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::horizontal_line_crossings;
use crate::math::Point2;

use super::convert::to_geo_polygon;
use super::polygon::Polygon;

/// Deepest bisection level of the scanline search (1/2, 1/4, ... 1/64).
const MAX_PROBE_LEVEL: u32 = 6;

/// Finds a point strictly inside `exterior` and outside every hole.
///
/// The area centroid is used when it qualifies. Otherwise horizontal probe
/// lines are cast at fractions of the bounding-box height (1/2, 1/4, 3/4,
/// 1/8, ...) and the midpoint of the widest interior span is taken.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` when no probe finds an interior span.
pub fn interior_point(exterior: &Polygon, holes: &[Polygon]) -> Result<Point2> {
    let shape = to_geo_polygon(exterior, holes);

    if let Some(c) = shape.centroid() {
        if shape.contains(&c) {
            return Ok(Point2::new(c.x(), c.y()));
        }
    }

    let bounds = exterior.bounds();
    let height = bounds.height();
    for level in 1..=MAX_PROBE_LEVEL {
        let denom = f64::from(1_u32 << level);
        for k in (1..(1_u32 << level)).step_by(2) {
            let y = bounds.min.y + height * f64::from(k) / denom;
            if let Some(p) = widest_span_midpoint(exterior, holes, y) {
                if shape.contains(&geo::Point::new(p.x, p.y)) {
                    return Ok(p);
                }
            }
        }
    }

    Err(GeometryError::Degenerate(format!(
        "no interior point found for ring with {} vertices and {} hole(s)",
        exterior.vertex_count(),
        holes.len()
    ))
    .into())
}

fn widest_span_midpoint(exterior: &Polygon, holes: &[Polygon], y: f64) -> Option<Point2> {
    let mut xs = horizontal_line_crossings(exterior.vertices(), y);
    for hole in holes {
        xs.extend(horizontal_line_crossings(hole.vertices(), y));
    }
    xs.sort_by(f64::total_cmp);

    xs.chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(a, b)| b - a > 0.0)
        .max_by(|(a0, b0), (a1, b1)| (b0 - a0).total_cmp(&(b1 - a1)))
        .map(|(a, b)| Point2::new(0.5 * (a + b), y))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn convex_uses_centroid() {
        let sq = Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]).unwrap();
        let p = interior_point(&sq, &[]).unwrap();
        assert!((p.x - 1.0).abs() < TOLERANCE);
        assert!((p.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn annulus_avoids_hole() {
        let outer = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
        let hole = Polygon::from_xy(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]).unwrap();
        let p = interior_point(&outer, std::slice::from_ref(&hole)).unwrap();
        assert!(outer.contains(&p));
        assert!(!hole.contains(&p));
        assert!(!(p.x > 1.0 && p.x < 3.0 && p.y > 1.0 && p.y < 3.0));
    }

    #[test]
    fn c_shape_centroid_outside() {
        // Opening on the right; the centroid falls in the notch.
        let c = Polygon::from_xy(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 0.2),
            (0.2, 0.2),
            (0.2, 2.8),
            (3.0, 2.8),
            (3.0, 3.0),
            (0.0, 3.0),
        ])
        .unwrap();
        let p = interior_point(&c, &[]).unwrap();
        assert!(c.contains(&p), "p = {p:?}");
    }
}
