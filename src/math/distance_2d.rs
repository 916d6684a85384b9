use super::Point2;

/// Returns the minimum distance from point `p` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Returns the minimum distance from `p` to any edge of a ring.
///
/// The ring may be open or explicitly closed. Returns `f64::INFINITY` for
/// rings with fewer than 2 points.
#[must_use]
pub fn point_to_ring_dist(p: &Point2, ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 2 {
        return f64::INFINITY;
    }
    (0..n)
        .map(|i| point_to_segment_dist(p, &ring[i], &ring[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// Minimum distance between two non-crossing rings.
///
/// For rings that do not intersect, the closest pair always involves a
/// vertex of one ring, so checking vertices against edges both ways is exact.
#[must_use]
pub fn ring_to_ring_dist(a: &[Point2], b: &[Point2]) -> f64 {
    let a_to_b = a
        .iter()
        .map(|p| point_to_ring_dist(p, b))
        .fold(f64::INFINITY, f64::min);
    let b_to_a = b
        .iter()
        .map(|p| point_to_ring_dist(p, a))
        .fold(f64::INFINITY, f64::min);
    a_to_b.min(b_to_a)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        let d = point_to_segment_dist(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn ring_dist_includes_closing_edge() {
        let tri = [p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)];
        // Closest edge is the closing edge (0,2)→(0,0).
        let d = point_to_ring_dist(&p(-0.5, 1.0), &tri);
        assert!((d - 0.5).abs() < TOL, "d={d}");
    }

    #[test]
    fn nested_squares_distance() {
        let outer = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        let inner = [p(1.0, 1.0), p(3.0, 1.0), p(3.0, 3.0), p(1.0, 3.0)];
        let d = ring_to_ring_dist(&outer, &inner);
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }
}
