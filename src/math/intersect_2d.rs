use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE * TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel segments never intersect here, even when collinear.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE * TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((point_at(a0, &da, t_clamped), t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

/// Collects the y-values where the vertical line `x = x_probe` meets the
/// edges of a ring.
///
/// Every contact is reported: proper crossings, vertices lying on the line,
/// and both ends of edges lying along it. The result is unsorted and may
/// contain repeats.
#[must_use]
pub fn vertical_line_hits(ring: &[Point2], x_probe: f64) -> Vec<f64> {
    let n = ring.len();
    let mut hits = Vec::new();
    if n < 2 {
        return hits;
    }
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let da = a.x - x_probe;
        let db = b.x - x_probe;
        let a_on = da.abs() < TOLERANCE;
        let b_on = db.abs() < TOLERANCE;
        if a_on && b_on {
            hits.push(a.y);
            hits.push(b.y);
        } else if a_on {
            hits.push(a.y);
        } else if b_on {
            hits.push(b.y);
        } else if da * db < 0.0 {
            let t = da / (da - db);
            hits.push(a.y + t * (b.y - a.y));
        }
    }
    hits
}

/// Collects the x-values where the horizontal line `y = y_probe` crosses the
/// edges of a ring, using the half-open rule so that the count is even for
/// every closed ring.
#[must_use]
pub fn horizontal_line_crossings(ring: &[Point2], y_probe: f64) -> Vec<f64> {
    let n = ring.len();
    let mut xs = Vec::new();
    if n < 2 {
        return xs;
    }
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > y_probe) != (b.y > y_probe) {
            let t = (y_probe - a.y) / (b.y - a.y);
            xs.push(a.x + t * (b.x - a.x));
        }
    }
    xs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, -1.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        ]
    }

    #[test]
    fn line_line_crossing() {
        let (t, u) = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(2.0, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap_or((f64::NAN, f64::NAN));
        assert!((t - 2.0).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel() {
        assert!(line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Vector2::new(2.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn segments_cross() {
        let hit = segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 2.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(2.0, 0.0),
        );
        let (pt, t, u) = hit.unwrap_or((Point2::origin(), -1.0, -1.0));
        assert!((pt.x - 1.0).abs() < TOLERANCE && (pt.y - 1.0).abs() < TOLERANCE);
        assert!((t - 0.5).abs() < TOLERANCE && (u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segments_miss() {
        assert!(segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, -1.0),
            &Point2::new(2.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn vertical_hits_through_middle() {
        let mut hits = vertical_line_hits(&diamond(), 1.5);
        hits.sort_by(f64::total_cmp);
        assert_eq!(hits.len(), 2);
        assert!((hits[0] + 0.5).abs() < TOLERANCE);
        assert!((hits[1] - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn vertical_hits_tangent_vertex() {
        let hits = vertical_line_hits(&diamond(), 0.0);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|y| y.abs() < TOLERANCE));
    }

    #[test]
    fn vertical_hits_outside() {
        assert!(vertical_line_hits(&diamond(), 3.0).is_empty());
    }

    #[test]
    fn horizontal_crossings_even() {
        let xs = horizontal_line_crossings(&diamond(), 0.0);
        assert_eq!(xs.len() % 2, 0);
        let xs = horizontal_line_crossings(&diamond(), 0.25);
        assert_eq!(xs.len(), 2);
    }
}
