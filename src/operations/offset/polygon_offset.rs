use tracing::debug;

use crate::error::{OperationError, Result, SectionError};
use crate::geometry::{Polygon, Winding};
use crate::math::distance_2d::point_to_ring_dist;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at, segment_segment_intersect_2d};
use crate::math::polygon_2d::{
    clean_ring, left_normal, rotate_to_canonical_start, segment_direction, signed_area_2d,
};
use crate::math::{Point2, Vector2, TOLERANCE};

/// When `cos(angle between consecutive segments) < this`, use a flat cap
/// instead of a miter join. Only for near-180° reversals (> ~169°).
const FLAT_CAP_COS: f64 = -0.98;

/// Maximum miter distance as a multiple of `distance`. When the miter
/// extends further than this, a bevel (two points) is used instead.
const MITER_LIMIT: f64 = 4.0;

/// Offsets larger than `extent / FEASIBILITY_DIVISOR` are rejected up front.
const FEASIBILITY_DIVISOR: f64 = 3.0;

/// Loops smaller than this fraction of the input area are folding debris.
const MIN_LOOP_RATIO: f64 = 1e-6;

/// Shrinks a closed ring inward by a constant wall thickness.
///
/// # Algorithm
///
/// 1. **Phase A**: Offset each edge along its inward normal.
/// 2. **Phase B**: Join consecutive offset edges with a miter, a bevel when
///    the miter exceeds `MITER_LIMIT * distance`, or a flat cap at near
///    reversals.
/// 3. **Phase C**: Split the raw ring at self-intersections and keep the
///    loops that wind like the input. Exactly one must survive.
///
/// The result is counter-clockwise whatever the input orientation.
#[derive(Debug)]
pub struct PolygonOffset {
    polygon: Polygon,
    distance: f64,
}

impl PolygonOffset {
    /// Creates a new inward offset operation.
    #[must_use]
    pub fn new(polygon: Polygon, distance: f64) -> Self {
        Self { polygon, distance }
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::OffsetInfeasible` when the distance is not a
    /// positive finite number, is at least a third of the larger bounding-box
    /// extent, or when the offset collapses or splits into several pieces.
    pub fn execute(&self) -> Result<Polygon> {
        let d = self.distance;
        if !(d.is_finite() && d > 0.0) {
            return Err(self.infeasible("distance must be positive and finite"));
        }
        let extent = self.polygon.bounds().max_extent();
        if d >= extent / FEASIBILITY_DIVISOR {
            return Err(self.infeasible(format!(
                "distance is not below a third of the outline extent {extent}"
            )));
        }

        // CCW input: the left normal points inward.
        let ccw = self.polygon.clone().with_winding(Winding::CounterClockwise);
        let input_area = ccw.signed_area();
        let raw = build_offset_ring(ccw.vertices(), d)?;
        debug!(
            input_vertices = ccw.vertex_count(),
            raw_vertices = raw.len(),
            "built raw offset ring"
        );

        let min_area = (input_area * MIN_LOOP_RATIO).max(TOLERANCE * TOLERANCE);
        let mut loops = Vec::new();
        collect_loops(&raw, min_area, &mut loops);
        debug!(loops = loops.len(), "trimmed offset loops");

        let ring = match loops.len() {
            0 => return Err(self.infeasible("no loop survives trimming")),
            1 => loops.swap_remove(0),
            n => {
                return Err(self.infeasible(format!(
                    "offset splits into {n} disjoint pieces"
                )))
            }
        };

        let area = signed_area_2d(&ring);
        if area <= 0.0 {
            return Err(self.infeasible(format!("offset ring has non-positive area {area}")));
        }
        if area >= input_area {
            return Err(self.infeasible("offset passed through the interior"));
        }
        // An inverted offset keeps its winding but comes closer than `d`.
        let min_gap = d * (1.0 - 1e-9) - TOLERANCE;
        if let Some(p) = ring
            .iter()
            .find(|p| point_to_ring_dist(p, ccw.vertices()) < min_gap)
        {
            return Err(self.infeasible(format!(
                "offset vertex ({}, {}) lies closer than the wall thickness",
                p.x, p.y
            )));
        }

        let canonical = rotate_to_canonical_start(&ring);
        Polygon::from_points(canonical).map_err(|err| self.infeasible(err.to_string()))
    }

    fn infeasible(&self, reason: impl Into<String>) -> SectionError {
        OperationError::OffsetInfeasible {
            distance: self.distance,
            reason: reason.into(),
        }
        .into()
    }
}

/// Offsets `polygon` inward by `distance`.
///
/// # Errors
///
/// See [`PolygonOffset::execute`].
pub fn offset_inward(polygon: &Polygon, distance: f64) -> Result<Polygon> {
    PolygonOffset::new(polygon.clone(), distance).execute()
}

/// Phase A + B for an open vertex list of a counter-clockwise ring.
fn build_offset_ring(points: &[Point2], distance: f64) -> Result<Vec<Point2>> {
    let n = points.len();

    let mut offset_segments: Vec<(Point2, Point2)> = Vec::with_capacity(n);
    let mut directions: Vec<Vector2> = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        let dir = segment_direction(&points[i], &points[j])?;
        let offset = left_normal(dir) * distance;
        offset_segments.push((points[i] + offset, points[j] + offset));
        directions.push(dir);
    }

    let mut raw = Vec::with_capacity(n * 2);
    for i in 0..n {
        let prev = if i == 0 { n - 1 } else { i - 1 };
        push_corner(
            &mut raw,
            &offset_segments[prev],
            &offset_segments[i],
            &directions[prev],
            &directions[i],
            &points[i],
            distance,
        );
    }
    Ok(raw)
}

/// Pushes the join between two consecutive offset edges.
///
/// - Near-antiparallel edges: flat cap (two points).
/// - Miter exceeding `MITER_LIMIT`: bevel (two points).
/// - Otherwise: the single miter point.
fn push_corner(
    raw: &mut Vec<Point2>,
    seg_prev: &(Point2, Point2),
    seg_next: &(Point2, Point2),
    dir_prev: &Vector2,
    dir_next: &Vector2,
    original_corner: &Point2,
    distance: f64,
) {
    if dir_prev.dot(dir_next) < FLAT_CAP_COS {
        raw.push(seg_prev.1);
        raw.push(seg_next.0);
        return;
    }

    let corner = intersect_offset_lines(seg_prev, seg_next, original_corner, distance);
    let limit = MITER_LIMIT * distance;
    if (corner - original_corner).norm_squared() > limit * limit {
        raw.push(seg_prev.1);
        raw.push(seg_next.0);
    } else {
        raw.push(corner);
    }
}

/// Intersects two offset lines. Parallel lines fall back to shifting the
/// original corner along the shared normal.
fn intersect_offset_lines(
    seg_prev: &(Point2, Point2),
    seg_next: &(Point2, Point2),
    original_corner: &Point2,
    distance: f64,
) -> Point2 {
    let d_prev = seg_prev.1 - seg_prev.0;
    let d_next = seg_next.1 - seg_next.0;
    if let Some((t, _)) = line_line_intersect_2d(&seg_prev.1, &d_prev, &seg_next.0, &d_next) {
        point_at(&seg_prev.1, &d_prev, t)
    } else {
        let normal = left_normal(
            d_prev
                .try_normalize(TOLERANCE)
                .unwrap_or_else(|| Vector2::new(1.0, 0.0)),
        );
        original_corner + normal * distance
    }
}

fn are_adjacent(i: usize, j: usize, n: usize) -> bool {
    let diff = i.abs_diff(j);
    diff == 1 || diff == n - 1
}

/// Finds the first crossing between non-adjacent edges of a ring.
///
/// Endpoint-to-endpoint touches are skipped; only crossings with at least
/// one parameter strictly inside its edge are reported.
fn find_first_self_intersection(points: &[Point2]) -> Option<(usize, usize, Point2)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    let eps = TOLERANCE * 100.0;
    for i in 0..n {
        let i_next = (i + 1) % n;
        for j in (i + 2)..n {
            if are_adjacent(i, j, n) {
                continue;
            }
            let j_next = (j + 1) % n;
            if let Some((pt, t, u)) = segment_segment_intersect_2d(
                &points[i],
                &points[i_next],
                &points[j],
                &points[j_next],
            ) {
                let t_at_end = t < eps || t > 1.0 - eps;
                let u_at_end = u < eps || u > 1.0 - eps;
                if t_at_end && u_at_end {
                    continue;
                }
                return Some((i, j, pt));
            }
        }
    }
    None
}

/// Splits a ring at the crossing of edges `seg_i < seg_j` into
/// `[x, P(i+1) .. P(j)]` and `[x, P(j+1) .. P(i)]`.
fn split_at_intersection(
    points: &[Point2],
    seg_i: usize,
    seg_j: usize,
    intersection: Point2,
) -> (Vec<Point2>, Vec<Point2>) {
    let n = points.len();

    let mut a = Vec::with_capacity(seg_j - seg_i + 1);
    a.push(intersection);
    a.extend_from_slice(&points[(seg_i + 1)..=seg_j]);

    let mut b = Vec::with_capacity(n - (seg_j - seg_i) + 1);
    b.push(intersection);
    let mut idx = (seg_j + 1) % n;
    loop {
        b.push(points[idx]);
        if idx == seg_i {
            break;
        }
        idx = (idx + 1) % n;
    }
    (a, b)
}

/// Recursively splits a ring at self-intersections and collects every
/// counter-clockwise loop whose area exceeds `min_area`.
///
/// Loops winding the other way are collapsed features and are dropped.
/// Each split strictly reduces the vertex count, so recursion terminates.
fn collect_loops(points: &[Point2], min_area: f64, out: &mut Vec<Vec<Point2>>) {
    let pts = clean_ring(points);
    if pts.len() < 3 {
        return;
    }
    match find_first_self_intersection(&pts) {
        None => {
            let area = signed_area_2d(&pts);
            if area > min_area {
                out.push(pts);
            } else if area > 0.0 {
                debug!(area, "dropping offset debris loop");
            }
        }
        Some((i, j, pt)) => {
            let (a, b) = split_at_intersection(&pts, i, j, pt);
            collect_loops(&a, min_area, out);
            collect_loops(&b, min_area, out);
        }
    }
}
