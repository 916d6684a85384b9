use geo::Contains;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{dedup_ring, signed_area_2d};
use crate::math::{Point2, Vector2};

/// Rotational direction of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Positive signed area. Used for solid boundaries.
    CounterClockwise,
    /// Negative signed area. Used for holes.
    Clockwise,
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// The larger of width and height.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.width().max(self.height())
    }
}

/// A closed ring of points.
///
/// The first and last points always coincide. Every constructor enforces
/// this and rejects rings with fewer than 3 distinct vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point2>,
}

impl Polygon {
    /// Builds a closed ring from an open or closed vertex sequence.
    ///
    /// Consecutive duplicates are dropped and the ring is closed by appending
    /// the first point when the last one does not already coincide with it.
    /// Winding is preserved.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if a coordinate is not finite or
    /// fewer than 3 distinct vertices remain.
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Result<Self> {
        let raw: Vec<Point2> = points.into_iter().collect();
        if let Some(bad) = raw.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::Degenerate(format!(
                "non-finite coordinate ({}, {})",
                bad.x, bad.y
            ))
            .into());
        }
        let mut ring = dedup_ring(&raw);
        if ring.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "ring needs at least 3 distinct vertices, got {}",
                ring.len()
            ))
            .into());
        }
        ring.push(ring[0]);
        Ok(Self { points: ring })
    }

    /// Builds a closed ring from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// See [`Polygon::from_points`].
    pub fn from_xy(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::from_points(pairs.iter().map(|&(x, y)| Point2::new(x, y)))
    }

    /// The closed point sequence (last point repeats the first).
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// The distinct vertices, without the closing repeat.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.points[..self.points.len() - 1]
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len() - 1
    }

    #[must_use]
    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// Signed area: positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(self.vertices())
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn winding(&self) -> Winding {
        if self.signed_area() >= 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.winding() == Winding::CounterClockwise
    }

    /// Returns the ring with its vertex order reversed. The start point is kept.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Returns the ring with the requested winding, reversing if needed.
    #[must_use]
    pub fn with_winding(self, winding: Winding) -> Self {
        if self.winding() == winding {
            self
        } else {
            self.reversed()
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Aabb { min, max }
    }

    /// Area centroid of the ring. Falls back to the vertex average for
    /// rings with (near) zero area.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        let verts = self.vertices();
        let n = verts.len();
        let a = self.signed_area();
        if a.abs() < f64::EPSILON {
            let sum = verts
                .iter()
                .fold(Vector2::zeros(), |acc, p| acc + p.coords);
            #[allow(clippy::cast_precision_loss)]
            return Point2::from(sum / n as f64);
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let p = verts[i];
            let q = verts[(i + 1) % n];
            let cross = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        Point2::new(cx / (6.0 * a), cy / (6.0 * a))
    }

    /// Returns `true` when `p` lies strictly inside the ring.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        geo::Polygon::new(self.to_line_string(), vec![]).contains(&geo::Point::new(p.x, p.y))
    }

    /// Applies `f` to every vertex, keeping the closure invariant.
    ///
    /// # Errors
    ///
    /// Fails when the mapped ring degenerates.
    pub fn map_points(&self, f: impl Fn(&Point2) -> Point2) -> Result<Self> {
        Self::from_points(self.vertices().iter().map(f))
    }

    /// Converts the ring into a `geo` line string (closed).
    #[must_use]
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        geo::LineString::from(
            self.points
                .iter()
                .map(|p| geo::Coord { x: p.x, y: p.y })
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn unit_square() -> Polygon {
        Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn closes_open_input() {
        let sq = unit_square();
        assert_eq!(sq.points().len(), 5);
        assert_eq!(sq.first(), sq.last());
        assert_eq!(sq.vertex_count(), 4);
    }

    #[test]
    fn keeps_closed_input_closed_once() {
        let sq = Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).unwrap();
        assert_eq!(sq.points().len(), 4);
    }

    #[test]
    fn rejects_degenerate_rings() {
        assert!(Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0)]).is_err());
        assert!(Polygon::from_xy(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).is_err());
        assert!(Polygon::from_xy(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]).is_err());
    }

    #[test]
    fn winding_and_reversal() {
        let sq = unit_square();
        assert!(sq.is_ccw());
        let cw = sq.clone().with_winding(Winding::Clockwise);
        assert_eq!(cw.winding(), Winding::Clockwise);
        assert!((cw.signed_area() + 1.0).abs() < TOLERANCE);
        assert_eq!(cw.first(), cw.last());
    }

    #[test]
    fn centroid_of_rectangle() {
        let rect = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]).unwrap();
        let c = rect.centroid();
        assert!((c.x - 2.0).abs() < TOLERANCE);
        assert!((c.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn bounds_and_contains() {
        let sq = unit_square();
        let b = sq.bounds();
        assert!((b.width() - 1.0).abs() < TOLERANCE);
        assert!((b.max_extent() - 1.0).abs() < TOLERANCE);
        assert!(sq.contains(&Point2::new(0.5, 0.5)));
        assert!(!sq.contains(&Point2::new(1.5, 0.5)));
        assert!(!sq.contains(&Point2::new(1.0, 0.5)));
    }
}
