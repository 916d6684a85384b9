use crate::error::Result;
use crate::math::{Point2, TOLERANCE};

use super::polygon::Polygon;

/// An axis-aligned rectangle described by its center and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub center: Point2,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    #[must_use]
    pub fn new(center: Point2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Builds a rectangle from its lower-left corner and size.
    #[must_use]
    pub fn from_corner(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            Point2::new(x + width * 0.5, y + height * 0.5),
            width,
            height,
        )
    }

    #[must_use]
    pub fn min(&self) -> Point2 {
        Point2::new(
            self.center.x - self.width * 0.5,
            self.center.y - self.height * 0.5,
        )
    }

    #[must_use]
    pub fn max(&self) -> Point2 {
        Point2::new(
            self.center.x + self.width * 0.5,
            self.center.y + self.height * 0.5,
        )
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns `true` when the two rectangles share a region of positive area.
    /// Touching edges do not count.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let (a0, a1) = (self.min(), self.max());
        let (b0, b1) = (other.min(), other.max());
        let dx = a1.x.min(b1.x) - a0.x.max(b0.x);
        let dy = a1.y.min(b1.y) - a0.y.max(b0.y);
        dx > TOLERANCE && dy > TOLERANCE
    }

    /// Converts to a counter-clockwise closed ring starting at the lower-left corner.
    ///
    /// # Errors
    ///
    /// Fails when width or height is zero.
    pub fn to_polygon(&self) -> Result<Polygon> {
        let lo = self.min();
        let hi = self.max();
        Polygon::from_points([
            lo,
            Point2::new(hi.x, lo.y),
            hi,
            Point2::new(lo.x, hi.y),
        ])
    }
}
