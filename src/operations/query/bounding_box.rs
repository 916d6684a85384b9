use crate::error::{GeometryError, Result};
use crate::geometry::{Aabb, Section};
use crate::math::Point2;

/// Computes the axis-aligned bounding box of a section's material regions.
pub struct BoundingBox<'a> {
    section: &'a Section,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(section: &'a Section) -> Self {
        Self { section }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the section has no material region.
    pub fn execute(&self) -> Result<Aabb> {
        self.section
            .solids()
            .map(|r| r.exterior().bounds())
            .reduce(|a, b| Aabb {
                min: Point2::new(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
                max: Point2::new(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
            })
            .ok_or_else(|| {
                GeometryError::Degenerate("section has no material region".into()).into()
            })
    }
}
