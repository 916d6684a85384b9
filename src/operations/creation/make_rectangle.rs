use crate::error::Result;
use crate::geometry::{Rectangle, Section};
use crate::material::Material;
use crate::math::Point2;

use super::{require_positive, solid_rect};

/// Creates a solid rectangular section.
pub struct MakeRectangle {
    width: f64,
    height: f64,
    center: Point2,
    material: Material,
}

impl MakeRectangle {
    /// Creates a new `MakeRectangle` operation.
    #[must_use]
    pub fn new(width: f64, height: f64, center: Point2, material: Material) -> Self {
        Self {
            width,
            height,
            center,
            material,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for non-positive sizes.
    pub fn execute(&self) -> Result<Section> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        let rect = Rectangle::new(self.center, self.width, self.height);
        Ok(Section::new(vec![solid_rect(&rect, &self.material)?]))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn area_and_centroid() {
        let section = MakeRectangle::new(0.1, 0.02, Point2::new(1.0, -1.0), Material::steel())
            .execute()
            .unwrap();
        assert_eq!(section.len(), 1);
        assert_relative_eq!(section.material_area(), 0.002, epsilon = 1e-15);
        let c = section.regions()[0].centroid();
        assert_relative_eq!(c.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_width_rejected() {
        assert!(MakeRectangle::new(0.0, 1.0, Point2::origin(), Material::steel())
            .execute()
            .is_err());
    }
}
