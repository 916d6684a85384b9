use crate::error::{GeometryError, Result};
use crate::geometry::{Rectangle, Section};
use crate::material::Material;
use crate::math::Point2;

use super::{require_positive, solid_rect};

/// Which side a C-beam opens towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Opening {
    /// Web on the left, flanges extend right.
    #[default]
    Right,
    /// Web on the right, flanges extend left.
    Left,
}

/// Flanged beam dimensions shared by the I and C shapes.
#[derive(Debug, Clone, Copy)]
struct BeamDims {
    height: f64,
    flange_width: f64,
    web_thickness: f64,
    flange_thickness: f64,
}

impl BeamDims {
    fn validate(&self) -> Result<()> {
        require_positive("height", self.height)?;
        require_positive("flange_width", self.flange_width)?;
        require_positive("web_thickness", self.web_thickness)?;
        require_positive("flange_thickness", self.flange_thickness)?;
        if 2.0 * self.flange_thickness >= self.height {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "flange_thickness",
                value: self.flange_thickness,
                min: 0.0,
                max: self.height / 2.0,
            }
            .into());
        }
        if self.web_thickness > self.flange_width {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "web_thickness",
                value: self.web_thickness,
                min: 0.0,
                max: self.flange_width,
            }
            .into());
        }
        Ok(())
    }

    /// Bottom flange, top flange and web, given the web's center x.
    fn parts(&self, center: Point2, web_x: f64) -> [Rectangle; 3] {
        let (h, b, tw, tf) = (
            self.height,
            self.flange_width,
            self.web_thickness,
            self.flange_thickness,
        );
        let flange_y = h / 2.0 - tf / 2.0;
        [
            Rectangle::new(Point2::new(center.x, center.y - flange_y), b, tf),
            Rectangle::new(Point2::new(center.x, center.y + flange_y), b, tf),
            Rectangle::new(Point2::new(web_x, center.y), tw, h - 2.0 * tf),
        ]
    }

    fn section(&self, parts: &[Rectangle; 3], material: &Material) -> Result<Section> {
        let regions = parts
            .iter()
            .map(|rect| solid_rect(rect, material))
            .collect::<Result<Vec<_>>>()?;
        Ok(Section::new(regions))
    }
}

/// Creates an I-beam section from two flanges and a centered web.
pub struct MakeIBeam {
    dims: BeamDims,
    center: Point2,
    material: Material,
}

impl MakeIBeam {
    /// Creates a new `MakeIBeam` operation.
    #[must_use]
    pub fn new(
        height: f64,
        flange_width: f64,
        web_thickness: f64,
        flange_thickness: f64,
        center: Point2,
        material: Material,
    ) -> Self {
        Self {
            dims: BeamDims {
                height,
                flange_width,
                web_thickness,
                flange_thickness,
            },
            center,
            material,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if a dimension is not
    /// positive, the flanges meet (`2 * flange_thickness >= height`) or the
    /// web is wider than the flanges.
    pub fn execute(&self) -> Result<Section> {
        self.dims.validate()?;
        let parts = self.dims.parts(self.center, self.center.x);
        self.dims.section(&parts, &self.material)
    }
}

/// Creates a C-beam (channel) section.
pub struct MakeCBeam {
    dims: BeamDims,
    center: Point2,
    opening: Opening,
    material: Material,
}

impl MakeCBeam {
    /// Creates a new `MakeCBeam` operation.
    #[must_use]
    pub fn new(
        height: f64,
        flange_width: f64,
        web_thickness: f64,
        flange_thickness: f64,
        center: Point2,
        material: Material,
    ) -> Self {
        Self {
            dims: BeamDims {
                height,
                flange_width,
                web_thickness,
                flange_thickness,
            },
            center,
            opening: Opening::Right,
            material,
        }
    }

    #[must_use]
    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.opening = opening;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MakeIBeam::execute`].
    pub fn execute(&self) -> Result<Section> {
        self.dims.validate()?;
        let offset = (self.dims.flange_width - self.dims.web_thickness) / 2.0;
        let web_x = match self.opening {
            Opening::Right => self.center.x - offset,
            Opening::Left => self.center.x + offset,
        };
        let parts = self.dims.parts(self.center, web_x);
        self.dims.section(&parts, &self.material)
    }
}
