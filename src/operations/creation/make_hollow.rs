use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::{Polygon, Rectangle, Section};
use crate::material::Material;
use crate::math::Point2;
use crate::operations::assemble::ShellAssembler;

use super::require_positive;

fn require_wall(wall: f64, max: f64) -> Result<()> {
    require_positive("wall", wall)?;
    if wall >= max {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "wall",
            value: wall,
            min: 0.0,
            max,
        }
        .into());
    }
    Ok(())
}

fn hollow(outer: Polygon, wall: f64, material: Material) -> Result<Section> {
    Ok(ShellAssembler::new(outer, material)
        .with_skin_thickness(wall)?
        .assemble()?
        .into_section())
}

/// Creates a thin-walled rectangular tube.
pub struct MakeHollowBox {
    width: f64,
    height: f64,
    wall: f64,
    center: Point2,
    material: Material,
}

impl MakeHollowBox {
    /// Creates a new `MakeHollowBox` operation.
    #[must_use]
    pub fn new(width: f64, height: f64, wall: f64, center: Point2, material: Material) -> Self {
        Self {
            width,
            height,
            wall,
            center,
            material,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for non-positive sizes or
    /// a wall that closes the tube, and `OperationError::OffsetInfeasible`
    /// from the inward offset.
    pub fn execute(&self) -> Result<Section> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_wall(self.wall, self.width.min(self.height) / 2.0)?;
        let outer = Rectangle::new(self.center, self.width, self.height).to_polygon()?;
        hollow(outer, self.wall, self.material.clone())
    }
}

/// Creates a thin-walled circular tube approximated by a regular polygon.
pub struct MakeHollowCircle {
    radius: f64,
    wall: f64,
    segments: usize,
    center: Point2,
    material: Material,
}

impl MakeHollowCircle {
    /// Creates a new `MakeHollowCircle` operation.
    #[must_use]
    pub fn new(
        radius: f64,
        wall: f64,
        segments: usize,
        center: Point2,
        material: Material,
    ) -> Self {
        Self {
            radius,
            wall,
            segments,
            center,
            material,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for a non-positive radius,
    /// fewer than three segments or a wall not thinner than the radius, and
    /// `OperationError::OffsetInfeasible` from the inward offset.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<Section> {
        require_positive("radius", self.radius)?;
        if self.segments < 3 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "segments",
                value: self.segments as f64,
                min: 3.0,
                max: f64::INFINITY,
            }
            .into());
        }
        require_wall(self.wall, self.radius)?;

        let step = TAU / self.segments as f64;
        let outer = Polygon::from_points((0..self.segments).map(|i| {
            let theta = step * i as f64;
            Point2::new(
                self.center.x + self.radius * theta.cos(),
                self.center.y + self.radius * theta.sin(),
            )
        }))?;
        hollow(outer, self.wall, self.material.clone())
    }
}
