mod compound;
mod make_beam;
mod make_hollow;
mod make_rectangle;

pub use compound::Compound;
pub use make_beam::{MakeCBeam, MakeIBeam, Opening};
pub use make_hollow::{MakeHollowBox, MakeHollowCircle};
pub use make_rectangle::MakeRectangle;

use crate::error::{GeometryError, Result};
use crate::geometry::{Rectangle, Region, RegionKind};
use crate::material::Material;

/// Rejects non-positive or non-finite dimensions.
fn require_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter,
            value,
            min: f64::MIN_POSITIVE,
            max: f64::INFINITY,
        }
        .into())
    }
}

fn solid_rect(rect: &Rectangle, material: &Material) -> Result<Region> {
    Region::new(
        RegionKind::Solid {
            material: material.clone(),
        },
        rect.to_polygon()?,
        Vec::new(),
    )
}
