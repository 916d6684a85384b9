//! Rectangular spars spanning the cavity at a chordwise station.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeometryError, OperationError, Result, SectionError};
use crate::geometry::{Polygon, Rectangle};
use crate::material::Material;
use crate::math::intersect_2d::vertical_line_hits;
use crate::math::{Point2, TOLERANCE};

/// A spar request: where, how thick, what material, how tall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparSpec {
    /// Chordwise station as a fraction of chord, strictly inside `(0, 1)`.
    pub x_chord: f64,
    pub thickness: f64,
    pub material: Material,
    /// Fraction of the local outline height the spar spans, in `(0, 1]`.
    #[serde(default = "full_height")]
    pub height_fraction: f64,
}

fn full_height() -> f64 {
    1.0
}

impl SparSpec {
    /// Creates a full-height spar.
    #[must_use]
    pub fn new(x_chord: f64, thickness: f64, material: Material) -> Self {
        Self {
            x_chord,
            thickness,
            material,
            height_fraction: full_height(),
        }
    }

    #[must_use]
    pub fn with_height_fraction(mut self, height_fraction: f64) -> Self {
        self.height_fraction = height_fraction;
        self
    }

    /// Checks the ranges of all numeric fields.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.x_chord > 0.0 && self.x_chord < 1.0) {
            return Err(out_of_range("x_chord", self.x_chord, 0.0, 1.0));
        }
        check_placement(self.thickness, self.height_fraction)
    }
}

fn check_placement(thickness: f64, height_fraction: f64) -> Result<()> {
    if !(thickness.is_finite() && thickness > 0.0) {
        return Err(out_of_range(
            "thickness",
            thickness,
            f64::MIN_POSITIVE,
            f64::INFINITY,
        ));
    }
    if !(height_fraction > 0.0 && height_fraction <= 1.0) {
        return Err(out_of_range("height_fraction", height_fraction, 0.0, 1.0));
    }
    Ok(())
}

fn out_of_range(parameter: &'static str, value: f64, min: f64, max: f64) -> SectionError {
    GeometryError::ParameterOutOfRange {
        parameter,
        value,
        min,
        max,
    }
    .into()
}

/// Locates a spar rectangle from a vertical probe through an outline.
#[derive(Debug, Clone, Copy)]
pub struct SparPlacement {
    x: f64,
    thickness: f64,
    height_fraction: f64,
}

impl SparPlacement {
    /// Creates a placement at absolute station `x`.
    #[must_use]
    pub fn new(x: f64, thickness: f64, height_fraction: f64) -> Self {
        Self {
            x,
            thickness,
            height_fraction,
        }
    }

    /// Casts the probe `x = self.x` through `outline` and builds the spar
    /// rectangle between the lowest and highest crossings.
    ///
    /// The rectangle is centered on the midpoint of those crossings and is
    /// `height_fraction` of their distance tall.
    ///
    /// # Errors
    ///
    /// - `GeometryError::ParameterOutOfRange` for a bad thickness or height fraction
    /// - `OperationError::SparMissesOutline` when the probe meets no edge
    /// - `OperationError::DegenerateSparIntersection` when fewer than 2
    ///   distinct crossing heights exist
    pub fn locate(&self, outline: &Polygon) -> Result<Rectangle> {
        check_placement(self.thickness, self.height_fraction)?;

        let mut ys = vertical_line_hits(outline.vertices(), self.x);
        if ys.is_empty() {
            return Err(OperationError::SparMissesOutline {
                x_chord: self.x,
                thickness: self.thickness,
            }
            .into());
        }
        ys.sort_by(f64::total_cmp);
        ys.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);
        if ys.len() < 2 {
            return Err(OperationError::DegenerateSparIntersection {
                x_chord: self.x,
                thickness: self.thickness,
                found: ys.len(),
            }
            .into());
        }

        let y_bot = ys[0];
        let y_top = ys[ys.len() - 1];
        debug!(
            x = self.x,
            crossings = ys.len(),
            y_bot,
            y_top,
            "located spar"
        );
        Ok(Rectangle::new(
            Point2::new(self.x, 0.5 * (y_top + y_bot)),
            self.thickness,
            self.height_fraction * (y_top - y_bot),
        ))
    }
}

/// Locates a spar at absolute station `x` through `outline`.
///
/// # Errors
///
/// See [`SparPlacement::locate`].
pub fn locate(
    outline: &Polygon,
    x: f64,
    thickness: f64,
    height_fraction: f64,
) -> Result<Rectangle> {
    SparPlacement::new(x, thickness, height_fraction).locate(outline)
}
