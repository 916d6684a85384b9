//! Material properties attached to solid regions.
//!
//! Materials are plain immutable values. The analysis collaborator consumes
//! them alongside control points; nothing in this crate interprets the
//! numbers beyond deriving the shear modulus.

mod catalog;

pub use catalog::MaterialCatalog;

use serde::{Deserialize, Serialize};

/// An isotropic material.
///
/// Units are whatever the caller uses consistently (the presets use MPa and
/// kg/m³).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default = "default_name")]
    name: String,
    elastic_modulus: f64,
    #[serde(alias = "poisson_ratio")]
    poissons_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shear_modulus: Option<f64>,
    #[serde(default)]
    yield_strength: f64,
    #[serde(default)]
    density: f64,
    #[serde(default = "default_color")]
    color: String,
}

fn default_name() -> String {
    "UserMaterial".to_owned()
}

fn default_color() -> String {
    "grey".to_owned()
}

impl Material {
    /// Creates a material with zero density and yield strength and the default color.
    #[must_use]
    pub fn new(name: impl Into<String>, elastic_modulus: f64, poissons_ratio: f64) -> Self {
        Self {
            name: name.into(),
            elastic_modulus,
            poissons_ratio,
            shear_modulus: None,
            yield_strength: 0.0,
            density: 0.0,
            color: default_color(),
        }
    }

    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    #[must_use]
    pub fn with_yield_strength(mut self, yield_strength: f64) -> Self {
        self.yield_strength = yield_strength;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Overrides the shear modulus derived from `E` and `ν`.
    #[must_use]
    pub fn with_shear_modulus(mut self, shear_modulus: f64) -> Self {
        self.shear_modulus = Some(shear_modulus);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn elastic_modulus(&self) -> f64 {
        self.elastic_modulus
    }

    #[must_use]
    pub fn poissons_ratio(&self) -> f64 {
        self.poissons_ratio
    }

    /// Explicit shear modulus if one was given, else `E / (2 (1 + ν))`.
    #[must_use]
    pub fn shear_modulus(&self) -> f64 {
        self.shear_modulus
            .unwrap_or_else(|| self.elastic_modulus / (2.0 * (1.0 + self.poissons_ratio)))
    }

    #[must_use]
    pub fn yield_strength(&self) -> f64 {
        self.yield_strength
    }

    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// 6061-class aluminum.
    #[must_use]
    pub fn aluminum() -> Self {
        Self::new("Aluminum", 70e3, 0.33)
            .with_yield_strength(250.0)
            .with_density(2700.0)
            .with_color("lightgrey")
    }

    /// Structural steel.
    #[must_use]
    pub fn steel() -> Self {
        Self::new("Steel", 210e3, 0.3)
            .with_yield_strength(250.0)
            .with_density(7850.0)
            .with_color("grey")
    }

    /// Unidirectional carbon/epoxy, treated as isotropic.
    #[must_use]
    pub fn carbon_epoxy() -> Self {
        Self::new("CFRP (uni)", 140e3, 0.25)
            .with_yield_strength(1200.0)
            .with_density(1600.0)
            .with_color("black")
    }
}
