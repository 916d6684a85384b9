//! Declarative description of a whole airfoil section.
//!
//! ```toml
//! skin_material = "Aluminum"
//! skin_thickness = 0.002
//!
//! [profile]
//! kind = "naca"
//! code = "0015"
//! chord = 0.2
//! n_points = 120
//!
//! [[spars]]
//! x_chord = 0.3
//! thickness = 0.003
//! material = "Steel"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::geometry::Polygon;
use crate::io::read_to_string;
use crate::material::MaterialCatalog;
use crate::operations::assemble::{AirfoilAssembly, ShellAssembler};
use crate::operations::profile::{naca4, read_dat, resampled, scaled};
use crate::operations::spar::SparSpec;

/// Where the outer outline comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileConfig {
    /// Generated NACA 4-digit profile.
    Naca {
        code: String,
        chord: f64,
        n_points: usize,
    },
    /// Measured coordinates from a `.dat` file.
    Dat {
        path: PathBuf,
        #[serde(default)]
        chord: Option<f64>,
        #[serde(default)]
        n_per_surface: Option<usize>,
    },
}

impl ProfileConfig {
    /// Produces the outline.
    ///
    /// # Errors
    ///
    /// Returns the profile generator's or reader's error.
    pub fn outline(&self) -> Result<Polygon> {
        match self {
            Self::Naca {
                code,
                chord,
                n_points,
            } => naca4(code, *chord, *n_points),
            Self::Dat {
                path,
                chord,
                n_per_surface,
            } => {
                let mut outline = read_dat(path)?;
                if let Some(n) = n_per_surface {
                    outline = resampled(&outline, *n)?;
                }
                if let Some(chord) = chord {
                    outline = scaled(&outline, *chord)?;
                }
                Ok(outline)
            }
        }
    }
}

fn full_height() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparConfig {
    pub x_chord: f64,
    pub thickness: f64,
    /// Catalog name of the spar material.
    pub material: String,
    #[serde(default = "full_height")]
    pub height_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoutConfig {
    pub points: Vec<[f64; 2]>,
}

/// A complete section description, with materials referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub profile: ProfileConfig,
    pub skin_material: String,
    /// Hollow shell wall thickness; a solid section when absent.
    #[serde(default)]
    pub skin_thickness: Option<f64>,
    #[serde(default)]
    pub spars: Vec<SparConfig>,
    #[serde(default)]
    pub cutouts: Vec<CutoutConfig>,
}

impl SectionConfig {
    /// Parses a TOML description.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Toml` when the document does not match the schema.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text).map_err(CatalogError::from)?)
    }

    /// Parses a JSON description.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` when the document does not match the schema.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(CatalogError::from)?)
    }

    /// Loads a description by extension (`.json` or `.toml`).
    ///
    /// A relative `.dat` profile path is resolved against the directory of
    /// the configuration file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnsupportedFormat` for other extensions,
    /// `CatalogError::Io` when the file cannot be read, or a parse error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self> = match ext.as_deref() {
            Some("json") => Self::from_json,
            Some("toml") => Self::from_toml,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf()).into()),
        };
        let mut config = parse(&read_to_string(path)?)?;
        if let (ProfileConfig::Dat { path: dat, .. }, Some(dir)) =
            (&mut config.profile, path.parent())
        {
            if dat.is_relative() {
                *dat = dir.join(&*dat);
            }
        }
        debug!(path = %path.display(), spars = config.spars.len(), "loaded section config");
        Ok(config)
    }

    /// Resolves materials against `catalog` and assembles the section.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MaterialNotFound` for unknown material names,
    /// and any profile, offset, placement or assembly error.
    pub fn build(&self, catalog: &MaterialCatalog) -> Result<AirfoilAssembly> {
        let skin = catalog.get(&self.skin_material)?.clone();
        let mut assembler = ShellAssembler::new(self.profile.outline()?, skin);
        if let Some(thickness) = self.skin_thickness {
            assembler = assembler.with_skin_thickness(thickness)?;
        }
        for spar in &self.spars {
            let material = catalog.get(&spar.material)?.clone();
            assembler = assembler.add_spar(
                SparSpec::new(spar.x_chord, spar.thickness, material)
                    .with_height_fraction(spar.height_fraction),
            );
        }
        for cutout in &self.cutouts {
            let pairs: Vec<(f64, f64)> = cutout.points.iter().map(|&[x, y]| (x, y)).collect();
            assembler = assembler.add_cutout(Polygon::from_xy(&pairs)?);
        }
        assembler.assemble()
    }
}
