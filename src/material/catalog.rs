use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::Material;
use crate::error::{CatalogError, Result};
use crate::io::read_to_string;

/// On-disk layout: `{"materials": [...]}` / `[[materials]]`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    materials: Vec<Material>,
}

/// Name → material lookup table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialCatalog {
    materials: BTreeMap<String, Material>,
}

impl MaterialCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the built-in presets (aluminum, steel, CFRP).
    #[must_use]
    pub fn with_presets() -> Self {
        let mut catalog = Self::new();
        catalog.insert(Material::aluminum());
        catalog.insert(Material::steel());
        catalog.insert(Material::carbon_epoxy());
        catalog
    }

    /// Inserts a material, replacing any existing entry with the same name.
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name().to_owned(), material);
    }

    /// Looks a material up by name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MaterialNotFound` for unknown names.
    pub fn get(&self, name: &str) -> Result<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| CatalogError::MaterialNotFound(name.to_owned()).into())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Parses a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` when the document does not match the schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).map_err(CatalogError::from)?;
        Ok(Self::from_entries(file.materials))
    }

    /// Parses a TOML catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Toml` when the document does not match the schema.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text).map_err(CatalogError::from)?;
        Ok(Self::from_entries(file.materials))
    }

    /// Loads a catalog file, choosing the format from its extension
    /// (`.json` or `.toml`).
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
        let catalog = parse(&read_to_string(path)?)?;
        debug!(path = %path.display(), count = catalog.len(), "loaded material catalog");
        Ok(catalog)
    }

    fn from_entries(entries: Vec<Material>) -> Self {
        let mut catalog = Self::new();
        for material in entries {
            catalog.insert(material);
        }
        catalog
    }
}
