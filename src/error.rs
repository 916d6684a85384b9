use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for section construction.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while producing an airfoil outline.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid airfoil code {code:?}: {reason}")]
    InvalidAirfoilCode { code: String, reason: &'static str },

    #[error("malformed coordinate data: {reason}")]
    MalformedCoordinateData { reason: String },
}

/// Errors raised by offset, spar placement and assembly.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("inward offset by {distance} is infeasible: {reason}")]
    OffsetInfeasible { distance: f64, reason: String },

    #[error("spar probe at x = {x_chord} (thickness {thickness}) misses the outline")]
    SparMissesOutline { x_chord: f64, thickness: f64 },

    /// `found` counts distinct boundary crossings: of the probe line with
    /// the outline during placement, or of the spar sides with the inner
    /// wall during assembly. Two are required.
    #[error("spar at x = {x_chord} (thickness {thickness}) found {found} crossing(s), need 2")]
    DegenerateSparIntersection {
        x_chord: f64,
        thickness: f64,
        found: usize,
    },

    #[error("regions {first} and {second} overlap (area {overlap_area:e})")]
    OverlappingRegions {
        first: String,
        second: String,
        overlap_area: f64,
    },
}

/// Errors related to material catalogs and configuration files.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("material not found: {0}")]
    MaterialNotFound(String),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for results using [`SectionError`].
pub type Result<T> = std::result::Result<T, SectionError>;
