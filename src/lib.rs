pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
mod io;
pub mod material;
pub mod math;
pub mod operations;

pub use config::SectionConfig;
pub use error::{Result, SectionError};
pub use export::{to_point_facet_form, PointFacetModel};
pub use geometry::{Polygon, Region, RegionKind, Section};
pub use material::{Material, MaterialCatalog};
pub use operations::assemble::{AirfoilAssembly, ShellAssembler};
pub use operations::spar::SparSpec;
