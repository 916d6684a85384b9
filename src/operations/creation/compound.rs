use tracing::debug;

use crate::error::Result;
use crate::geometry::Section;
use crate::math::SLIVER_RATIO;
use crate::operations::assemble::check_disjoint;

/// Merges several sections into one compound section.
///
/// Regions keep their input order within the material and void groups.
/// Overlap is measured against the combined material area, so shared
/// edges between touching parts are accepted.
pub struct Compound {
    sections: Vec<Section>,
}

impl Compound {
    /// Creates a new `Compound` operation.
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::OverlappingRegions` when material regions
    /// from different parts overlap.
    pub fn execute(self) -> Result<Section> {
        let parts = self.sections.len();
        let regions: Vec<_> = self
            .sections
            .into_iter()
            .flat_map(Section::into_regions)
            .collect();
        let section = Section::new(regions);
        check_disjoint(section.regions(), section.material_area() * SLIVER_RATIO)?;
        debug!(parts, regions = section.len(), "combined sections");
        Ok(section)
    }
}

impl Section {
    /// Concatenates `sections` into one compound section.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::OverlappingRegions` when material regions overlap.
    pub fn combine(sections: impl IntoIterator<Item = Section>) -> Result<Section> {
        Compound::new(sections.into_iter().collect()).execute()
    }
}
