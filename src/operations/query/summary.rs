use serde::Serialize;

use crate::geometry::{Region, Section};

/// Plain per-region properties for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    /// Position in the section's region list.
    pub index: usize,
    /// `"solid"`, `"spar"` or `"void"`.
    pub kind: &'static str,
    pub material: Option<String>,
    /// Exterior area minus hole areas.
    pub area: f64,
    pub centroid: [f64; 2],
}

impl RegionSummary {
    fn of(index: usize, region: &Region) -> Self {
        let c = region.centroid();
        Self {
            index,
            kind: region.kind().label(),
            material: region.material().map(|m| m.name().to_owned()),
            area: region.area(),
            centroid: [c.x, c.y],
        }
    }
}

/// Summarizes every region of a section.
pub struct Summarize<'a> {
    section: &'a Section,
}

impl<'a> Summarize<'a> {
    /// Creates a new `Summarize` query.
    #[must_use]
    pub fn new(section: &'a Section) -> Self {
        Self { section }
    }

    /// Executes the query, one entry per region in section order.
    #[must_use]
    pub fn execute(&self) -> Vec<RegionSummary> {
        self.section
            .regions()
            .iter()
            .enumerate()
            .map(|(i, r)| RegionSummary::of(i, r))
            .collect()
    }
}

impl Section {
    #[must_use]
    pub fn summary(&self) -> Vec<RegionSummary> {
        Summarize::new(self).execute()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Polygon, Rectangle, RegionKind};
    use crate::material::Material;
    use approx::assert_relative_eq;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Rectangle::from_corner(x, y, w, h).to_polygon().unwrap()
    }

    fn tube() -> Section {
        let skin = Region::new(
            RegionKind::Solid {
                material: Material::carbon_epoxy(),
            },
            rect(0.0, 0.0, 4.0, 2.0),
            vec![rect(1.0, 0.5, 2.0, 1.0)],
        )
        .unwrap();
        let void = Region::new(RegionKind::Void, rect(1.0, 0.5, 2.0, 1.0), vec![]).unwrap();
        Section::new(vec![void, skin])
    }

    #[test]
    fn one_entry_per_region() {
        let summary = tube().summary();
        assert_eq!(summary.len(), 2);

        let skin = &summary[0];
        assert_eq!(skin.index, 0);
        assert_eq!(skin.kind, "solid");
        assert_eq!(skin.material.as_deref(), Some("CFRP (uni)"));
        assert_relative_eq!(skin.area, 6.0, epsilon = 1e-12);
        assert_relative_eq!(skin.centroid[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(skin.centroid[1], 1.0, epsilon = 1e-12);

        let void = &summary[1];
        assert_eq!(void.kind, "void");
        assert_eq!(void.material, None);
        assert_relative_eq!(void.area, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn serializes_as_plain_data() {
        let json = serde_json::to_string(&tube().summary()).unwrap();
        assert!(json.contains("\"kind\":\"void\""));
        assert!(json.contains("\"material\":null"));
    }
}
