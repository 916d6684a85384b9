//! Point/facet boundary format consumed by the external mesher and
//! cross-section solver.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::geometry::{Polygon, RegionKind, Section};
use crate::io::write_string;
use crate::material::Material;

/// Flattened section boundary.
///
/// `materials` is parallel to `control_points`; `holes` carries one point
/// per enclosed void.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointFacetModel {
    pub points: Vec<[f64; 2]>,
    pub facets: Vec<[usize; 2]>,
    pub control_points: Vec<[f64; 2]>,
    pub holes: Vec<[f64; 2]>,
    pub materials: Vec<Material>,
}

impl PointFacetModel {
    /// Flattens every material region of `section`.
    ///
    /// Rings are emitted in section order, each exterior before its holes,
    /// without closing duplicates; every ring gets consecutive facets plus
    /// one closing facet back to its first point.
    #[must_use]
    pub fn from_section(section: &Section) -> Self {
        let mut model = Self::default();
        for region in section.regions() {
            match region.kind() {
                RegionKind::Solid { material } | RegionKind::Spar { material, .. } => {
                    model.push_ring(region.exterior());
                    for hole in region.holes() {
                        model.push_ring(hole);
                    }
                    let c = region.control_point();
                    model.control_points.push([c.x, c.y]);
                    model.materials.push(material.clone());
                }
                RegionKind::Void => {
                    let c = region.control_point();
                    model.holes.push([c.x, c.y]);
                }
            }
        }
        model
    }

    fn push_ring(&mut self, ring: &Polygon) {
        let start = self.points.len();
        let verts = ring.vertices();
        self.points.extend(verts.iter().map(|p| [p.x, p.y]));
        let n = verts.len();
        self.facets
            .extend((0..n).map(|k| [start + k, start + (k + 1) % n]));
    }

    /// Serializes the model as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(CatalogError::from)?)
    }

    /// Writes the model as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` when the file cannot be written.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_string(path, &self.to_json()?)?;
        info!(
            path = %path.display(),
            points = self.points.len(),
            facets = self.facets.len(),
            "exported point/facet model"
        );
        Ok(())
    }
}

impl Section {
    #[must_use]
    pub fn to_point_facet_form(&self) -> PointFacetModel {
        PointFacetModel::from_section(self)
    }
}

/// Flattens `section` into the point/facet boundary format.
#[must_use]
pub fn to_point_facet_form(section: &Section) -> PointFacetModel {
    PointFacetModel::from_section(section)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Rectangle, Region};
    use crate::math::Point2;
    use crate::operations::assemble::ShellAssembler;
    use crate::operations::profile::naca4;
    use crate::operations::spar::SparSpec;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Rectangle::from_corner(x, y, w, h).to_polygon().unwrap()
    }

    fn box_section() -> Section {
        let skin = Region::new(
            RegionKind::Solid {
                material: Material::aluminum(),
            },
            rect(0.0, 0.0, 4.0, 4.0),
            vec![rect(1.0, 1.0, 2.0, 2.0)],
        )
        .unwrap();
        let void = Region::new(RegionKind::Void, rect(1.0, 1.0, 2.0, 2.0), vec![]).unwrap();
        Section::new(vec![void, skin])
    }

    #[test]
    fn rings_and_closing_facets() {
        let model = box_section().to_point_facet_form();
        assert_eq!(model.points.len(), 8);
        assert_eq!(model.facets.len(), 8);
        assert_eq!(model.facets[3], [3, 0]);
        assert_eq!(model.facets[4], [4, 5]);
        assert_eq!(model.facets[7], [7, 4]);
        assert_eq!(model.control_points.len(), 1);
        assert_eq!(model.materials.len(), 1);
        assert_eq!(model.materials[0].name(), "Aluminum");
        assert_eq!(model.holes, vec![[2.0, 2.0]]);
    }

    #[test]
    fn control_point_avoids_hole() {
        let model = to_point_facet_form(&box_section());
        let [x, y] = model.control_points[0];
        assert!(!(x > 1.0 && x < 3.0 && y > 1.0 && y < 3.0));
    }

    #[test]
    fn spar_assembly_boundary() {
        let assembly = ShellAssembler::new(naca4("0015", 0.2, 120).unwrap(), Material::aluminum())
            .with_skin_thickness(0.002)
            .unwrap()
            .add_spar(SparSpec::new(0.3, 0.003, Material::steel()))
            .assemble()
            .unwrap();
        let model = assembly.to_point_facet_form();

        assert_eq!(model.holes.len(), assembly.section().voids().count());
        assert_eq!(model.holes.len(), 2);
        assert_eq!(model.control_points.len(), model.materials.len());
        assert_eq!(model.control_points.len(), 2);
        assert_eq!(model.materials[1].name(), "Steel");
        assert!(model.facets.iter().flatten().all(|&i| i < model.points.len()));

        let inner = assembly.void().unwrap();
        for &[x, y] in &model.holes {
            let p = Point2::new(x, y);
            assert!(inner.contains(&p), "hole point {p} outside the cavity");
            for rect in assembly.spar_rectangles() {
                let (lo, hi) = (rect.min(), rect.max());
                let in_rect = x >= lo.x && x <= hi.x && y >= lo.y && y <= hi.y;
                assert!(!in_rect, "hole point {p} inside a spar");
            }
            for solid in assembly.section().solids() {
                let in_solid =
                    solid.exterior().contains(&p) && !solid.holes().iter().any(|h| h.contains(&p));
                assert!(!in_solid, "hole point {p} inside material");
            }
        }
    }

    #[test]
    fn json_round_trip_and_file() {
        let model = box_section().to_point_facet_form();
        let json = model.to_json().unwrap();
        assert!(json.contains("\"control_points\""));
        let back: PointFacetModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("section.json");
        model.write_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, json);
    }
}
