use crate::error::Result;
use crate::material::Material;
use crate::math::Point2;

use super::convert::to_geo_polygon;
use super::interior::interior_point;
use super::polygon::{Polygon, Winding};

/// What a region of a section represents.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionKind {
    /// Skin or library-shape material.
    Solid { material: Material },
    /// Spar material; `index` is the position of the originating spar spec.
    Spar { material: Material, index: usize },
    /// Enclosed empty cavity. Its control point is the hole point.
    Void,
}

impl RegionKind {
    /// The material of a solid kind, `None` for voids.
    #[must_use]
    pub fn material(&self) -> Option<&Material> {
        match self {
            Self::Solid { material } | Self::Spar { material, .. } => Some(material),
            Self::Void => None,
        }
    }

    /// Short label used in summaries and error messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Solid { .. } => "solid",
            Self::Spar { .. } => "spar",
            Self::Void => "void",
        }
    }

    /// `true` for kinds that carry material.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        !matches!(self, Self::Void)
    }
}

/// A polygon with holes, its kind and a point known to lie inside it.
///
/// The exterior is always counter-clockwise and every hole clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    kind: RegionKind,
    exterior: Polygon,
    holes: Vec<Polygon>,
    control_point: Point2,
}

impl Region {
    /// Builds a region, normalizing ring windings and locating its control point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if no interior point can be found.
    pub fn new(kind: RegionKind, exterior: Polygon, holes: Vec<Polygon>) -> Result<Self> {
        let exterior = exterior.with_winding(Winding::CounterClockwise);
        let holes: Vec<Polygon> = holes
            .into_iter()
            .map(|h| h.with_winding(Winding::Clockwise))
            .collect();
        let control_point = interior_point(&exterior, &holes)?;
        Ok(Self {
            kind,
            exterior,
            holes,
            control_point,
        })
    }

    #[must_use]
    pub fn kind(&self) -> &RegionKind {
        &self.kind
    }

    #[must_use]
    pub fn exterior(&self) -> &Polygon {
        &self.exterior
    }

    #[must_use]
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    /// A point strictly inside the exterior and outside all holes.
    #[must_use]
    pub fn control_point(&self) -> Point2 {
        self.control_point
    }

    #[must_use]
    pub fn material(&self) -> Option<&Material> {
        self.kind.material()
    }

    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }

    /// Exterior area minus hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.exterior.area() - self.holes.iter().map(Polygon::area).sum::<f64>()
    }

    /// Area centroid, accounting for holes.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        let mut weighted = self.exterior.centroid().coords * self.exterior.area();
        let mut total = self.exterior.area();
        for hole in &self.holes {
            weighted -= hole.centroid().coords * hole.area();
            total -= hole.area();
        }
        if total.abs() < f64::EPSILON {
            return self.exterior.centroid();
        }
        Point2::from(weighted / total)
    }

    #[must_use]
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        to_geo_polygon(&self.exterior, &self.holes)
    }
}

/// An ordered set of regions: material regions in build order, then voids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    regions: Vec<Region>,
}

impl Section {
    /// Builds a section, moving voids after all material regions while
    /// keeping relative order within each group.
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        let (mut ordered, voids): (Vec<Region>, Vec<Region>) =
            regions.into_iter().partition(Region::is_solid);
        ordered.extend(voids);
        Self { regions: ordered }
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions carrying material (solid and spar kinds).
    pub fn solids(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.is_solid())
    }

    pub fn spars(&self) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(|r| matches!(r.kind(), RegionKind::Spar { .. }))
    }

    pub fn voids(&self) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(|r| matches!(r.kind(), RegionKind::Void))
    }

    /// Total area of all material regions.
    #[must_use]
    pub fn material_area(&self) -> f64 {
        self.solids().map(Region::area).sum()
    }

    pub(crate) fn into_regions(self) -> Vec<Region> {
        self.regions
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, side: f64) -> Polygon {
        Polygon::from_xy(&[
            (x0, y0),
            (x0 + side, y0),
            (x0 + side, y0 + side),
            (x0, y0 + side),
        ])
        .unwrap()
    }

    fn steel() -> RegionKind {
        RegionKind::Solid {
            material: Material::steel(),
        }
    }

    #[test]
    fn windings_normalized() {
        let hole = square(1.0, 1.0, 2.0);
        assert!(hole.is_ccw());
        let region = Region::new(steel(), square(0.0, 0.0, 4.0).reversed(), vec![hole]).unwrap();
        assert!(region.exterior().is_ccw());
        assert!(region.holes().iter().all(|h| !h.is_ccw()));
        assert_relative_eq!(region.area(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn control_point_outside_hole() {
        let region =
            Region::new(steel(), square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 2.0)]).unwrap();
        let p = region.control_point();
        assert!(region.exterior().contains(&p));
        assert!(!region.holes()[0].contains(&p));
    }

    #[test]
    fn centroid_with_off_center_hole() {
        let region =
            Region::new(steel(), square(0.0, 0.0, 4.0), vec![square(2.0, 1.0, 2.0)]).unwrap();
        let c = region.centroid();
        // (16 * 2 - 4 * 3) / 12
        assert_relative_eq!(c.x, 20.0 / 12.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn section_orders_voids_last() {
        let void = Region::new(RegionKind::Void, square(5.0, 0.0, 1.0), vec![]).unwrap();
        let solid = Region::new(steel(), square(0.0, 0.0, 1.0), vec![]).unwrap();
        let spar = Region::new(
            RegionKind::Spar {
                material: Material::aluminum(),
                index: 0,
            },
            square(2.0, 0.0, 1.0),
            vec![],
        )
        .unwrap();
        let section = Section::new(vec![void, solid, spar]);
        let labels: Vec<&str> = section.regions().iter().map(|r| r.kind().label()).collect();
        assert_eq!(labels, vec!["solid", "spar", "void"]);
        assert_eq!(section.solids().count(), 2);
        assert_eq!(section.spars().count(), 1);
        assert_eq!(section.voids().count(), 1);
        assert_relative_eq!(section.material_area(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn kind_material_lookup() {
        assert_eq!(steel().material().map(Material::name), Some("Steel"));
        assert!(RegionKind::Void.material().is_none());
        assert!(!RegionKind::Void.is_solid());
    }
}
