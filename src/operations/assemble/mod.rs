//! Combines an outline, an optional inner wall, spars and cutouts into a
//! set of non-overlapping regions.

mod validate;

pub(crate) use validate::check_disjoint;

use geo::{Area, MultiPolygon};
use tracing::{debug, info};

use crate::error::{GeometryError, OperationError, Result, SectionError};
use crate::export::PointFacetModel;
use crate::geometry::convert::to_geo_multi;
use crate::geometry::{Polygon, Rectangle, Region, RegionKind, Section, Winding};
use crate::material::Material;
use crate::math::distance_2d::point_to_ring_dist;
use crate::math::intersect_2d::vertical_line_hits;
use crate::math::{SLIVER_RATIO, TOLERANCE};
use crate::operations::boolean::{
    difference, drop_slivers, intersection, to_pieces, union, union_all,
};
use crate::operations::offset::PolygonOffset;
use crate::operations::spar::{SparPlacement, SparSpec};

/// Relative distance below which an empty piece counts as touching the outline.
const CONTACT_RATIO: f64 = 1e-9;

/// Builder for a hollow or solid airfoil section.
///
/// Inputs are collected first; [`ShellAssembler::assemble`] is a pure
/// function of them and can be called any number of times.
#[derive(Debug, Clone)]
pub struct ShellAssembler {
    outer: Polygon,
    skin_material: Material,
    inner: Option<Polygon>,
    spars: Vec<SparSpec>,
    cutouts: Vec<Polygon>,
}

impl ShellAssembler {
    /// Starts an assembly from the outer outline and the skin material.
    #[must_use]
    pub fn new(outer: Polygon, skin_material: Material) -> Self {
        Self {
            outer: outer.with_winding(Winding::CounterClockwise),
            skin_material,
            inner: None,
            spars: Vec::new(),
            cutouts: Vec::new(),
        }
    }

    /// Uses `inner` as the cavity wall.
    #[must_use]
    pub fn with_inner(mut self, inner: Polygon) -> Self {
        self.inner = Some(inner.with_winding(Winding::CounterClockwise));
        self
    }

    /// Derives the cavity wall by offsetting the outline inward by `thickness`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::OffsetInfeasible` from the offset.
    pub fn with_skin_thickness(self, thickness: f64) -> Result<Self> {
        let inner = PolygonOffset::new(self.outer.clone(), thickness).execute()?;
        Ok(self.with_inner(inner))
    }

    #[must_use]
    pub fn add_spar(mut self, spar: SparSpec) -> Self {
        self.spars.push(spar);
        self
    }

    /// Removes `cutout` from every material region.
    #[must_use]
    pub fn add_cutout(mut self, cutout: Polygon) -> Self {
        self.cutouts.push(cutout.with_winding(Winding::CounterClockwise));
        self
    }

    #[must_use]
    pub fn outer(&self) -> &Polygon {
        &self.outer
    }

    #[must_use]
    pub fn inner(&self) -> Option<&Polygon> {
        self.inner.as_ref()
    }

    /// Builds the region set.
    ///
    /// # Errors
    ///
    /// - `GeometryError::ParameterOutOfRange` for an invalid spar spec
    /// - `OperationError::SparMissesOutline` / `DegenerateSparIntersection`
    ///   when a spar cannot be located
    /// - `OperationError::DegenerateSparIntersection` when a spar does not
    ///   span the cavity across its full thickness, or when no spar material
    ///   survives clipping; `found` is the number of spar sides crossing the
    ///   inner wall
    /// - `OperationError::OverlappingRegions` when spars overlap each other
    ///   or the final regions violate the non-overlap invariant
    /// - `GeometryError::Degenerate` when the inner wall leaves the outline
    ///   or a region has no interior point
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(
            spars = self.spars.len(),
            cutouts = self.cutouts.len(),
            hollow = self.inner.is_some()
        )
    )]
    pub fn assemble(&self) -> Result<AirfoilAssembly> {
        let outer = &self.outer;
        let outer_area = outer.area();
        let min_area = outer_area * SLIVER_RATIO;

        let rects = self.locate_spars()?;
        check_rect_overlaps(&rects)?;
        let rect_rings = rects
            .iter()
            .map(Rectangle::to_polygon)
            .collect::<Result<Vec<_>>>()?;

        let outer_mp = to_geo_multi(outer);
        let cut_mp = union_all(&self.cutouts);
        let rects_mp = union_all(&rect_rings);
        let none = MultiPolygon::new(Vec::new());

        let (container, cavity, skin_removed) = match &self.inner {
            Some(inner) => {
                let inner_mp = to_geo_multi(inner);
                let leak = difference(&inner_mp, &outer_mp).unsigned_area();
                if leak > min_area {
                    return Err(GeometryError::Degenerate(format!(
                        "inner wall extends {leak:e} outside the outline"
                    ))
                    .into());
                }
                check_spars_span(inner, &rects)?;
                let cavity = difference(&difference(&inner_mp, &rects_mp), &cut_mp);
                let removed = union(&inner_mp, &cut_mp);
                (inner_mp, cavity, removed)
            }
            None => {
                let removed = union(&rects_mp, &cut_mp);
                (outer_mp.clone(), none, removed)
            }
        };

        let mut regions = Vec::new();

        let skin = drop_slivers(difference(&outer_mp, &skin_removed), min_area, "skin");
        for (exterior, holes) in to_pieces(&skin)? {
            regions.push(Region::new(
                RegionKind::Solid {
                    material: self.skin_material.clone(),
                },
                exterior,
                holes,
            )?);
        }

        for (index, ((spec, ring), rect)) in
            self.spars.iter().zip(&rect_rings).zip(&rects).enumerate()
        {
            let clipped = intersection(&to_geo_multi(ring), &container);
            let piece = drop_slivers(difference(&clipped, &cut_mp), min_area, "spar");
            let pieces = to_pieces(&piece)?;
            if pieces.is_empty() {
                return Err(spar_degenerate(rect, 0));
            }
            for (exterior, holes) in pieces {
                regions.push(Region::new(
                    RegionKind::Spar {
                        material: spec.material.clone(),
                        index,
                    },
                    exterior,
                    holes,
                )?);
            }
        }

        let empty = drop_slivers(
            intersection(&union(&cavity, &cut_mp), &outer_mp),
            min_area,
            "void",
        );
        let contact = TOLERANCE.max(outer.bounds().max_extent() * CONTACT_RATIO);
        for (exterior, holes) in to_pieces(&empty)? {
            let enclosed = exterior
                .vertices()
                .iter()
                .all(|p| point_to_ring_dist(p, outer.vertices()) > contact);
            if enclosed {
                regions.push(Region::new(RegionKind::Void, exterior, holes)?);
            } else {
                debug!(area = exterior.area(), "empty piece opens to the outside");
            }
        }

        check_disjoint(&regions, min_area)?;
        validate::check_spars(&regions, &outer_mp, &cavity, min_area)?;

        let section = Section::new(regions);
        info!(
            regions = section.len(),
            voids = section.voids().count(),
            material_area = section.material_area(),
            "assembled section"
        );

        Ok(AirfoilAssembly {
            outer: self.outer.clone(),
            void: self.inner.clone(),
            spars: self.spars.clone(),
            spar_rectangles: rects,
            section,
        })
    }

    /// Validates every spar spec and places it against the outer outline.
    fn locate_spars(&self) -> Result<Vec<Rectangle>> {
        let bounds = self.outer.bounds();
        let x_le = bounds.min.x;
        let chord = bounds.width();
        self.spars
            .iter()
            .map(|spec| {
                spec.validate()?;
                let x = x_le + spec.x_chord * chord;
                SparPlacement::new(x, spec.thickness, spec.height_fraction).locate(&self.outer)
            })
            .collect()
    }
}

/// Distinct heights at which `x = const` crosses `ring`.
fn crossing_count(ring: &Polygon, x: f64) -> usize {
    let mut ys = vertical_line_hits(ring.vertices(), x);
    ys.sort_by(f64::total_cmp);
    ys.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);
    ys.len()
}

fn spar_degenerate(rect: &Rectangle, found: usize) -> SectionError {
    OperationError::DegenerateSparIntersection {
        x_chord: rect.center.x,
        thickness: rect.width,
        found,
    }
    .into()
}

/// Every spar must span the cavity across its whole thickness: both
/// vertical sides have to cross the inner wall. A station inside the skin
/// band near the leading or trailing edge fails with the number of sides
/// that do.
fn check_spars_span(inner: &Polygon, rects: &[Rectangle]) -> Result<()> {
    for rect in rects {
        let spanning = [rect.min().x, rect.max().x]
            .into_iter()
            .filter(|&x| crossing_count(inner, x) >= 2)
            .count();
        if spanning < 2 {
            return Err(spar_degenerate(rect, spanning));
        }
    }
    Ok(())
}

fn check_rect_overlaps(rects: &[Rectangle]) -> Result<()> {
    for (i, a) in rects.iter().enumerate() {
        for (j, b) in rects.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                let (a0, a1, b0, b1) = (a.min(), a.max(), b.min(), b.max());
                let dx = a1.x.min(b1.x) - a0.x.max(b0.x);
                let dy = a1.y.min(b1.y) - a0.y.max(b0.y);
                return Err(OperationError::OverlappingRegions {
                    first: format!("spar {i}"),
                    second: format!("spar {j}"),
                    overlap_area: dx * dy,
                }
                .into());
            }
        }
    }
    Ok(())
}

/// The result of [`ShellAssembler::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct AirfoilAssembly {
    outer: Polygon,
    void: Option<Polygon>,
    spars: Vec<SparSpec>,
    spar_rectangles: Vec<Rectangle>,
    section: Section,
}

impl AirfoilAssembly {
    #[must_use]
    pub fn outer(&self) -> &Polygon {
        &self.outer
    }

    /// The inner wall, if the section is hollow.
    #[must_use]
    pub fn void(&self) -> Option<&Polygon> {
        self.void.as_ref()
    }

    #[must_use]
    pub fn spar_specs(&self) -> &[SparSpec] {
        &self.spars
    }

    /// Spar rectangles as located, before clipping.
    #[must_use]
    pub fn spar_rectangles(&self) -> &[Rectangle] {
        &self.spar_rectangles
    }

    #[must_use]
    pub fn section(&self) -> &Section {
        &self.section
    }

    #[must_use]
    pub fn into_section(self) -> Section {
        self.section
    }

    #[must_use]
    pub fn to_point_facet_form(&self) -> PointFacetModel {
        PointFacetModel::from_section(&self.section)
    }
}
