//! Polygon booleans over `geo` multipolygons.
//!
//! Every operation works on `MultiPolygon` operands so disjoint results and
//! holes come back in one value.

use geo::orient::Direction;
use geo::{Area, BooleanOps, MultiPolygon, Orient};
use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::convert::{from_geo_polygon, to_geo_multi};
use crate::geometry::Polygon;

/// Union of any number of rings. Overlapping rings merge.
#[must_use]
pub fn union_all(rings: &[Polygon]) -> MultiPolygon<f64> {
    rings
        .iter()
        .fold(MultiPolygon::new(Vec::new()), |acc, ring| {
            acc.union(&to_geo_multi(ring))
        })
}

#[must_use]
pub fn union(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    a.union(b)
}

#[must_use]
pub fn difference(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    a.difference(b)
}

#[must_use]
pub fn intersection(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    a.intersection(b)
}

/// Area shared by two shapes.
#[must_use]
pub fn overlap_area(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> f64 {
    a.intersection(b).unsigned_area()
}

/// Drops pieces whose area does not exceed `min_area` and orients the rest
/// (exteriors counter-clockwise, holes clockwise).
///
/// Holes below `min_area` are removed from their pieces as well.
#[must_use]
pub fn drop_slivers(shape: MultiPolygon<f64>, min_area: f64, context: &str) -> MultiPolygon<f64> {
    let mut kept = Vec::with_capacity(shape.0.len());
    for piece in shape {
        let area = piece.unsigned_area();
        if area <= min_area {
            warn!(context, area, "dropping sliver piece");
            continue;
        }
        let (exterior, interiors) = piece.into_inner();
        let interiors: Vec<_> = interiors
            .into_iter()
            .filter(|ring| {
                let hole_area = geo::Polygon::new(ring.clone(), vec![]).unsigned_area();
                if hole_area <= min_area {
                    warn!(context, area = hole_area, "dropping sliver hole");
                    false
                } else {
                    true
                }
            })
            .collect();
        kept.push(geo::Polygon::new(exterior, interiors));
    }
    MultiPolygon::new(kept).orient(Direction::Default)
}

/// Splits a multipolygon into crate rings: one exterior plus holes per piece.
///
/// # Errors
///
/// Fails when a piece's exterior has fewer than 3 distinct vertices.
pub fn to_pieces(shape: &MultiPolygon<f64>) -> Result<Vec<(Polygon, Vec<Polygon>)>> {
    let pieces = shape
        .iter()
        .map(from_geo_polygon)
        .collect::<Result<Vec<_>>>()?;
    debug!(pieces = pieces.len(), "split multipolygon");
    Ok(pieces)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;
    use approx::assert_relative_eq;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Rectangle::from_corner(x, y, w, h).to_polygon().unwrap()
    }

    #[test]
    fn union_merges_overlaps() {
        let merged = union_all(&[rect(0.0, 0.0, 2.0, 1.0), rect(1.0, 0.0, 2.0, 1.0)]);
        assert_eq!(merged.0.len(), 1);
        assert_relative_eq!(merged.unsigned_area(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn difference_splits_into_pieces() {
        let base = to_geo_multi(&rect(0.0, 0.0, 3.0, 1.0));
        let cut = to_geo_multi(&rect(1.0, -1.0, 1.0, 3.0));
        let pieces = to_pieces(&difference(&base, &cut)).unwrap();
        assert_eq!(pieces.len(), 2);
        for (exterior, holes) in &pieces {
            assert!(holes.is_empty());
            assert_relative_eq!(exterior.area(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn difference_creates_hole() {
        let base = to_geo_multi(&rect(0.0, 0.0, 4.0, 4.0));
        let cut = to_geo_multi(&rect(1.0, 1.0, 2.0, 2.0));
        let shape = drop_slivers(difference(&base, &cut), 1e-12, "test");
        let pieces = to_pieces(&shape).unwrap();
        assert_eq!(pieces.len(), 1);
        let (exterior, holes) = &pieces[0];
        assert!(exterior.is_ccw());
        assert_eq!(holes.len(), 1);
        assert!(!holes[0].is_ccw());
    }

    #[test]
    fn overlap_of_touching_is_zero() {
        let a = to_geo_multi(&rect(0.0, 0.0, 1.0, 1.0));
        let b = to_geo_multi(&rect(1.0, 0.0, 1.0, 1.0));
        assert!(overlap_area(&a, &b) < 1e-12);
        let c = to_geo_multi(&rect(0.5, 0.5, 1.0, 1.0));
        assert_relative_eq!(overlap_area(&a, &c), 0.25, epsilon = 1e-12);
        assert_relative_eq!(intersection(&a, &c).unsigned_area(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(union(&a, &b).unsigned_area(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn slivers_removed() {
        let thin = to_geo_multi(&rect(0.0, 0.0, 1.0, 1e-9));
        let big = to_geo_multi(&rect(5.0, 0.0, 1.0, 1.0));
        let kept = drop_slivers(thin.union(&big), 1e-6, "test");
        assert_eq!(kept.0.len(), 1);
    }
}
