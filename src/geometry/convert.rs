//! Conversions between crate polygons and `geo` polygon types.

use tracing::debug;

use crate::error::Result;
use crate::math::Point2;

use super::polygon::Polygon;

/// Builds a `geo` polygon from an exterior ring and its holes.
#[must_use]
pub fn to_geo_polygon(exterior: &Polygon, holes: &[Polygon]) -> geo::Polygon<f64> {
    geo::Polygon::new(
        exterior.to_line_string(),
        holes.iter().map(Polygon::to_line_string).collect(),
    )
}

/// Wraps a single ring into a multipolygon.
#[must_use]
pub fn to_geo_multi(ring: &Polygon) -> geo::MultiPolygon<f64> {
    geo::MultiPolygon::new(vec![to_geo_polygon(ring, &[])])
}

/// Converts a `geo` ring back into a closed crate polygon.
///
/// # Errors
///
/// Fails when the ring has fewer than 3 distinct vertices.
pub fn ring_from_geo(ring: &geo::LineString<f64>) -> Result<Polygon> {
    Polygon::from_points(ring.coords().map(|c| Point2::new(c.x, c.y)))
}

/// Converts a `geo` polygon into an exterior ring plus holes.
///
/// Holes that collapsed below 3 distinct vertices are dropped.
///
/// # Errors
///
/// Fails when the exterior ring is degenerate.
pub fn from_geo_polygon(poly: &geo::Polygon<f64>) -> Result<(Polygon, Vec<Polygon>)> {
    let exterior = ring_from_geo(poly.exterior())?;
    let mut holes = Vec::with_capacity(poly.interiors().len());
    for interior in poly.interiors() {
        match ring_from_geo(interior) {
            Ok(hole) => holes.push(hole),
            Err(err) => debug!(%err, "dropping degenerate hole ring"),
        }
    }
    Ok((exterior, holes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use geo::Area;

    #[test]
    fn round_trip_with_hole() {
        let outer = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
        let hole = Polygon::from_xy(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]).unwrap();
        let geo_poly = to_geo_polygon(&outer, std::slice::from_ref(&hole));
        assert!((geo_poly.unsigned_area() - 12.0).abs() < TOLERANCE);

        let (ext, holes) = from_geo_polygon(&geo_poly).unwrap();
        assert_eq!(ext, outer);
        assert_eq!(holes, vec![hole]);
    }

    #[test]
    fn degenerate_hole_is_dropped() {
        let outer = Polygon::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
        let sliver = geo::LineString::from(vec![(1.0, 1.0), (2.0, 2.0), (1.0, 1.0)]);
        let geo_poly = geo::Polygon::new(outer.to_line_string(), vec![sliver]);
        let (_, holes) = from_geo_polygon(&geo_poly).unwrap();
        assert!(holes.is_empty());
    }
}
