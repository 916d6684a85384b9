use geo::{Area, MultiPolygon};

use crate::error::{OperationError, Result};
use crate::geometry::{Region, RegionKind};
use crate::operations::boolean::{difference, overlap_area};

/// Human-readable name of a region for error messages.
pub(crate) fn describe(region: &Region, position: usize) -> String {
    match region.kind() {
        RegionKind::Spar { index, .. } => format!("spar {index}"),
        kind => format!("{} {position}", kind.label()),
    }
}

/// Fails when two material regions share more than `min_area`.
pub(crate) fn check_disjoint(regions: &[Region], min_area: f64) -> Result<()> {
    let solids: Vec<(usize, &Region, MultiPolygon<f64>)> = regions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_solid())
        .map(|(i, r)| (i, r, MultiPolygon::new(vec![r.to_geo()])))
        .collect();

    for (a, (ia, ra, ga)) in solids.iter().enumerate() {
        for (ib, rb, gb) in &solids[a + 1..] {
            let shared = overlap_area(ga, gb);
            if shared > min_area {
                return Err(OperationError::OverlappingRegions {
                    first: describe(ra, *ia),
                    second: describe(rb, *ib),
                    overlap_area: shared,
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Fails when spar material leaves `outer` or overlaps `cavity`.
pub(crate) fn check_spars(
    regions: &[Region],
    outer: &MultiPolygon<f64>,
    cavity: &MultiPolygon<f64>,
    min_area: f64,
) -> Result<()> {
    for (i, region) in regions.iter().enumerate() {
        if !matches!(region.kind(), RegionKind::Spar { .. }) {
            continue;
        }
        let spar = MultiPolygon::new(vec![region.to_geo()]);
        let outside = difference(&spar, outer).unsigned_area();
        if outside > min_area {
            return Err(OperationError::OverlappingRegions {
                first: describe(region, i),
                second: "exterior of outer outline".to_owned(),
                overlap_area: outside,
            }
            .into());
        }
        let in_cavity = overlap_area(&spar, cavity);
        if in_cavity > min_area {
            return Err(OperationError::OverlappingRegions {
                first: describe(region, i),
                second: "cavity".to_owned(),
                overlap_area: in_cavity,
            }
            .into());
        }
    }
    Ok(())
}
