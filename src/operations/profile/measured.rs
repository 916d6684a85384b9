use std::path::Path;

use tracing::debug;

use crate::error::{GeometryError, ProfileError, Result, SectionError};
use crate::geometry::{Polygon, Winding};
use crate::io::read_to_string;
use crate::math::polygon_2d::{dedup_ring, points_coincide};
use crate::math::{Point2, TOLERANCE};

/// Characters that start a trailing comment in `.dat` files.
const COMMENT_MARKERS: [char; 3] = ['#', '!', ';'];

fn malformed(reason: impl Into<String>) -> SectionError {
    ProfileError::MalformedCoordinateData {
        reason: reason.into(),
    }
    .into()
}

/// Builds a closed counter-clockwise outline from measured `(x, y)` pairs.
///
/// Consecutive duplicates, including a repeated closing point, are removed
/// before closing the ring. Repeats elsewhere are kept as vertices but do
/// not count towards the distinct points.
///
/// # Errors
///
/// Returns `ProfileError::MalformedCoordinateData` if any coordinate is not
/// finite, fewer than 3 distinct points remain, or the points enclose no
/// area.
pub fn import_measured(points: &[(f64, f64)]) -> Result<Polygon> {
    if let Some((i, (x, y))) = points
        .iter()
        .enumerate()
        .find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
    {
        return Err(malformed(format!(
            "non-finite coordinate ({x}, {y}) at index {i}"
        )));
    }
    let raw: Vec<Point2> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
    let ring = dedup_ring(&raw);
    let distinct = distinct_count(&ring);
    if distinct < 3 {
        return Err(malformed(format!(
            "need at least 3 distinct points, got {distinct}"
        )));
    }
    let polygon = Polygon::from_points(ring)
        .map_err(|err| malformed(err.to_string()))?
        .with_winding(Winding::CounterClockwise);
    let extent = polygon.bounds().max_extent();
    if polygon.area() <= TOLERANCE * extent * extent {
        return Err(malformed(format!(
            "points enclose no area ({} vertices)",
            polygon.vertex_count()
        )));
    }
    Ok(polygon)
}

/// Number of points that differ from every earlier point by more than
/// `TOLERANCE`.
fn distinct_count(points: &[Point2]) -> usize {
    points
        .iter()
        .enumerate()
        .filter(|(i, p)| !points[..*i].iter().any(|q| points_coincide(p, q)))
        .count()
}

/// Parses XFOIL/UIUC `.dat` text into an outline.
///
/// Lines that do not start with two numbers (headers, blank lines,
/// comments) are skipped. Lednicer files, whose first numeric line holds
/// the upper and lower point counts, are reordered into a single ring.
///
/// # Errors
///
/// Returns `ProfileError::MalformedCoordinateData` when the point counts of
/// a Lednicer file disagree with its body, or for the reasons listed on
/// [`import_measured`].
pub fn parse_dat(text: &str) -> Result<Polygon> {
    let pairs: Vec<(f64, f64)> = text.lines().filter_map(parse_pair).collect();

    let ordered = match pairs.first() {
        Some(&(nu, nl)) if is_count(nu) && is_count(nl) => {
            debug!(upper = nu, lower = nl, "detected Lednicer layout");
            lednicer_ring(&pairs[1..], nu, nl)?
        }
        _ => pairs,
    };
    import_measured(&ordered)
}

/// Reads and parses a `.dat` file.
///
/// # Errors
///
/// Returns `CatalogError::Io` when the file cannot be read, or the errors
/// of [`parse_dat`].
pub fn read_dat(path: impl AsRef<Path>) -> Result<Polygon> {
    let path = path.as_ref();
    let text = read_to_string(path)?;
    let polygon = parse_dat(&text)?;
    debug!(
        path = %path.display(),
        vertices = polygon.vertex_count(),
        "imported airfoil coordinates"
    );
    Ok(polygon)
}

fn parse_pair(line: &str) -> Option<(f64, f64)> {
    let body = line
        .find(COMMENT_MARKERS)
        .map_or(line, |idx| &line[..idx]);
    let mut tokens = body
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());
    let x = tokens.next()?.parse::<f64>().ok()?;
    let y = tokens.next()?.parse::<f64>().ok()?;
    Some((x, y))
}

/// Point counts are integral and larger than any normalized coordinate.
fn is_count(v: f64) -> bool {
    v > 1.5 && v.fract() == 0.0
}

fn lednicer_ring(body: &[(f64, f64)], nu: f64, nl: f64) -> Result<Vec<(f64, f64)>> {
    let mismatch = || {
        malformed(format!(
            "Lednicer header announces {nu} + {nl} points, found {}",
            body.len()
        ))
    };
    #[allow(clippy::cast_precision_loss)]
    let available = body.len() as f64;
    if nu > available || nl > available {
        return Err(mismatch());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (nu, nl) = (nu as usize, nl as usize);
    if nu.checked_add(nl) != Some(body.len()) {
        return Err(mismatch());
    }
    let (upper, lower) = body.split_at(nu);
    Ok(upper.iter().rev().chain(lower.iter()).copied().collect())
}

/// Rescales an outline so its x-extent equals `chord`, keeping the leading
/// edge (minimum-x vertex) fixed.
///
/// # Errors
///
/// Returns `GeometryError::ParameterOutOfRange` for a non-positive chord and
/// `GeometryError::Degenerate` for an outline with no x-extent.
pub fn scaled(polygon: &Polygon, chord: f64) -> Result<Polygon> {
    if !(chord.is_finite() && chord > 0.0) {
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "chord",
            value: chord,
            min: f64::MIN_POSITIVE,
            max: f64::INFINITY,
        }
        .into());
    }
    let width = polygon.bounds().width();
    if width < TOLERANCE {
        return Err(GeometryError::Degenerate("outline has zero chord".to_owned()).into());
    }
    let le = leading_edge(polygon.vertices());
    let factor = chord / width;
    polygon.map_points(|p| le + (p - le) * factor)
}

/// Resamples an outline to `n_per_surface` points on each surface by linear
/// arc-length interpolation.
///
/// The ring is split at the leading edge (minimum x) and the trailing edge
/// (maximum x); both edge points are kept exactly.
///
/// # Errors
///
/// Returns `GeometryError::ParameterOutOfRange` when `n_per_surface < 3`.
pub fn resampled(polygon: &Polygon, n_per_surface: usize) -> Result<Polygon> {
    if n_per_surface < 3 {
        #[allow(clippy::cast_precision_loss)]
        return Err(GeometryError::ParameterOutOfRange {
            parameter: "n_per_surface",
            value: n_per_surface as f64,
            min: 3.0,
            max: f64::INFINITY,
        }
        .into());
    }
    let ccw = polygon.clone().with_winding(Winding::CounterClockwise);
    let verts = ccw.vertices();
    let n = verts.len();
    let le = arg_extreme(verts, |a, b| a < b);
    let te = arg_extreme(verts, |a, b| a > b);

    let walk = |from: usize, to: usize| {
        let mut out = vec![verts[from]];
        let mut i = from;
        while i != to {
            i = (i + 1) % n;
            out.push(verts[i]);
        }
        out
    };
    let lower = resample_polyline(&walk(le, te), n_per_surface);
    let upper = resample_polyline(&walk(te, le), n_per_surface);

    let mut ring = lower;
    ring.extend_from_slice(&upper[1..n_per_surface - 1]);
    Ok(Polygon::from_points(ring)?.with_winding(Winding::CounterClockwise))
}

fn leading_edge(verts: &[Point2]) -> Point2 {
    verts[arg_extreme(verts, |a, b| a < b)]
}

fn arg_extreme(verts: &[Point2], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (i, p) in verts.iter().enumerate().skip(1) {
        if better(p.x, verts[best].x) {
            best = i;
        }
    }
    best
}

/// Places `n` points evenly by arc length along an open polyline.
fn resample_polyline(points: &[Point2], n: usize) -> Vec<Point2> {
    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0);
    for w in points.windows(2) {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + (w[1] - w[0]).norm());
    }
    let total = cumulative[cumulative.len() - 1];
    if total < TOLERANCE {
        return vec![points[0]; n];
    }

    let mut out = Vec::with_capacity(n);
    let mut seg = 0;
    for k in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let s = total * k as f64 / (n - 1) as f64;
        while seg + 2 < points.len() && cumulative[seg + 1] < s {
            seg += 1;
        }
        let len = cumulative[seg + 1] - cumulative[seg];
        let t = if len > 0.0 {
            ((s - cumulative[seg]) / len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(points[seg] + (points[seg + 1] - points[seg]) * t);
    }
    out[n - 1] = points[points.len() - 1];
    out
}
