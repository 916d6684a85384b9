use std::f64::consts::PI;
use std::str::FromStr;

use tracing::debug;

use crate::error::{GeometryError, ProfileError, Result, SectionError};
use crate::geometry::{Polygon, Winding};
use crate::math::polygon_2d::points_coincide;
use crate::math::Point2;

/// Thickness polynomial coefficients of the NACA 4-digit family.
const THICKNESS_COEFFS: [f64; 5] = [0.2969, -0.1260, -0.3516, 0.2843, -0.1015];

/// A parsed NACA 4-digit designation.
#[derive(Debug, Clone, PartialEq)]
pub struct NacaCode {
    code: String,
    /// Maximum camber as a fraction of chord.
    pub max_camber: f64,
    /// Chordwise position of maximum camber as a fraction of chord.
    pub camber_position: f64,
    /// Maximum thickness as a fraction of chord.
    pub thickness: f64,
}

impl NacaCode {
    /// Parses a code such as `"2412"`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidAirfoilCode` unless the code is exactly
    /// four ASCII digits with non-zero thickness digits.
    pub fn parse(code: &str) -> Result<Self> {
        let invalid = |reason| ProfileError::InvalidAirfoilCode {
            code: code.to_owned(),
            reason,
        };
        let bytes = code.as_bytes();
        if bytes.len() != 4 {
            return Err(invalid("expected exactly 4 digits").into());
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(invalid("expected ASCII digits only").into());
        }
        let digit = |i: usize| u32::from(bytes[i] - b'0');
        let thickness_digits = digit(2) * 10 + digit(3);
        if thickness_digits == 0 {
            return Err(invalid("thickness digits must not be 00").into());
        }
        Ok(Self {
            code: code.to_owned(),
            max_camber: f64::from(digit(0)) / 100.0,
            camber_position: f64::from(digit(1)) / 10.0,
            thickness: f64::from(thickness_digits) / 100.0,
        })
    }

    /// The four-character designation as parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.max_camber <= 0.0 || self.camber_position <= 0.0
    }
}

impl FromStr for NacaCode {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Generates a closed NACA 4-digit outline with cosine-spaced stations.
pub struct NacaProfile {
    max_camber: f64,
    camber_position: f64,
    thickness: f64,
    chord: f64,
    n_points: usize,
}

impl NacaProfile {
    /// Creates a new `NacaProfile` operation from camber `m`, camber
    /// position `p` and thickness `t`, all as fractions of chord.
    #[must_use]
    pub fn new(m: f64, p: f64, t: f64, chord: f64, n_points: usize) -> Self {
        Self {
            max_camber: m,
            camber_position: p,
            thickness: t,
            chord,
            n_points,
        }
    }

    /// Creates a new `NacaProfile` operation from a parsed code.
    #[must_use]
    pub fn from_code(code: &NacaCode, chord: f64, n_points: usize) -> Self {
        Self::new(
            code.max_camber,
            code.camber_position,
            code.thickness,
            chord,
            n_points,
        )
    }

    /// Executes the operation.
    ///
    /// The ring runs over the upper surface from leading to trailing edge,
    /// then back along the lower surface, and is returned counter-clockwise
    /// with `n_points` stations per surface.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` for a non-positive chord,
    /// fewer than 3 stations, or camber/thickness values outside `[0, 1)`.
    pub fn execute(&self) -> Result<Polygon> {
        self.validate()?;

        let c = self.chord;
        let n = self.n_points;
        let mut upper = Vec::with_capacity(n);
        let mut lower = Vec::with_capacity(n);
        #[allow(clippy::cast_precision_loss)]
        let last = (n - 1) as f64;

        for i in 0..n {
            #[allow(clippy::cast_precision_loss)]
            let beta = PI * i as f64 / last;
            let x = c * (1.0 - beta.cos()) * 0.5;
            let yt = self.half_thickness(x);
            let (yc, slope) = self.camber(x);
            let theta = slope.atan();
            let (s, co) = theta.sin_cos();
            upper.push(Point2::new(x - yt * s, yc + yt * co));
            lower.push(Point2::new(x + yt * s, yc - yt * co));
        }

        let mut ring = upper;
        let upper_te = ring[n - 1];
        let lower_te = lower[n - 1];
        let skip_te = usize::from(points_coincide(&upper_te, &lower_te));
        ring.extend(lower.iter().rev().skip(skip_te));

        let polygon = Polygon::from_points(ring)?.with_winding(Winding::CounterClockwise);
        debug!(
            vertices = polygon.vertex_count(),
            chord = c,
            "generated NACA outline"
        );
        Ok(polygon)
    }

    fn validate(&self) -> Result<()> {
        if !(self.chord.is_finite() && self.chord > 0.0) {
            return Err(out_of_range("chord", self.chord, f64::MIN_POSITIVE, f64::INFINITY));
        }
        if self.n_points < 3 {
            #[allow(clippy::cast_precision_loss)]
            return Err(out_of_range(
                "n_points",
                self.n_points as f64,
                3.0,
                f64::INFINITY,
            ));
        }
        if !(self.thickness > 0.0 && self.thickness < 1.0) {
            return Err(out_of_range("thickness", self.thickness, 0.0, 1.0));
        }
        if !(0.0..1.0).contains(&self.max_camber) {
            return Err(out_of_range("max_camber", self.max_camber, 0.0, 1.0));
        }
        if !(0.0..1.0).contains(&self.camber_position) {
            return Err(out_of_range(
                "camber_position",
                self.camber_position,
                0.0,
                1.0,
            ));
        }
        Ok(())
    }

    fn half_thickness(&self, x: f64) -> f64 {
        let xc = x / self.chord;
        let poly = THICKNESS_COEFFS[0] * xc.sqrt()
            + THICKNESS_COEFFS[1] * xc
            + THICKNESS_COEFFS[2] * xc.powi(2)
            + THICKNESS_COEFFS[3] * xc.powi(3)
            + THICKNESS_COEFFS[4] * xc.powi(4);
        5.0 * self.thickness * self.chord * poly
    }

    /// Camber ordinate and slope at absolute station `x`.
    fn camber(&self, x: f64) -> (f64, f64) {
        let m = self.max_camber;
        let p = self.camber_position;
        let c = self.chord;
        if m <= 0.0 || p <= 0.0 {
            return (0.0, 0.0);
        }
        let xc = x / c;
        if x < p * c {
            let yc = m * x / (p * p) * (2.0 * p - xc);
            let slope = 2.0 * m / (p * p) * (p - xc);
            (yc, slope)
        } else {
            let q = (1.0 - p) * (1.0 - p);
            let yc = m * (c - x) / q * (1.0 + xc - 2.0 * p);
            let slope = 2.0 * m / q * (p - xc);
            (yc, slope)
        }
    }
}

fn out_of_range(parameter: &'static str, value: f64, min: f64, max: f64) -> SectionError {
    GeometryError::ParameterOutOfRange {
        parameter,
        value,
        min,
        max,
    }
    .into()
}

/// Generates a NACA 4-digit outline from camber `m`, camber position `p`
/// and thickness `t` (fractions of chord).
///
/// # Errors
///
/// See [`NacaProfile::execute`].
pub fn generate(m: f64, p: f64, t: f64, chord: f64, n_points: usize) -> Result<Polygon> {
    NacaProfile::new(m, p, t, chord, n_points).execute()
}

/// Parses a 4-digit code and generates its outline.
///
/// # Errors
///
/// Returns `ProfileError::InvalidAirfoilCode` for malformed codes, or the
/// errors of [`NacaProfile::execute`].
pub fn naca4(code: &str, chord: f64, n_points: usize) -> Result<Polygon> {
    let parsed = NacaCode::parse(code)?;
    NacaProfile::from_code(&parsed, chord, n_points).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_digits() {
        let code: NacaCode = "2412".parse().unwrap();
        assert_relative_eq!(code.max_camber, 0.02);
        assert_relative_eq!(code.camber_position, 0.4);
        assert_relative_eq!(code.thickness, 0.12);
        assert_eq!(code.as_str(), "2412");
        assert!(!code.is_symmetric());
    }

    #[test]
    fn invalid_codes_rejected() {
        for bad in ["241", "24125", "24a2", "0000", "2400", "٢٤١٢"] {
            match NacaCode::parse(bad) {
                Err(SectionError::Profile(ProfileError::InvalidAirfoilCode { code, .. })) => {
                    assert_eq!(code, bad);
                }
                other => panic!("{bad}: expected InvalidAirfoilCode, got {other:?}"),
            }
        }
    }

    #[test]
    fn all_codes_close_ccw() {
        for code in ["0006", "0012", "0015", "2412", "4415", "6409", "9999", "2012"] {
            let poly = naca4(code, 1.0, 40).unwrap();
            assert_eq!(poly.first(), poly.last(), "{code}");
            assert!(poly.signed_area() > 0.0, "{code}");
        }
    }

    #[test]
    fn symmetric_profile_is_mirrored() {
        let poly = naca4("0012", 2.0, 31).unwrap();
        let b = poly.bounds();
        assert_relative_eq!(b.min.y, -b.max.y, epsilon = 1e-12);
        assert_relative_eq!(b.width(), 2.0, epsilon = 1e-12);
        // Max half-thickness of the 4-digit family is ~t/2 near x = 0.3c.
        assert_relative_eq!(b.max.y, 0.12, epsilon = 2e-3);
    }

    #[test]
    fn trailing_edge_gap_keeps_both_points() {
        let n = 25;
        let poly = naca4("0015", 1.0, n).unwrap();
        // Leading edge shared, open trailing edge keeps both surface points.
        assert_eq!(poly.vertex_count(), 2 * n - 1);
    }

    #[test]
    fn cambered_profile_lifts_mean_line() {
        let poly = naca4("4412", 1.0, 60).unwrap();
        let b = poly.bounds();
        assert!(b.max.y > -b.min.y);
    }

    #[test]
    fn invalid_parameters() {
        assert!(naca4("0012", 0.0, 50).is_err());
        assert!(naca4("0012", -1.0, 50).is_err());
        assert!(naca4("0012", 1.0, 2).is_err());
        assert!(matches!(
            generate(0.0, 0.0, 0.0, 1.0, 20),
            Err(SectionError::Geometry(GeometryError::ParameterOutOfRange {
                parameter: "thickness",
                ..
            }))
        ));
    }
}
