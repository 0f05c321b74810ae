//! Distance metrics for point comparison.
//!
//! Two closed variants: great-circle distance on a sphere of a given radius,
//! and straight-line distance in raw coordinate units. The variant is resolved
//! once per call and then used for every comparison.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ThinError};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two `(lon, lat)` pairs given in degrees.
///
/// The result is in the same linear unit as `radius`.
#[inline]
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64, radius: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

/// Straight-line distance in native coordinate units.
#[inline]
pub fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Metric selector before the sphere radius is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    GreatCircle,
    Planar,
}

impl MetricKind {
    /// Legacy selector rule: exactly `"haversine"` picks the great-circle
    /// metric, every other string is treated as planar.
    pub fn parse_lenient(s: &str) -> Self {
        if s == "haversine" {
            Self::GreatCircle
        } else {
            Self::Planar
        }
    }
}

impl FromStr for MetricKind {
    type Err = ThinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "haversine" | "great-circle" | "great_circle" => Ok(Self::GreatCircle),
            "euclidean" | "planar" => Ok(Self::Planar),
            other => Err(ThinError::invalid(format!(
                "unknown distance metric: {other:?} (expected \"haversine\" or \"euclidean\")"
            ))),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GreatCircle => f.write_str("haversine"),
            Self::Planar => f.write_str("euclidean"),
        }
    }
}

/// A resolved distance metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMetric {
    /// Haversine distance on a sphere with the given radius.
    GreatCircle { radius: f64 },
    /// Euclidean distance in coordinate units.
    Planar,
}

impl Default for DistanceMetric {
    fn default() -> Self {
        Self::GreatCircle {
            radius: EARTH_RADIUS_KM,
        }
    }
}

impl DistanceMetric {
    /// Bind a metric kind to a sphere radius. The radius is ignored for the
    /// planar metric.
    pub fn resolve(kind: MetricKind, radius: f64) -> Self {
        match kind {
            MetricKind::GreatCircle => Self::GreatCircle { radius },
            MetricKind::Planar => Self::Planar,
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Self::GreatCircle { .. } => MetricKind::GreatCircle,
            Self::Planar => MetricKind::Planar,
        }
    }

    /// Distance between two `[x, y]` points.
    #[inline]
    pub fn distance(&self, a: [f64; 2], b: [f64; 2]) -> f64 {
        match *self {
            Self::GreatCircle { radius } => haversine(a[0], a[1], b[0], b[1], radius),
            Self::Planar => euclidean(a[0], a[1], b[0], b[1]),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Self::GreatCircle { radius } = *self {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(ThinError::invalid(format!(
                    "sphere radius must be positive and finite, got {radius}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_identical_points() {
        assert_eq!(haversine(12.5, 41.9, 12.5, 41.9, EARTH_RADIUS_KM), 0.0);
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let d = haversine(0.0, 0.0, 0.0, 1.0, EARTH_RADIUS_KM);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-9, "got {d}, expected {expected}");
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = haversine(-3.7, 40.4, 2.35, 48.85, EARTH_RADIUS_KM);
        let b = haversine(2.35, 48.85, -3.7, 40.4, EARTH_RADIUS_KM);
        assert!((a - b).abs() < 1e-9);
        // Madrid to Paris is roughly 1050 km.
        assert!((1000.0..1100.0).contains(&a), "got {a}");
    }

    #[test]
    fn euclidean_three_four_five() {
        assert_eq!(euclidean(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(DistanceMetric::Planar.distance([1.0, 1.0], [4.0, 5.0]), 5.0);
    }

    #[test]
    fn strict_parse_rejects_typos() {
        assert_eq!("haversine".parse::<MetricKind>().unwrap(), MetricKind::GreatCircle);
        assert_eq!("Euclidean".parse::<MetricKind>().unwrap(), MetricKind::Planar);
        assert!(matches!(
            "haversin".parse::<MetricKind>(),
            Err(ThinError::InvalidArgument(_))
        ));
    }

    #[test]
    fn lenient_parse_falls_back_to_planar() {
        assert_eq!(MetricKind::parse_lenient("haversine"), MetricKind::GreatCircle);
        assert_eq!(MetricKind::parse_lenient("Haversine"), MetricKind::Planar);
        assert_eq!(MetricKind::parse_lenient("anything"), MetricKind::Planar);
    }

    #[test]
    fn resolve_binds_radius_only_for_great_circle() {
        assert_eq!(
            DistanceMetric::resolve(MetricKind::GreatCircle, 1.0),
            DistanceMetric::GreatCircle { radius: 1.0 }
        );
        assert_eq!(
            DistanceMetric::resolve(MetricKind::Planar, -5.0),
            DistanceMetric::Planar
        );
        assert!(DistanceMetric::Planar.validate().is_ok());
        assert!(DistanceMetric::GreatCircle { radius: 0.0 }.validate().is_err());
        assert!(DistanceMetric::GreatCircle { radius: f64::NAN }.validate().is_err());
    }
}
