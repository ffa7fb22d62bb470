//! Coordinate primitives and great-circle distance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84-ish latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    /// Build a validated coordinate pair.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(GeoError::InvalidCoordinate { lat, lon });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.4}°{} {:.4}°{}", self.lat.abs(), ns, self.lon.abs(), ew)
    }
}

/// Coordinate errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    InvalidCoordinate { lat: f64, lon: f64 },
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { lat, lon } => {
                write!(f, "Invalid coordinate: lat={}, lon={}", lat, lon)
            }
        }
    }
}

impl std::error::Error for GeoError {}

/// Haversine great-circle distance between two points, in meters.
///
/// Spherical approximation — ignores the ellipsoid, which is fine at
/// metro scale (<50 km). Symmetric, and zero for identical points.
pub fn haversine_m(a: LatLng, b: LatLng) -> Result<f64, GeoError> {
    if !a.lat.is_finite() || !a.lon.is_finite() {
        return Err(GeoError::InvalidCoordinate { lat: a.lat, lon: a.lon });
    }
    if !b.lat.is_finite() || !b.lon.is_finite() {
        return Err(GeoError::InvalidCoordinate { lat: b.lat, lon: b.lon });
    }

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    Ok(2.0 * EARTH_RADIUS_M * h.sqrt().asin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TAIPEI_101: LatLng = LatLng { lat: 25.033968, lon: 121.564468 };
    const TAIPEI_MAIN: LatLng = LatLng { lat: 25.0478, lon: 121.5170 };

    #[test]
    fn test_distance_zero_for_same_point() {
        assert_eq!(haversine_m(TAIPEI_101, TAIPEI_101).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let ab = haversine_m(TAIPEI_101, TAIPEI_MAIN).unwrap();
        let ba = haversine_m(TAIPEI_MAIN, TAIPEI_101).unwrap();
        assert_relative_eq!(ab, ba);
    }

    #[test]
    fn test_distance_taipei_main_to_101() {
        // Known to be roughly 5 km across the city center.
        let d = haversine_m(TAIPEI_MAIN, TAIPEI_101).unwrap();
        assert!((4_500.0..5_500.0).contains(&d), "got {}", d);
    }

    #[test]
    fn test_distance_rejects_nan() {
        let bad = LatLng { lat: f64::NAN, lon: 121.5 };
        assert!(haversine_m(bad, TAIPEI_101).is_err());
        assert!(haversine_m(TAIPEI_101, bad).is_err());
    }

    #[test]
    fn test_distance_rejects_infinite() {
        let bad = LatLng { lat: 25.0, lon: f64::INFINITY };
        assert!(matches!(
            haversine_m(bad, TAIPEI_101),
            Err(GeoError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_latlng_new_validates_range() {
        assert!(LatLng::new(25.03, 121.56).is_ok());
        assert!(LatLng::new(91.0, 0.0).is_err());
        assert!(LatLng::new(0.0, -181.0).is_err());
        assert!(LatLng::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_display_format() {
        let p = LatLng { lat: 25.0340, lon: 121.5645 };
        assert_eq!(p.to_string(), "25.0340°N 121.5645°E");
    }
}
