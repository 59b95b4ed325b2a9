//! Geographic coordinates used as the input of every climate computation.

use crate::error::ValidationError;
use haversine::{distance, Location as HaversineLocation, Units};
use serde::Serialize;
use std::fmt;

/// A validated geographical point in decimal degrees.
///
/// Latitude is limited to `[-90, 90]` and longitude to `[-180, 180]`. Both must be finite.
///
/// # Examples
///
/// ```
/// use climate_normals::GeoPoint;
///
/// let bali = GeoPoint::new(-8.4095, 115.1889).unwrap();
/// assert_eq!(bali.latitude(), -8.4095);
/// assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() {
            return Err(ValidationError::new("latitude", "must be a finite number"));
        }
        if !longitude.is_finite() {
            return Err(ValidationError::new("longitude", "must be a finite number"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::new(
                "latitude",
                format!("{latitude} is outside [-90, 90]"),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::new(
                "longitude",
                format!("{longitude} is outside [-180, 180]"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Validates optional form input, reporting which coordinate is missing.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let latitude = latitude.ok_or_else(|| ValidationError::new("latitude", "is required"))?;
        let longitude = longitude.ok_or_else(|| ValidationError::new("longitude", "is required"))?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Moves the point by the given number of degrees. Latitude is clamped at the poles
    /// and longitude wraps around the antimeridian into `[-180, 180)`.
    pub(crate) fn offset(&self, d_latitude: f64, d_longitude: f64) -> Self {
        let latitude = (self.latitude + d_latitude).clamp(-90.0, 90.0);
        let longitude = (self.longitude + d_longitude + 180.0).rem_euclid(360.0) - 180.0;
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            HaversineLocation {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            Units::Kilometers,
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_coordinates() {
        assert_eq!(GeoPoint::new(f64::INFINITY, 0.0).unwrap_err().field, "latitude");
        assert_eq!(GeoPoint::new(0.0, f64::NAN).unwrap_err().field, "longitude");
        assert_eq!(GeoPoint::new(91.0, 0.0).unwrap_err().field, "latitude");
        assert_eq!(GeoPoint::new(0.0, -180.5).unwrap_err().field, "longitude");
        assert_eq!(GeoPoint::from_parts(None, Some(1.0)).unwrap_err().field, "latitude");
        assert_eq!(GeoPoint::from_parts(Some(1.0), None).unwrap_err().field, "longitude");
    }

    #[test]
    fn test_offset_wraps_and_clamps() {
        let point = GeoPoint::new(89.95, 179.95).unwrap();
        let moved = point.offset(0.1, 0.1);
        assert_eq!(moved.latitude(), 90.0);
        assert!((moved.longitude() - -179.95).abs() < 1e-9);
    }

    #[test]
    fn test_distance_km() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(0.0, 1.0).unwrap();
        let d = a.distance_km(&b);
        assert!((d - 111.2).abs() < 0.5, "got {d}");
    }
}
