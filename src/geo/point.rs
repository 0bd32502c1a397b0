//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Construction does not validate; coordinates are checked when distances
/// are computed so that bad input can be reported per bin.
///
/// # Examples
///
/// ```
/// use waste_routing::geo::GeoPoint;
///
/// assert!(GeoPoint::new(17.385, 78.486).is_valid());
/// assert!(!GeoPoint::new(200.0, 78.486).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, valid range `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, valid range `[-180, 180]`.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point without validating it.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Returns the point unchanged, or [`GeoError::InvalidCoordinate`].
    pub fn validate(self) -> Result<Self, GeoError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeoError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Symmetric, non-negative, and zero for identical points.
///
/// # Examples
///
/// ```
/// use waste_routing::geo::{haversine_km, GeoPoint};
///
/// let a = GeoPoint::new(17.385, 78.486);
/// let b = GeoPoint::new(17.440, 78.498);
/// let d = haversine_km(a, b).unwrap();
/// assert!(d > 5.0 && d < 7.0);
/// assert_eq!(haversine_km(a, a).unwrap(), 0.0);
/// ```
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> Result<f64, GeoError> {
    let from = from.validate()?;
    let to = to.validate()?;
    Ok(haversine_unchecked(from, to))
}

/// Haversine on coordinates already known to be valid.
pub(crate) fn haversine_unchecked(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}
