// crates/airportdb-core/src/geo.rs

//! # Geographic primitives
//!
//! A validated WGS84 point and the haversine great-circle distance.
//!
//! The PostGIS backend never calls [`haversine_m`]; distances there come from
//! the engine's spherical functions. The in-memory backend uses it for both
//! filtering and ordering. Both model the Earth as a sphere of (almost) the
//! same radius, so results agree to within a few parts per million.

use crate::error::{AirportError, Result};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine fallback, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Spatial reference of every stored point (WGS84).
pub const SRID: i32 = 4326;

/// A latitude/longitude pair in decimal degrees.
///
/// Constructed through [`GeoPoint::new`], which guarantees both values are
/// finite and inside their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Validates and builds a point.
    ///
    /// # Errors
    ///
    /// [`AirportError::InvalidArgument`] when `lat` is outside `[-90, 90]`,
    /// `lon` is outside `[-180, 180]`, or either is NaN/infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use airportdb_core::GeoPoint;
    ///
    /// let jfk = GeoPoint::new(40.6413, -73.7781).unwrap();
    /// assert_eq!(jfk.to_wkt(), "POINT(-73.7781 40.6413)");
    /// assert!(GeoPoint::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(AirportError::invalid(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(AirportError::invalid(format!(
                "longitude {lon} is outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Builds a point from values the storage layer already validated.
    pub(crate) fn stored(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to `other`, in meters.
    #[inline]
    pub fn haversine_m(&self, other: &GeoPoint) -> f64 {
        haversine_m(self.lat, self.lon, other.lat, other.lon)
    }

    /// Well-known-text form. Note the axis order: `POINT(lon lat)`.
    pub fn to_wkt(&self) -> String {
        format!("POINT({} {})", self.lon, self.lat)
    }
}

/// Haversine distance between two coordinates, in meters, on a sphere of
/// radius [`EARTH_RADIUS_M`].
///
/// # Examples
///
/// ```
/// use airportdb_core::haversine_m;
///
/// // JFK -> LHR
/// let d = haversine_m(40.6413, -73.7781, 51.4700, -0.4543);
/// assert!((5_500_000.0..5_600_000.0).contains(&d));
/// ```
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // clamp: rounding can push `a` a hair above 1 for antipodal points
    EARTH_RADIUS_M * 2.0 * a.sqrt().min(1.0).asin()
}
