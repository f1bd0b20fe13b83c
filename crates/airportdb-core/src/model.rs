// crates/airportdb-core/src/model.rs
use crate::error::{AirportError, Result};
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Default `type` of a manually inserted airport.
pub const MANUAL_TYPE: &str = "airport";
/// Default `source` of a manually inserted airport.
pub const MANUAL_SOURCE: &str = "manual";

/// A stored airport row.
///
/// `latitude`/`longitude` are the source of truth; the storage engine keeps a
/// point geometry built from exactly these two values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub airport_id: i32,
    pub name: String,
    pub city: String,
    pub country: String,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Feet above mean sea level.
    pub altitude: Option<i32>,
    /// Hours offset from UTC.
    pub timezone: Option<f64>,
    pub dst: Option<String>,
    pub tz_database_time_zone: Option<String>,
    #[serde(rename = "type")]
    pub airport_type: Option<String>,
    pub source: Option<String>,
}

impl Airport {
    /// An airport with only the required fields set.
    pub fn new(
        airport_id: i32,
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            airport_id,
            name: name.into(),
            city: city.into(),
            country: country.into(),
            iata: None,
            icao: None,
            latitude: location.lat(),
            longitude: location.lon(),
            altitude: None,
            timezone: None,
            dst: None,
            tz_database_time_zone: None,
            airport_type: None,
            source: None,
        }
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::stored(self.latitude, self.longitude)
    }
}

/// Input of a manual, single-airport insert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewAirport {
    pub airport_id: i32,
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewAirport {
    /// **Validation:** checks required text and coordinate ranges, then
    /// applies the manual-insert defaults (`type = "airport"`,
    /// `source = "manual"`).
    pub fn into_airport(self) -> Result<Airport> {
        for (field, value) in [
            ("name", &self.name),
            ("city", &self.city),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                return Err(AirportError::invalid(format!("{field} is required")));
            }
        }
        let location = GeoPoint::new(self.latitude, self.longitude)?;

        let mut airport = Airport::new(
            self.airport_id,
            self.name.trim(),
            self.city.trim(),
            self.country.trim(),
            location,
        );
        airport.airport_type = Some(MANUAL_TYPE.to_string());
        airport.source = Some(MANUAL_SOURCE.to_string());
        Ok(airport)
    }
}

/// One result row of a radius query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub airport_id: i32,
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance to the origin, in meters.
    pub distance_m: f64,
}

impl Neighbor {
    pub(crate) fn of(airport: &Airport, distance_m: f64) -> Self {
        Self {
            airport_id: airport.airport_id,
            name: airport.name.clone(),
            city: airport.city.clone(),
            country: airport.country.clone(),
            latitude: airport.latitude,
            longitude: airport.longitude,
            distance_m,
        }
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::stored(self.latitude, self.longitude)
    }
}

/// Origin plus every other airport within `radius_m`, nearest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadiusSearch {
    pub origin: Airport,
    pub radius_m: f64,
    pub neighbors: Vec<Neighbor>,
}

impl RadiusSearch {
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }
}
