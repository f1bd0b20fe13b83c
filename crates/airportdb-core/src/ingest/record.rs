// crates/airportdb-core/src/ingest/record.rs
use crate::geo::GeoPoint;
use crate::model::Airport;
use csv::StringRecord;

// Column layout of the OpenFlights `airports.dat` export.
pub const COL_ID: usize = 0;
pub const COL_NAME: usize = 1;
pub const COL_CITY: usize = 2;
pub const COL_COUNTRY: usize = 3;
pub const COL_IATA: usize = 4;
pub const COL_ICAO: usize = 5;
pub const COL_LAT: usize = 6;
pub const COL_LON: usize = 7;
pub const COL_ALTITUDE: usize = 8;
pub const COL_TIMEZONE: usize = 9;
pub const COL_DST: usize = 10;
pub const COL_TZ_NAME: usize = 11;
pub const COL_TYPE: usize = 12;
pub const COL_SOURCE: usize = 13;

/// Fewest fields a record needs to carry the required columns.
pub const MIN_FIELDS: usize = COL_LON + 1;

/// OpenFlights' null marker.
const NULL_MARKER: &str = "\\N";

/// Coerces one record into an [`Airport`].
///
/// Required columns (id, latitude, longitude) must parse and be in range;
/// the error string says which one did not. Text columns are taken as-is.
/// Optional columns are best-effort: absent, empty, `\N` or unparseable
/// values become `None`.
pub fn to_airport(record: &StringRecord) -> Result<Airport, String> {
    if record.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {MIN_FIELDS} fields, found {}",
            record.len()
        ));
    }

    let id_raw = field(record, COL_ID);
    let airport_id: i32 = id_raw
        .parse()
        .map_err(|_| format!("airport_id `{id_raw}` is not an integer"))?;
    let lat = parse_coordinate(record, COL_LAT, "latitude")?;
    let lon = parse_coordinate(record, COL_LON, "longitude")?;
    let location = GeoPoint::new(lat, lon).map_err(|e| e.to_string())?;

    let mut airport = Airport::new(
        airport_id,
        field(record, COL_NAME),
        field(record, COL_CITY),
        field(record, COL_COUNTRY),
        location,
    );
    airport.iata = opt_text(record, COL_IATA);
    airport.icao = opt_text(record, COL_ICAO);
    airport.altitude = opt_text(record, COL_ALTITUDE)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.round() as i32);
    airport.timezone = opt_text(record, COL_TIMEZONE)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite());
    airport.dst = opt_text(record, COL_DST).and_then(|s| s.chars().next().map(String::from));
    airport.tz_database_time_zone = opt_text(record, COL_TZ_NAME);
    airport.airport_type = opt_text(record, COL_TYPE);
    airport.source = opt_text(record, COL_SOURCE);
    Ok(airport)
}

#[inline]
fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or_default()
}

fn parse_coordinate(record: &StringRecord, idx: usize, what: &str) -> Result<f64, String> {
    let raw = field(record, idx);
    raw.parse::<f64>()
        .map_err(|_| format!("{what} `{raw}` is not a number"))
}

fn opt_text(record: &StringRecord, idx: usize) -> Option<String> {
    match record.get(idx).map(str::trim) {
        None | Some("") | Some(NULL_MARKER) => None,
        Some(s) => Some(s.to_string()),
    }
}
