// crates/airportdb-core/src/export.rs

//! Map-ready output for a [`RadiusSearch`]: a GeoJSON `FeatureCollection`
//! with the origin point, one point per neighbor, and one line from the
//! origin to each neighbor. Any GeoJSON viewer can draw it.

use crate::model::RadiusSearch;
use serde_json::{json, Value};

/// Builds the GeoJSON document. Coordinates are `[lon, lat]` per RFC 7946.
pub fn to_geojson(search: &RadiusSearch) -> Value {
    let o = &search.origin;
    let origin_xy = [o.longitude, o.latitude];

    let mut features = Vec::with_capacity(1 + 2 * search.neighbors.len());
    features.push(json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": origin_xy },
        "properties": {
            "role": "origin",
            "airport_id": o.airport_id,
            "name": o.name,
            "city": o.city,
            "country": o.country,
            "radius_m": search.radius_m,
        }
    }));

    for n in &search.neighbors {
        let xy = [n.longitude, n.latitude];
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": xy },
            "properties": {
                "role": "neighbor",
                "airport_id": n.airport_id,
                "name": n.name,
                "city": n.city,
                "country": n.country,
                "distance_m": n.distance_m,
            }
        }));
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [origin_xy, xy] },
            "properties": {
                "role": "arc",
                "from": o.airport_id,
                "to": n.airport_id,
                "distance_km": (n.distance_km() * 100.0).round() / 100.0,
            }
        }));
    }

    json!({ "type": "FeatureCollection", "features": features })
}
