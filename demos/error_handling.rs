//! Error handling example for airportdb-rs
//!
//! This example demonstrates the error kinds callers see and which of them
//! leave the store untouched.

use airportdb_rs::prelude::*;

fn airport(id: i32, lat: f64, lon: f64) -> NewAirport {
    NewAirport {
        airport_id: id,
        name: format!("Field {id}"),
        city: "Somewhere".into(),
        country: "Nowhere".into(),
        latitude: lat,
        longitude: lon,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== airportdb-rs Error Handling Example ===\n");

    let svc = AirportService::new(MemoryStore::new());
    svc.insert_airport(airport(1, 10.0, 10.0)).await?;

    // Example 1: Invalid coordinates
    println!("--- Example 1: Out-of-range coordinates ---");
    for (lat, lon) in [(91.0, 0.0), (0.0, -180.5), (f64::NAN, 0.0)] {
        match svc.insert_airport(airport(2, lat, lon)).await {
            Ok(()) => println!("  ({lat}, {lon}) accepted"),
            Err(e) => println!("  ({lat}, {lon}) rejected: {e}"),
        }
    }
    println!();

    // Example 2: Duplicate id
    println!("--- Example 2: Duplicate airport id ---");
    match svc.insert_airport(airport(1, 20.0, 20.0)).await {
        Err(AirportError::Conflict(id)) => println!("  conflict on {id}, original kept"),
        other => println!("  unexpected: {other:?}"),
    }
    println!();

    // Example 3: Unknown origin vs. no neighbors
    println!("--- Example 3: Unknown origin vs. empty result ---");
    match svc.airports_within_radius(404, 1_000.0).await {
        Err(AirportError::NotFound(id)) => println!("  origin {id} not found"),
        other => println!("  unexpected: {other:?}"),
    }
    let empty = svc.airports_within_radius(1, 1_000.0).await?;
    println!("  origin 1 exists, {} neighbor(s)", empty.len());
    println!();

    // Example 4: Bad radius
    println!("--- Example 4: Negative radius ---");
    if let Err(e) = svc.airports_within_radius(1, -5.0).await {
        println!("  {e}");
    }
    println!();

    // Example 5: Partially bad bulk input
    println!("--- Example 5: Bulk load with bad lines ---");
    let text = "10,\"Ok\",\"X\",\"Y\",\\N,\\N,1.0,1.0\n\
                11,\"Bad lat\",\"X\",\"Y\",\\N,\\N,north,1.0\n\
                12,\"Short\"\n\
                1,\"Dup\",\"X\",\"Y\",\\N,\\N,2.0,2.0\n";
    let report = svc.bulk_insert(text).await?;
    println!("  inserted {}, skipped {}", report.inserted, report.skipped());
    for f in &report.failures {
        println!("  line {}: {}", f.line, f.reason);
    }

    Ok(())
}
