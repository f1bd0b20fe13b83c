//! Basic usage example for airportdb-rs
//!
//! This example demonstrates how to:
//! - Insert airports one by one
//! - Bulk-load OpenFlights-style text and read the report
//! - Run radius searches and read distances
//! - Export a search as GeoJSON
//!
//! Runs against the in-memory store, so no database is needed.

use airportdb_rs::export::to_geojson;
use airportdb_rs::prelude::*;

const AIRPORTS_DAT: &str = r#"3797,"John F Kennedy International Airport","New York","United States","JFK","KJFK",40.63980103,-73.77890015,13,-5,"A","America/New_York","airport","OurAirports"
3697,"La Guardia Airport","New York","United States","LGA","KLGA",40.77719879,-73.87259674,21,-5,"A","America/New_York","airport","OurAirports"
3494,"Newark Liberty International Airport","Newark","United States","EWR","KEWR",40.692501068115234,-74.168701171875,18,-5,"A","America/New_York","airport","OurAirports"
3448,"General Edward Lawrence Logan International Airport","Boston","United States","BOS","KBOS",42.36429977,-71.00520325,20,-5,"A","America/New_York","airport","OurAirports"
507,"London Heathrow Airport","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E","Europe/London","airport","OurAirports"
"#;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== airportdb-rs Basic Usage Example ===\n");

    let svc = AirportService::new(MemoryStore::new());
    svc.init_schema().await?;

    // Example 1: Bulk load
    println!("--- Example 1: Bulk-load OpenFlights rows ---");
    let report = svc.bulk_insert(AIRPORTS_DAT).await?;
    println!(
        "Inserted {} of {} ({} skipped)\n",
        report.inserted,
        report.total(),
        report.skipped()
    );

    // Example 2: Manual insert
    println!("--- Example 2: Insert one airport ---");
    svc.insert_airport(NewAirport {
        airport_id: 9001,
        name: "Republic Airport".into(),
        city: "Farmingdale".into(),
        country: "United States".into(),
        latitude: 40.7288,
        longitude: -73.4134,
    })
    .await?;
    let added = svc.airport(9001).await?;
    println!(
        "{} ({}, {}) type={:?} source={:?}\n",
        added.name, added.city, added.country, added.airport_type, added.source
    );

    // Example 3: Radius search
    println!("--- Example 3: Airports within 100 km of JFK ---");
    let near = svc.airports_within_radius(3797, 100_000.0).await?;
    for n in &near.neighbors {
        println!("  {:>8.2} km  {}", n.distance_km(), n.name);
    }
    println!();

    // Example 4: Widening the radius
    println!("--- Example 4: Growing the radius ---");
    for km in [50.0, 500.0, 6_000.0] {
        let hits = svc.airports_within_radius(3797, km * 1000.0).await?;
        println!("  {km:>6} km: {} airport(s)", hits.len());
    }
    println!();

    // Example 5: GeoJSON for a map
    println!("--- Example 5: GeoJSON export ---");
    let geojson = to_geojson(&near);
    let features = geojson["features"].as_array().map_or(0, Vec::len);
    println!("FeatureCollection with {features} features");

    println!("\n=== Example completed successfully ===");
    Ok(())
}
