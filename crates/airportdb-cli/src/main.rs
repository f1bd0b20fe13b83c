//! airportdb — command-line interface for airportdb-core
//!
//! Loads airports into a spatial store and answers "which airports lie
//! within R of airport X" queries from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Create the table and spatial index
//!   $ airportdb --secrets secrets.json init
//!
//! - Bulk-load an OpenFlights `airports.dat`
//!   $ airportdb load airports.dat --show-skipped
//!
//! - Insert one airport
//!   $ airportdb insert --id 9001 --name "Test Field" --city X --country Y --lat 10 --lon -20
//!
//! - Airports within 100 km of JFK (OpenFlights id 3797), plus a GeoJSON map
//!   $ airportdb nearby 3797 --radius-km 100 --geojson jfk.geojson
//!
//! - Try it without a database
//!   $ airportdb --memory --preload airports.dat nearby 3797
//!
//! Connection settings
//! -------------------
//!
//! Defaults, then the `--secrets` JSON file, then `--host`/`--port`/... flags
//! (or their `AIRPORTDB_*` environment variables). Later layers win.
mod args;

use crate::args::{CliArgs, Commands, DbArgs};
use airportdb_core::export::to_geojson;
use airportdb_core::prelude::*;
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::time::Duration;

const DEFAULT_RADIUS_KM: f64 = 500.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let store = open_store(&args)?;
    let svc = AirportService::new(store);
    svc.init_schema().await?;

    if let Some(path) = &args.preload {
        let report = svc.bulk_insert(&read_input(path)?).await?;
        log::info!(
            "preloaded {} airports ({} skipped)",
            report.inserted,
            report.skipped()
        );
    }

    match args.command {
        Commands::Init => {
            println!("Schema ready.");
        }

        Commands::Insert {
            id,
            name,
            city,
            country,
            lat,
            lon,
        } => {
            svc.insert_airport(NewAirport {
                airport_id: id,
                name,
                city,
                country,
                latitude: lat,
                longitude: lon,
            })
            .await?;
            println!("Inserted airport {id}.");
        }

        Commands::Load { path, show_skipped } => {
            let text = read_input(&path)?;
            let report = svc.bulk_insert(&text).await?;
            println!(
                "Inserted {} of {} records ({} skipped).",
                report.inserted,
                report.total(),
                report.skipped()
            );
            if show_skipped {
                for f in &report.failures {
                    println!("  line {}: {}", f.line, f.reason);
                }
            }
        }

        Commands::Nearby {
            id,
            radius_km,
            radius_m,
            geojson,
        } => {
            let radius_m = radius_m.unwrap_or(radius_km.unwrap_or(DEFAULT_RADIUS_KM) * 1000.0);
            let search = svc.airports_within_radius(id, radius_m).await?;
            print_search(&search);

            if let Some(path) = geojson {
                let json = serde_json::to_string_pretty(&to_geojson(&search))?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("GeoJSON written to {}", path.display());
            }
        }

        Commands::Show { id } => {
            let airport = svc.airport(id).await?;
            println!("{}", serde_json::to_string_pretty(&airport)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    // RUST_LOG, when set, takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn open_store(args: &CliArgs) -> anyhow::Result<Box<dyn SpatialStore>> {
    if args.memory {
        log::info!("using in-memory store");
        return Ok(Box::new(MemoryStore::new()));
    }
    let config = store_config(&args.db)?;
    log::debug!("store config: {config:?}");

    #[cfg(feature = "postgis")]
    {
        Ok(Box::new(PostgisStore::new(config)))
    }
    #[cfg(not(feature = "postgis"))]
    {
        let _ = config;
        anyhow::bail!("built without the `postgis` feature; use --memory")
    }
}

/// Defaults, then the secrets file, then flags / environment.
fn store_config(db: &DbArgs) -> anyhow::Result<StoreConfig> {
    let mut config = match &db.secrets {
        Some(path) => StoreConfig::from_secrets_file(path)
            .with_context(|| format!("loading secrets from {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(v) = &db.host {
        config.host = v.clone();
    }
    if let Some(v) = db.port {
        config.port = v;
    }
    if let Some(v) = &db.user {
        config.user = v.clone();
    }
    if let Some(v) = &db.password {
        config.password = v.clone();
    }
    if let Some(v) = &db.dbname {
        config.dbname = v.clone();
    }
    if let Some(v) = db.connect_timeout {
        config.connect_timeout = Duration::from_secs(v);
    }
    if let Some(v) = db.statement_timeout {
        config.statement_timeout = Duration::from_secs(v);
    }
    config.validate()?;
    Ok(config)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("reading stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_search(search: &RadiusSearch) {
    let o = &search.origin;
    println!(
        "Within {:.1} km of {} {} ({}, {}): {} airport(s)",
        search.radius_m / 1000.0,
        o.airport_id,
        o.name,
        o.city,
        o.country,
        search.len()
    );
    for n in &search.neighbors {
        println!(
            "{:>10.2} km  {:>6}  {} ({}, {})",
            n.distance_km(),
            n.airport_id,
            n.name,
            n.city,
            n.country
        );
    }
}
