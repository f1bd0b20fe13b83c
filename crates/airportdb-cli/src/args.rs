use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for airportdb
#[derive(Debug, Parser)]
#[command(
    name = "airportdb",
    version,
    about = "Load airports and find the ones within a radius of an origin"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Use an in-process store instead of PostGIS (nothing is persisted)
    #[arg(long, global = true)]
    pub memory: bool,

    /// With --memory: bulk-load this file before running the command
    #[arg(long, global = true, requires = "memory", value_name = "FILE")]
    pub preload: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings. Each one overrides the secrets file.
#[derive(Debug, Args)]
pub struct DbArgs {
    /// JSON secrets file (db_host, db_port, db_user, db_password, db_name, ...)
    #[arg(long, global = true, env = "AIRPORTDB_SECRETS", value_name = "FILE")]
    pub secrets: Option<PathBuf>,

    #[arg(long, global = true, env = "AIRPORTDB_HOST")]
    pub host: Option<String>,

    #[arg(long, global = true, env = "AIRPORTDB_PORT")]
    pub port: Option<u16>,

    #[arg(long, global = true, env = "AIRPORTDB_USER")]
    pub user: Option<String>,

    #[arg(long, global = true, env = "AIRPORTDB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, global = true, env = "AIRPORTDB_NAME")]
    pub dbname: Option<String>,

    /// Seconds to wait for a connection
    #[arg(long, global = true, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Seconds one operation's statements may take
    #[arg(long, global = true, value_name = "SECS")]
    pub statement_timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the airports table and spatial index if missing
    Init,

    /// Insert a single airport
    Insert {
        #[arg(long)]
        id: i32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
        /// Latitude in decimal degrees [-90, 90]
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees [-180, 180]
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Bulk-load header-less delimited text (OpenFlights airports.dat layout)
    Load {
        /// Input file, or `-` for stdin
        path: PathBuf,

        /// List every skipped line with its reason
        #[arg(long)]
        show_skipped: bool,
    },

    /// List airports within a radius of an origin airport, nearest first
    #[command(group(ArgGroup::new("radius").args(["radius_km", "radius_m"])))]
    Nearby {
        /// airport_id of the origin
        id: i32,

        /// Radius in kilometers (default 500)
        #[arg(long)]
        radius_km: Option<f64>,

        /// Radius in meters
        #[arg(long)]
        radius_m: Option<f64>,

        /// Also write a GeoJSON FeatureCollection (origin, neighbors, arcs)
        #[arg(long, value_name = "FILE")]
        geojson: Option<PathBuf>,
    },

    /// Print one airport as JSON
    Show {
        id: i32,
    },
}
