// crates/airportdb-core/src/store/postgis.rs
#![cfg(feature = "postgis")]

use crate::config::StoreConfig;
use crate::error::{AirportError, Result};
use crate::geo::SRID;
use crate::model::{Airport, Neighbor, RadiusSearch};
use crate::traits::SpatialStore;
use const_format::concatcp;
use std::error::Error as _;
use std::future::Future;
use std::time::Duration;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls, Row};

pub const TABLE: &str = "airports";
const INDEX: &str = "airports_location_gist";

// -----------------------------------------------------------------------------
// SQL
// -----------------------------------------------------------------------------

#[rustfmt::skip]
const SCHEMA: &str = concatcp!(
    "CREATE EXTENSION IF NOT EXISTS postgis; ",
    "CREATE TABLE IF NOT EXISTS ", TABLE, " (",
        "airport_id            INTEGER PRIMARY KEY, ",
        "name                  VARCHAR(200), ",
        "city                  VARCHAR(100), ",
        "country               VARCHAR(100), ",
        "iata                  VARCHAR(10), ",
        "icao                  VARCHAR(10), ",
        "latitude              DOUBLE PRECISION NOT NULL, ",
        "longitude             DOUBLE PRECISION NOT NULL, ",
        "altitude              INTEGER, ",
        "timezone              DOUBLE PRECISION, ",
        "dst                   CHAR(1), ",
        "tz_database_time_zone VARCHAR(50), ",
        "type                  VARCHAR(20), ",
        "source                VARCHAR(50), ",
        "location              GEOGRAPHY(Point, ", SRID, ") NOT NULL",
    "); ",
    "CREATE INDEX IF NOT EXISTS ", INDEX, " ON ", TABLE, " USING GIST (location);"
);

// $7/$8 feed both the scalar columns and the point, so they cannot disagree.
#[rustfmt::skip]
const INSERT: &str = concatcp!(
    "INSERT INTO ", TABLE, " (",
        "airport_id, name, city, country, iata, icao, latitude, longitude, ",
        "altitude, timezone, dst, tz_database_time_zone, type, source, location",
    ") VALUES (",
        "$1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, ",
        "ST_SetSRID(ST_MakePoint($8, $7), ", SRID, ")::geography",
    ")"
);

#[rustfmt::skip]
const SELECT_ONE: &str = concatcp!(
    "SELECT airport_id, name, city, country, iata, icao, latitude, longitude, ",
           "altitude, timezone, dst, tz_database_time_zone, type, source ",
    "FROM   ", TABLE, " ",
    "WHERE  airport_id = $1"
);

// use_spheroid = false: both the filter and the reported distance are
// spherical, matching the haversine fallback.
#[rustfmt::skip]
const WITHIN_RADIUS: &str = concatcp!(
    "WITH origin AS (",
        "SELECT ST_SetSRID(ST_MakePoint($2, $1), ", SRID, ")::geography AS g",
    ") ",
    "SELECT   a.airport_id, a.name, a.city, a.country, a.latitude, a.longitude, ",
             "ST_Distance(a.location, origin.g, false) AS distance_m ",
    "FROM     ", TABLE, " a, origin ",
    "WHERE    ST_DWithin(a.location, origin.g, $3, false) ",
    "AND      a.airport_id <> $4 ",
    "ORDER BY distance_m ASC, a.airport_id ASC"
);

// -----------------------------------------------------------------------------
// STORE
// -----------------------------------------------------------------------------

/// PostgreSQL + PostGIS backend.
///
/// Holds only configuration. Each trait method opens a fresh connection and
/// drops it on return. `statement_timeout` bounds every statement, both on
/// the server and in the client; a bulk insert bounds each row on its own.
#[derive(Debug, Clone)]
pub struct PostgisStore {
    config: StoreConfig,
}

impl PostgisStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    async fn connect(&self) -> Result<Client> {
        let cfg = &self.config;
        log::debug!(
            "connecting to postgres {}@{}:{}/{}",
            cfg.user,
            cfg.host,
            cfg.port,
            cfg.dbname
        );
        let (client, connection) = tokio_postgres::Config::new()
            .host(&cfg.host)
            .port(cfg.port)
            .user(&cfg.user)
            .password(&cfg.password)
            .dbname(&cfg.dbname)
            .connect_timeout(cfg.connect_timeout)
            .options(&format!(
                "-c statement_timeout={}",
                cfg.statement_timeout.as_millis()
            ))
            .connect(NoTls)
            .await
            .map_err(|e| AirportError::Unavailable(e.to_string()))?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::warn!("postgres connection error: {e}");
            }
        });
        Ok(client)
    }

    /// Connects, then runs `op` under the statement timeout.
    async fn with_client<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnOnce(Client) -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let client = self.connect().await?;
        bounded(self.config.statement_timeout, op(client)).await
    }
}

#[async_trait::async_trait]
impl SpatialStore for PostgisStore {
    async fn init_schema(&self) -> Result<()> {
        self.with_client(|client| async move {
            client.batch_execute(SCHEMA).await.map_err(classify)?;
            log::info!("schema ready ({TABLE}, {INDEX})");
            Ok(())
        })
        .await
    }

    async fn insert(&self, airport: &Airport) -> Result<()> {
        let airport = airport.clone();
        self.with_client(|client| async move { insert_row(&client, INSERT, &airport).await })
            .await
    }

    async fn insert_many(&self, airports: &[Airport]) -> Result<Vec<Result<()>>> {
        let limit = self.config.statement_timeout;
        let client = self.connect().await?;
        let stmt = bounded(limit, async {
            client.prepare(INSERT).await.map_err(classify)
        })
        .await?;
        Ok(insert_each(limit, airports, |airport| {
            insert_row(&client, &stmt, airport)
        })
        .await)
    }

    async fn find(&self, airport_id: i32) -> Result<Option<Airport>> {
        self.with_client(|client| async move {
            let row = client
                .query_opt(SELECT_ONE, &[&airport_id])
                .await
                .map_err(classify)?;
            row.as_ref().map(airport_from_row).transpose()
        })
        .await
    }

    async fn find_within_radius(
        &self,
        origin_id: i32,
        radius_m: f64,
    ) -> Result<Option<RadiusSearch>> {
        self.with_client(|client| async move {
            let origin = match client
                .query_opt(SELECT_ONE, &[&origin_id])
                .await
                .map_err(classify)?
            {
                Some(row) => airport_from_row(&row)?,
                None => return Ok(None),
            };
            let neighbors = client
                .query(
                    WITHIN_RADIUS,
                    &[&origin.latitude, &origin.longitude, &radius_m, &origin_id],
                )
                .await
                .map_err(classify)?
                .iter()
                .map(neighbor_from_row)
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(RadiusSearch {
                origin,
                radius_m,
                neighbors,
            }))
        })
        .await
    }
}

// -----------------------------------------------------------------------------
// TIMEOUTS
// -----------------------------------------------------------------------------

async fn bounded<T>(limit: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| AirportError::Unavailable(format!("statement timed out after {limit:?}")))?
}

/// Runs `op` for each airport in order, each under its own `limit`. A row
/// that times out fails alone; the rows after it still run.
async fn insert_each<'a, F, Fut>(
    limit: Duration,
    airports: &'a [Airport],
    mut op: F,
) -> Vec<Result<()>>
where
    F: FnMut(&'a Airport) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut outcomes = Vec::with_capacity(airports.len());
    for airport in airports {
        outcomes.push(bounded(limit, op(airport)).await);
    }
    outcomes
}

// -----------------------------------------------------------------------------
// ROW HELPERS
// -----------------------------------------------------------------------------

async fn insert_row<S>(client: &Client, stmt: &S, a: &Airport) -> Result<()>
where
    S: tokio_postgres::ToStatement + ?Sized + Sync,
{
    client
        .execute(
            stmt,
            &[
                &a.airport_id,
                &a.name,
                &a.city,
                &a.country,
                &a.iata,
                &a.icao,
                &a.latitude,
                &a.longitude,
                &a.altitude,
                &a.timezone,
                &a.dst,
                &a.tz_database_time_zone,
                &a.airport_type,
                &a.source,
            ],
        )
        .await
        .map_err(|e| match e.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                AirportError::Conflict(a.airport_id)
            }
            _ => classify(e),
        })?;
    log::debug!("inserted airport {}", a.airport_id);
    Ok(())
}

fn airport_from_row(row: &Row) -> Result<Airport> {
    Ok(Airport {
        airport_id: row.try_get("airport_id").map_err(decode)?,
        name: text(row, "name")?,
        city: text(row, "city")?,
        country: text(row, "country")?,
        iata: row.try_get("iata").map_err(decode)?,
        icao: row.try_get("icao").map_err(decode)?,
        latitude: row.try_get("latitude").map_err(decode)?,
        longitude: row.try_get("longitude").map_err(decode)?,
        altitude: row.try_get("altitude").map_err(decode)?,
        timezone: row.try_get("timezone").map_err(decode)?,
        dst: row.try_get("dst").map_err(decode)?,
        tz_database_time_zone: row.try_get("tz_database_time_zone").map_err(decode)?,
        airport_type: row.try_get("type").map_err(decode)?,
        source: row.try_get("source").map_err(decode)?,
    })
}

fn neighbor_from_row(row: &Row) -> Result<Neighbor> {
    Ok(Neighbor {
        airport_id: row.try_get("airport_id").map_err(decode)?,
        name: text(row, "name")?,
        city: text(row, "city")?,
        country: text(row, "country")?,
        latitude: row.try_get("latitude").map_err(decode)?,
        longitude: row.try_get("longitude").map_err(decode)?,
        distance_m: row.try_get("distance_m").map_err(decode)?,
    })
}

/// Name/city/country are nullable in the table; read NULL as empty.
fn text(row: &Row, col: &str) -> Result<String> {
    Ok(row
        .try_get::<_, Option<String>>(col)
        .map_err(decode)?
        .unwrap_or_default())
}

/// Engine errors carry a SQLSTATE; a closed or broken socket means the
/// server is gone.
fn classify(e: tokio_postgres::Error) -> AirportError {
    if let Some(db) = e.as_db_error() {
        return AirportError::Storage(format!("{} ({})", db.message(), db.code().code()));
    }
    let io = e.source().is_some_and(|s| s.is::<std::io::Error>());
    if e.is_closed() || io {
        AirportError::Unavailable(e.to_string())
    } else {
        AirportError::Storage(e.to_string())
    }
}

/// A column did not hold the type the row mapping expects.
fn decode(e: tokio_postgres::Error) -> AirportError {
    AirportError::Storage(format!("unexpected column value: {e}"))
}
