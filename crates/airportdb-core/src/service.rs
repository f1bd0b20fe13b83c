// crates/airportdb-core/src/service.rs

//! # Airport service
//!
//! The operations the outside world calls: schema setup, manual insert, bulk
//! load, and radius search. Validation lives here; storage and distance math
//! live behind [`SpatialStore`].

use crate::error::{AirportError, Result};
use crate::ingest::{self, BulkReport, RowFailure};
use crate::model::{Airport, NewAirport, RadiusSearch};
use crate::traits::SpatialStore;

/// Front door over any [`SpatialStore`].
///
/// # Example
///
/// ```
/// use airportdb_core::{AirportService, MemoryStore, NewAirport};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let svc = AirportService::new(MemoryStore::new());
/// svc.init_schema().await.unwrap();
/// svc.insert_airport(NewAirport {
///     airport_id: 1,
///     name: "JFK".into(),
///     city: "New York".into(),
///     country: "United States".into(),
///     latitude: 40.6413,
///     longitude: -73.7781,
/// })
/// .await
/// .unwrap();
/// let hits = svc.airports_within_radius(1, 100_000.0).await.unwrap();
/// assert!(hits.neighbors.is_empty());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct AirportService<S> {
    store: S,
}

impl<S: SpatialStore> AirportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ensures the airports relation and its spatial index exist.
    /// Safe to call on every start.
    pub async fn init_schema(&self) -> Result<()> {
        self.store.init_schema().await
    }

    /// Validates and stores one manually entered airport.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for blank name/city/country or out-of-range
    ///   coordinates (nothing is written)
    /// - `Conflict` when the id exists
    /// - `Unavailable` when the store cannot be reached
    pub async fn insert_airport(&self, input: NewAirport) -> Result<()> {
        let airport = input.into_airport()?;
        self.store.insert(&airport).await?;
        log::info!("inserted airport {} ({})", airport.airport_id, airport.name);
        Ok(())
    }

    /// Loads header-less delimited text, best effort.
    ///
    /// Lines that fail to parse, coerce, or insert are collected in the
    /// report and never abort the batch; nothing is rolled back.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when `text` is empty or blank
    /// - `Unavailable` when the batch could not start
    pub async fn bulk_insert(&self, text: &str) -> Result<BulkReport> {
        if text.trim().is_empty() {
            return Err(AirportError::invalid("bulk input is empty"));
        }

        // 1. Parse (lines rejected here never reach the store)
        let batch = ingest::parse(text);
        log::debug!(
            "parsed {} rows ({} rejected), delimiter {:?}",
            batch.rows.len(),
            batch.failures.len(),
            batch.delimiter as char
        );

        // 2. Insert
        let outcomes = if batch.rows.is_empty() {
            Vec::new()
        } else {
            self.store.insert_many(&batch.airports()).await?
        };

        // 3. Fold into a report
        let mut report = batch.rows.into_iter().zip(outcomes).fold(
            BulkReport {
                inserted: 0,
                failures: batch.failures,
            },
            |mut report, (row, outcome)| {
                match outcome {
                    Ok(()) => report.inserted += 1,
                    Err(e) => report.failures.push(RowFailure {
                        line: row.line,
                        raw: row.raw,
                        reason: e.to_string(),
                    }),
                }
                report
            },
        );
        report.failures.sort_by_key(|f| f.line);

        for f in &report.failures {
            log::warn!("skipped line {}: {}", f.line, f.reason);
        }
        log::info!(
            "bulk insert: {} inserted, {} skipped",
            report.inserted,
            report.skipped()
        );
        Ok(report)
    }

    /// Fetches a single airport.
    pub async fn airport(&self, airport_id: i32) -> Result<Airport> {
        self.store
            .find(airport_id)
            .await?
            .ok_or(AirportError::NotFound(airport_id))
    }

    /// Every other airport within `radius_m` meters of the origin, nearest
    /// first. The origin is never part of its own result.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a negative or non-finite radius
    /// - `NotFound` when the origin does not exist (a found origin with no
    ///   neighbors is `Ok` with an empty list)
    pub async fn airports_within_radius(
        &self,
        airport_id: i32,
        radius_m: f64,
    ) -> Result<RadiusSearch> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(AirportError::invalid(format!(
                "radius must be a non-negative number of meters, got {radius_m}"
            )));
        }
        let found = self
            .store
            .find_within_radius(airport_id, radius_m)
            .await?
            .ok_or(AirportError::NotFound(airport_id))?;
        log::debug!(
            "{} airports within {radius_m} m of {airport_id}",
            found.neighbors.len()
        );
        Ok(found)
    }
}
