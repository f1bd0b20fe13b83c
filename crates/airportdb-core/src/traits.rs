// crates/airportdb-core/src/traits.rs
use crate::error::Result;
use crate::model::{Airport, RadiusSearch};

/// Storage abstraction: where airports live and how distances are computed.
///
/// Two implementations ship with the crate:
/// - [`PostgisStore`](crate::store::PostgisStore) delegates point storage, the
///   spatial index and spherical distance to PostGIS.
/// - [`MemoryStore`](crate::store::MemoryStore) keeps rows in a map and scans
///   them with the haversine formula.
///
/// Every method is one logical operation. Implementations that talk to a
/// server open a connection per call and release it before returning.
#[async_trait::async_trait]
pub trait SpatialStore: Send + Sync {
    /// Creates the airports relation and its spatial index if absent.
    /// Calling it again is a no-op.
    async fn init_schema(&self) -> Result<()>;

    /// Stores one airport.
    ///
    /// Fails with [`Conflict`](crate::AirportError::Conflict) when the id is
    /// already taken; the existing row is left untouched.
    async fn insert(&self, airport: &Airport) -> Result<()>;

    /// Stores each airport independently, in order.
    ///
    /// The outer error means the batch could not start at all (for example
    /// the store is unreachable). Otherwise the returned vector has one entry
    /// per input airport; a failed entry does not stop the ones after it and
    /// nothing is rolled back.
    async fn insert_many(&self, airports: &[Airport]) -> Result<Vec<Result<()>>>;

    /// Fetches one airport by id.
    async fn find(&self, airport_id: i32) -> Result<Option<Airport>>;

    /// Every airport other than the origin whose great-circle distance to the
    /// origin is at most `radius_m`, nearest first.
    ///
    /// Returns `Ok(None)` when the origin itself does not exist.
    async fn find_within_radius(
        &self,
        origin_id: i32,
        radius_m: f64,
    ) -> Result<Option<RadiusSearch>>;
}
