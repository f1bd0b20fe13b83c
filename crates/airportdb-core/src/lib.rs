// crates/airportdb-core/src/lib.rs

pub mod config;
pub mod error;
pub mod export; // Map-ready views of a radius search
pub mod geo; // Points + haversine fallback
pub mod ingest; // Delimited-text parsing for bulk loads
pub mod model;
pub mod service; // The logical operations callers use
pub mod store; // Backends (PostGIS, memory)
pub mod traits;

// Re-exports
pub use crate::config::{Secrets, StoreConfig};
pub use crate::error::{AirportError, Result};
pub use crate::geo::{haversine_m, GeoPoint, EARTH_RADIUS_M};
pub use crate::ingest::{BulkReport, RowFailure};
pub use crate::model::{Airport, NewAirport, Neighbor, RadiusSearch};
pub use crate::service::AirportService;
pub use crate::store::MemoryStore;
#[cfg(feature = "postgis")]
pub use crate::store::PostgisStore;
// Export the Store Trait (Crucial for users!)
pub use crate::traits::SpatialStore;

/// Convenience imports for demos and downstream binaries.
pub mod prelude {
    pub use crate::{
        Airport, AirportError, AirportService, BulkReport, GeoPoint, MemoryStore, NewAirport,
        Neighbor, RadiusSearch, Result, SpatialStore, StoreConfig,
    };
    #[cfg(feature = "postgis")]
    pub use crate::PostgisStore;
}
