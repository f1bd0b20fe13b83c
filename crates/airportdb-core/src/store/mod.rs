// crates/airportdb-core/src/store/mod.rs

//! # Store backends
//!
//! Implementations of [`SpatialStore`]. The PostGIS backend is feature gated
//! (`postgis`, on by default); the memory backend is always compiled.

use crate::error::Result;
use crate::model::{Airport, RadiusSearch};
use crate::traits::SpatialStore;
use std::sync::Arc;

mod memory;
#[cfg(feature = "postgis")]
mod postgis;

pub use memory::MemoryStore;
#[cfg(feature = "postgis")]
pub use postgis::{PostgisStore, TABLE};

// Forwarding impls so callers can pick a backend at runtime
// (`Box<dyn SpatialStore>`) or share one (`Arc<S>`).
macro_rules! forward_store {
    ($ptr:ident) => {
        #[async_trait::async_trait]
        impl<S: SpatialStore + ?Sized> SpatialStore for $ptr<S> {
            async fn init_schema(&self) -> Result<()> {
                (**self).init_schema().await
            }

            async fn insert(&self, airport: &Airport) -> Result<()> {
                (**self).insert(airport).await
            }

            async fn insert_many(&self, airports: &[Airport]) -> Result<Vec<Result<()>>> {
                (**self).insert_many(airports).await
            }

            async fn find(&self, airport_id: i32) -> Result<Option<Airport>> {
                (**self).find(airport_id).await
            }

            async fn find_within_radius(
                &self,
                origin_id: i32,
                radius_m: f64,
            ) -> Result<Option<RadiusSearch>> {
                (**self).find_within_radius(origin_id, radius_m).await
            }
        }
    };
}

forward_store!(Box);
forward_store!(Arc);
