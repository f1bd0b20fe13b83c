// crates/airportdb-core/src/store/memory.rs
use crate::error::{AirportError, Result};
use crate::geo::GeoPoint;
use crate::model::{Airport, Neighbor, RadiusSearch};
use crate::traits::SpatialStore;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Non-spatial backend: a map keyed by id, searched by full scan with the
/// haversine formula.
///
/// Trades the index-accelerated search of PostGIS for zero setup. Useful for
/// tests, demos, and small datasets.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<BTreeMap<i32, Airport>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row count. A poisoned lock still holds every committed row, so it is
    /// read through.
    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<i32, Airport>>> {
        self.rows
            .read()
            .map_err(|_| AirportError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<i32, Airport>>> {
        self.rows
            .write()
            .map_err(|_| AirportError::Unavailable("memory store lock poisoned".into()))
    }

    fn insert_locked(rows: &mut BTreeMap<i32, Airport>, airport: &Airport) -> Result<()> {
        GeoPoint::new(airport.latitude, airport.longitude)?;
        match rows.entry(airport.airport_id) {
            Entry::Occupied(_) => Err(AirportError::Conflict(airport.airport_id)),
            Entry::Vacant(slot) => {
                slot.insert(airport.clone());
                Ok(())
            }
        }
    }
}

#[async_trait::async_trait]
impl SpatialStore for MemoryStore {
    async fn init_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, airport: &Airport) -> Result<()> {
        let mut rows = self.write()?;
        Self::insert_locked(&mut rows, airport)
    }

    async fn insert_many(&self, airports: &[Airport]) -> Result<Vec<Result<()>>> {
        let mut rows = self.write()?;
        Ok(airports
            .iter()
            .map(|a| Self::insert_locked(&mut rows, a))
            .collect())
    }

    async fn find(&self, airport_id: i32) -> Result<Option<Airport>> {
        Ok(self.read()?.get(&airport_id).cloned())
    }

    async fn find_within_radius(
        &self,
        origin_id: i32,
        radius_m: f64,
    ) -> Result<Option<RadiusSearch>> {
        let rows = self.read()?;
        let origin = match rows.get(&origin_id) {
            Some(o) => o.clone(),
            None => return Ok(None),
        };
        let center = origin.location();

        let mut neighbors: Vec<Neighbor> = rows
            .values()
            .filter(|a| a.airport_id != origin_id)
            .map(|a| (a, center.haversine_m(&a.location())))
            .filter(|(_, d)| *d <= radius_m)
            .map(|(a, d)| Neighbor::of(a, d))
            .collect();
        neighbors.sort_by(|a, b| {
            a.distance_m
                .total_cmp(&b.distance_m)
                .then(a.airport_id.cmp(&b.airport_id))
        });

        Ok(Some(RadiusSearch {
            origin,
            radius_m,
            neighbors,
        }))
    }
}
