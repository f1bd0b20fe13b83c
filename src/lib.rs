//! airportdb-rs
//!
//! Umbrella crate for the workspace; re-exports [`airportdb_core`] so the
//! demos under `demos/` can `use airportdb_rs::prelude::*`.

pub use airportdb_core::*;
