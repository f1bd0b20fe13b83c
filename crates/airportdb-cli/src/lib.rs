//! airportdb-cli
//! =============
//!
//! Command-line interface for the `airportdb-core` airport store.
//!
//! This crate primarily provides a binary (`airportdb`). The library target
//! exists so docs render an overview page. See the README for full usage.
//!
//! Quick start
//! -----------
//!
//! ```text
//! airportdb --help
//! airportdb --secrets secrets.json init
//! airportdb --secrets secrets.json load airports.dat
//! airportdb --secrets secrets.json nearby 3797 --radius-km 100
//! airportdb --memory --preload airports.dat nearby 507 --geojson lhr.geojson
//! ```
//!
//! For programmatic access (inserts, bulk loads, radius searches) use the
//! `airportdb-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// No API here; the binary is the deliverable.
