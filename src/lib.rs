//! Taipei Nearby — MRT & tourist-spot proximity explorer.
//!
//! Wires a curated spot dataset and Taipei open-data MRT geometry into a
//! proximity search and filtering engine: pick a reference station (or raw
//! coordinates), filter spots by category and free-text search, and rank
//! everything within a radius by great-circle distance.

pub mod engine;
pub mod geo;
pub mod spots;
pub mod station;
