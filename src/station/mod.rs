//! MRT station subsystem.
//!
//! Loads station and route geometry from Taipei open data, with a built-in
//! fallback dataset and fuzzy name resolution for offline use.

pub mod fetch;
pub mod geojson;
pub mod resolver;
pub mod types;

pub use resolver::StationResolver;
pub use types::{RouteLine, Station, StationError, StationSource};
