//! Core types for the station subsystem.

use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a station record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationSource {
    OpenData,
    Builtin,
    Manual,
}

impl fmt::Display for StationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenData => write!(f, "Open data"),
            Self::Builtin => write!(f, "Built-in"),
            Self::Manual => write!(f, "Manual"),
        }
    }
}

/// An MRT station with its position and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub source: StationSource,
    /// Line names this station serves, when known (built-in records only;
    /// the open-data station layer does not carry line membership).
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Station {
    pub fn latlng(&self) -> LatLng {
        LatLng { lat: self.lat, lon: self.lon }
    }
}

/// A route polyline with its display color.
#[derive(Debug, Clone, Serialize)]
pub struct RouteLine {
    pub name: String,
    /// Hex color keyed off the route name; unrecognized lines get a
    /// neutral grey.
    pub color: String,
    pub points: Vec<LatLng>,
}

/// Station subsystem errors.
#[derive(Debug)]
pub enum StationError {
    Network(String),
    InvalidResponse(String),
    NotFound(String),
    NoInput,
}

impl fmt::Display for StationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid open-data response: {}", msg),
            Self::NotFound(q) => write!(f, "Station not found: '{}'", q),
            Self::NoInput => write!(f, "No station specified. Use --station or --lat/--lon"),
        }
    }
}

impl std::error::Error for StationError {}
