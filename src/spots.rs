//! Curated tourist-spot dataset (embedded, immutable).

use crate::geo::LatLng;
use serde::Serialize;

struct SpotRecord {
    name: &'static str,
    category: &'static str,
    lat: f64,
    lon: f64,
    notes: Option<&'static str>,
}

const SPOTS: &[SpotRecord] = &[
    SpotRecord {
        name: "Taipei 101", category: "Landmark",
        lat: 25.033968, lon: 121.564468, notes: None,
    },
    SpotRecord {
        name: "Elephant Mountain Trailhead", category: "Hike/View",
        lat: 25.0270, lon: 121.5705, notes: Some("Best Taipei 101 viewpoint"),
    },
    SpotRecord {
        name: "Chiang Kai-shek Memorial Hall", category: "Historic",
        lat: 25.0345, lon: 121.5217, notes: None,
    },
    SpotRecord {
        name: "Longshan Temple", category: "Temple",
        lat: 25.0369, lon: 121.4997, notes: None,
    },
    SpotRecord {
        name: "Ximending Pedestrian Area", category: "Shopping",
        lat: 25.0426, lon: 121.5069, notes: None,
    },
    SpotRecord {
        name: "The Red House (Ximen)", category: "Art/Culture",
        lat: 25.0422, lon: 121.5063, notes: None,
    },
    SpotRecord {
        name: "Daan Forest Park", category: "Park",
        lat: 25.0323, lon: 121.5345, notes: None,
    },
    SpotRecord {
        name: "Huashan 1914 Creative Park", category: "Art/Culture",
        lat: 25.0440, lon: 121.5290, notes: None,
    },
    SpotRecord {
        name: "Shilin Night Market", category: "Night Market",
        lat: 25.0880, lon: 121.5250, notes: None,
    },
    SpotRecord {
        name: "Raohe Night Market", category: "Night Market",
        lat: 25.0501, lon: 121.5770, notes: None,
    },
    SpotRecord {
        name: "National Palace Museum", category: "Museum",
        lat: 25.1024, lon: 121.5485, notes: None,
    },
    SpotRecord {
        name: "Taipei Zoo", category: "Zoo",
        lat: 24.9987, lon: 121.5810, notes: None,
    },
];

/// A named, categorized point of interest. Name is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PointOfInterest {
    pub fn latlng(&self) -> LatLng {
        LatLng { lat: self.lat, lon: self.lon }
    }
}

fn to_poi(r: &SpotRecord) -> PointOfInterest {
    PointOfInterest {
        name: r.name.to_string(),
        category: r.category.to_string(),
        lat: r.lat,
        lon: r.lon,
        notes: r.notes.map(|n| n.to_string()),
    }
}

/// The full curated spot list, in source order.
pub fn all_spots() -> Vec<PointOfInterest> {
    SPOTS.iter().map(to_poi).collect()
}

/// Distinct categories, sorted (drives the category filter choices).
pub fn categories() -> Vec<String> {
    let mut cats: Vec<String> = SPOTS.iter().map(|s| s.category.to_string()).collect();
    cats.sort();
    cats.dedup();
    cats
}

/// Look up a spot by name, case-insensitive.
pub fn spot_by_name(name: &str) -> Option<PointOfInterest> {
    let q = name.to_lowercase();
    SPOTS.iter().find(|s| s.name.to_lowercase() == q).map(to_poi)
}
