//! Tolerant GeoJSON ingestion for Taipei open data.
//!
//! The upstream datasets are inconsistent: sometimes a FeatureCollection,
//! sometimes a bare array of features, and property keys vary by dataset
//! revision (English, ALL-CAPS, or Chinese). Everything here probes rather
//! than assumes, and malformed features are dropped, never raised.

use crate::geo::LatLng;
use serde_json::Value;

/// Station-name property keys seen across TW open-data revisions,
/// in probe order.
pub const STATION_NAME_KEYS: &[&str] = &[
    "車站名稱",
    "StationName",
    "STATIONNAME",
    "name",
    "NAME",
    "站名",
    "station_name",
    "中文站名",
    "Station",
];

/// Route-name property keys, in probe order.
pub const ROUTE_NAME_KEYS: &[&str] = &[
    "RouteName",
    "ROUTENAME",
    "route_name",
    "name",
    "名稱",
    "路線名稱",
];

/// Ordered-fallback property lookup: the first candidate key with a
/// present, non-empty value wins. Numeric scalars are stringified.
pub fn pick_prop(props: &Value, keys: &[&str]) -> Option<String> {
    let map = props.as_object()?;
    for key in keys {
        match map.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string());
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Normalize a response into its feature list: accepts a GeoJSON
/// FeatureCollection or a bare array of features.
pub fn features_of(doc: &Value) -> Vec<&Value> {
    if doc.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
        if let Some(features) = doc.get("features").and_then(Value::as_array) {
            return features.iter().collect();
        }
    }
    if let Some(arr) = doc.as_array() {
        return arr.iter().collect();
    }
    Vec::new()
}

/// Properties object of a feature (empty-object tolerant).
pub fn properties_of(feature: &Value) -> &Value {
    static NULL: Value = Value::Null;
    feature.get("properties").unwrap_or(&NULL)
}

fn coord_pair(v: &Value) -> Option<LatLng> {
    let arr = v.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    // GeoJSON order is [lon, lat].
    let lon = arr[0].as_f64()?;
    let lat = arr[1].as_f64()?;
    Some(LatLng { lat, lon })
}

/// Extract a Point geometry as a LatLng. Anything else is None.
pub fn point_latlng(feature: &Value) -> Option<LatLng> {
    let geom = feature.get("geometry")?;
    if geom.get("type").and_then(Value::as_str) != Some("Point") {
        return None;
    }
    coord_pair(geom.get("coordinates")?)
}

/// Extract LineString or MultiLineString coordinates as one polyline.
/// Non-line geometry yields an empty vec.
pub fn line_points(feature: &Value) -> Vec<LatLng> {
    let Some(geom) = feature.get("geometry") else {
        return Vec::new();
    };
    let coords = geom.get("coordinates").and_then(Value::as_array);
    match (geom.get("type").and_then(Value::as_str), coords) {
        (Some("LineString"), Some(coords)) => {
            coords.iter().filter_map(coord_pair).collect()
        }
        (Some("MultiLineString"), Some(parts)) => parts
            .iter()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(coord_pair)
            .collect(),
        _ => Vec::new(),
    }
}
