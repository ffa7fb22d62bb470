//! Taipei open-data fetch: MRT route geometry and station positions.
//!
//! Two independent endpoints; each can fail on its own and a failure is
//! terminal for the run (no retry). Parsing is separated from the HTTP
//! calls and works on any already-decoded JSON document.

use super::geojson::{self, ROUTE_NAME_KEYS, STATION_NAME_KEYS};
use super::types::{RouteLine, Station, StationError, StationSource};
use serde_json::Value;
use std::time::Duration;

pub const ROUTES_URL: &str = "https://data.taipei/api/dataset/afccd2ac-75b1-4362-9099-45983e332776/resource/1139b06e-8128-4a07-8148-f27f038bd8b4/download";
pub const STATIONS_URL: &str = "https://data.taipei/api/frontstage/tpeod/dataset/resource.download?rid=a63e3278-9d10-4916-9f24-e5a4d78afb31";

const USER_AGENT: &str = "TaipeiNearby/0.3 (mrt-proximity-explorer)";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

fn fetch_json(url: &str) -> Result<Value, StationError> {
    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .call()
        .map_err(|e| StationError::Network(e.to_string()))?;

    response
        .into_json()
        .map_err(|e| StationError::InvalidResponse(e.to_string()))
}

/// Fetch and parse the station layer.
pub fn load_stations() -> Result<Vec<Station>, StationError> {
    let doc = fetch_json(STATIONS_URL)?;
    let stations = parse_stations(&doc);
    if stations.is_empty() {
        return Err(StationError::InvalidResponse(
            "no Point features in station dataset".into(),
        ));
    }
    Ok(stations)
}

/// Fetch and parse the route layer.
pub fn load_routes() -> Result<Vec<RouteLine>, StationError> {
    let doc = fetch_json(ROUTES_URL)?;
    let routes = parse_routes(&doc);
    if routes.is_empty() {
        return Err(StationError::InvalidResponse(
            "no line features in route dataset".into(),
        ));
    }
    Ok(routes)
}

/// Pull stations out of a station-layer document. Features without a Point
/// geometry or a recognizable name key are skipped.
pub fn parse_stations(doc: &Value) -> Vec<Station> {
    geojson::features_of(doc)
        .into_iter()
        .filter_map(|feature| {
            let pos = geojson::point_latlng(feature)?;
            let name = geojson::pick_prop(geojson::properties_of(feature), STATION_NAME_KEYS)
                .unwrap_or_else(|| "Station".to_string());
            Some(Station {
                name,
                lat: pos.lat,
                lon: pos.lon,
                source: StationSource::OpenData,
                lines: Vec::new(),
            })
        })
        .collect()
}

/// Pull route polylines out of a route-layer document. Features without
/// line geometry are skipped.
pub fn parse_routes(doc: &Value) -> Vec<RouteLine> {
    geojson::features_of(doc)
        .into_iter()
        .filter_map(|feature| {
            let points = geojson::line_points(feature);
            if points.is_empty() {
                return None;
            }
            let name = geojson::pick_prop(geojson::properties_of(feature), ROUTE_NAME_KEYS)
                .unwrap_or_else(|| "MRT Route".to_string());
            let color = route_color(&name).to_string();
            Some(RouteLine { name, color, points })
        })
        .collect()
}

/// Map a route name to the Taipei MRT line color by keyword. The upstream
/// schema is unstable, so this matches Chinese names, romanizations, and
/// plain color words alike.
pub fn route_color(route_name: &str) -> &'static str {
    let n = route_name.to_lowercase();
    if n.contains("板南") || n.contains("bannan") || n.contains("blue") {
        "#0070c0"
    } else if n.contains("淡水") || n.contains("信義") || n.contains("tamsui")
        || n.contains("xinyi") || n.contains("red")
    {
        "#d40000"
    } else if n.contains("松山") || n.contains("新店") || n.contains("songshan")
        || n.contains("xindian") || n.contains("green")
    {
        "#00a650"
    } else if n.contains("中和") || n.contains("新蘆") || n.contains("zhonghe")
        || n.contains("xinlu") || n.contains("orange")
    {
        "#ff7f00"
    } else if n.contains("文湖") || n.contains("wenhu") || n.contains("brown") {
        "#8a5a2b"
    } else if n.contains("環狀") || n.contains("circular") || n.contains("yellow") {
        "#ffd400"
    } else {
        "#7a869a"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_stations_feature_collection() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "StationName": "Xiangshan" },
                    "geometry": { "type": "Point", "coordinates": [121.5700, 25.0327] }
                },
                {
                    "type": "Feature",
                    "properties": { "站名": "西門" },
                    "geometry": { "type": "Point", "coordinates": [121.5081, 25.0421] }
                }
            ]
        });
        let stations = parse_stations(&doc);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Xiangshan");
        assert_eq!(stations[1].name, "西門");
        assert_eq!(stations[0].source, StationSource::OpenData);
    }

    #[test]
    fn test_parse_stations_skips_non_points() {
        let doc = json!([
            {
                "properties": { "name": "A line, not a station" },
                "geometry": { "type": "LineString", "coordinates": [[121.5, 25.0]] }
            },
            {
                "properties": { "name": "Tamsui" },
                "geometry": { "type": "Point", "coordinates": [121.4454, 25.1677] }
            },
            { "properties": { "name": "No geometry at all" } }
        ]);
        let stations = parse_stations(&doc);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Tamsui");
    }

    #[test]
    fn test_parse_stations_unnamed_gets_placeholder() {
        let doc = json!([{
            "properties": { "irrelevant": 1 },
            "geometry": { "type": "Point", "coordinates": [121.5, 25.0] }
        }]);
        assert_eq!(parse_stations(&doc)[0].name, "Station");
    }

    #[test]
    fn test_parse_routes_colors_by_name() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [{
                "properties": { "RouteName": "淡水信義線" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[121.517, 25.048], [121.520, 25.052]]
                }
            }]
        });
        let routes = parse_routes(&doc);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].color, "#d40000");
        assert_eq!(routes[0].points.len(), 2);
    }

    #[test]
    fn test_parse_routes_skips_pointless_features() {
        let doc = json!([
            { "properties": { "RouteName": "Ghost" } },
            {
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [121.5, 25.0] }
            }
        ]);
        assert!(parse_routes(&doc).is_empty());
    }

    #[test]
    fn test_route_color_keywords() {
        assert_eq!(route_color("板南線"), "#0070c0");
        assert_eq!(route_color("Bannan Line"), "#0070c0");
        assert_eq!(route_color("Songshan-Xindian Line"), "#00a650");
        assert_eq!(route_color("中和新蘆線"), "#ff7f00");
        assert_eq!(route_color("Wenhu (Brown)"), "#8a5a2b");
        assert_eq!(route_color("環狀線"), "#ffd400");
        assert_eq!(route_color("Mystery Line"), "#7a869a");
    }
}
