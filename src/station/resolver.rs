//! Station resolver — orchestrates the lookup chain.
//!
//! Query flow: fetched open-data directory → built-in dataset → error.
//! Each tier matches exact → substring → fuzzy (edit distance ≤ 2).

use super::fetch;
use super::types::{Station, StationError, StationSource};

struct BuiltinStation {
    /// Canonical name first, then aliases (romanized and Chinese).
    names: &'static [&'static str],
    lat: f64,
    lon: f64,
    lines: &'static [&'static str],
}

/// Major stations for offline use. The open-data layer has every station;
/// this list only needs enough coverage to keep the tool useful without a
/// network.
const BUILTIN_STATIONS: &[BuiltinStation] = &[
    BuiltinStation {
        names: &["Taipei Main Station", "taipei main", "台北車站"],
        lat: 25.0478, lon: 121.5170,
        lines: &["Tamsui-Xinyi", "Bannan"],
    },
    BuiltinStation {
        names: &["Taipei 101/World Trade Center", "taipei 101", "世貿", "台北101"],
        lat: 25.0331, lon: 121.5633,
        lines: &["Tamsui-Xinyi"],
    },
    BuiltinStation {
        names: &["Xiangshan", "象山"],
        lat: 25.0327, lon: 121.5700,
        lines: &["Tamsui-Xinyi"],
    },
    BuiltinStation {
        names: &["Ximen", "西門"],
        lat: 25.0421, lon: 121.5081,
        lines: &["Bannan", "Songshan-Xindian"],
    },
    BuiltinStation {
        names: &["Longshan Temple", "龍山寺"],
        lat: 25.0354, lon: 121.4999,
        lines: &["Bannan"],
    },
    BuiltinStation {
        names: &["Chiang Kai-Shek Memorial Hall", "cks memorial hall", "中正紀念堂"],
        lat: 25.0326, lon: 121.5183,
        lines: &["Tamsui-Xinyi", "Songshan-Xindian"],
    },
    BuiltinStation {
        names: &["Daan Park", "daan forest park", "大安森林公園"],
        lat: 25.0333, lon: 121.5346,
        lines: &["Tamsui-Xinyi"],
    },
    BuiltinStation {
        names: &["Dongmen", "東門"],
        lat: 25.0339, lon: 121.5290,
        lines: &["Tamsui-Xinyi", "Zhonghe-Xinlu"],
    },
    BuiltinStation {
        names: &["Zhongxiao Fuxing", "忠孝復興"],
        lat: 25.0418, lon: 121.5438,
        lines: &["Bannan", "Wenhu"],
    },
    BuiltinStation {
        names: &["Zhongxiao Xinsheng", "忠孝新生"],
        lat: 25.0424, lon: 121.5327,
        lines: &["Bannan", "Zhonghe-Xinlu"],
    },
    BuiltinStation {
        names: &["Zhongshan", "中山"],
        lat: 25.0528, lon: 121.5204,
        lines: &["Tamsui-Xinyi", "Songshan-Xindian"],
    },
    BuiltinStation {
        names: &["Shilin", "士林"],
        lat: 25.0937, lon: 121.5262,
        lines: &["Tamsui-Xinyi"],
    },
    BuiltinStation {
        names: &["Jiantan", "劍潭"],
        lat: 25.0841, lon: 121.5250,
        lines: &["Tamsui-Xinyi"],
    },
    BuiltinStation {
        names: &["Songshan", "松山"],
        lat: 25.0499, lon: 121.5776,
        lines: &["Songshan-Xindian"],
    },
    BuiltinStation {
        names: &["Taipei City Hall", "市政府"],
        lat: 25.0411, lon: 121.5652,
        lines: &["Bannan"],
    },
    BuiltinStation {
        names: &["Taipei Zoo", "動物園"],
        lat: 24.9982, lon: 121.5794,
        lines: &["Wenhu"],
    },
    BuiltinStation {
        names: &["Tamsui", "淡水"],
        lat: 25.1677, lon: 121.4454,
        lines: &["Tamsui-Xinyi"],
    },
    BuiltinStation {
        names: &["Beitou", "北投"],
        lat: 25.1319, lon: 121.4987,
        lines: &["Tamsui-Xinyi"],
    },
];

fn builtin_to_station(b: &BuiltinStation) -> Station {
    Station {
        name: b.names[0].to_string(),
        lat: b.lat,
        lon: b.lon,
        source: StationSource::Builtin,
        lines: b.lines.iter().map(|l| l.to_string()).collect(),
    }
}

/// The full built-in station list (for `--stations` in offline mode).
pub fn builtin_station_list() -> Vec<Station> {
    BUILTIN_STATIONS.iter().map(builtin_to_station).collect()
}

/// Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Search the built-in dataset: exact → substring → fuzzy over all aliases.
pub fn builtin_lookup(query: &str) -> Option<Station> {
    let q = query.to_lowercase();

    for st in BUILTIN_STATIONS {
        for name in st.names {
            if name.to_lowercase() == q {
                return Some(builtin_to_station(st));
            }
        }
    }

    for st in BUILTIN_STATIONS {
        for name in st.names {
            let n = name.to_lowercase();
            if n.contains(&q) || q.contains(&n) {
                return Some(builtin_to_station(st));
            }
        }
    }

    let mut best: Option<(&BuiltinStation, usize)> = None;
    for st in BUILTIN_STATIONS {
        for name in st.names {
            let dist = edit_distance(&q, &name.to_lowercase());
            if dist <= 2 && (best.is_none() || dist < best.unwrap().1) {
                best = Some((st, dist));
            }
        }
    }

    best.map(|(st, _)| builtin_to_station(st))
}

/// The station resolver with its lookup chain.
pub struct StationResolver {
    directory: Vec<Station>,
    fetch_attempted: bool,
    offline: bool,
}

impl StationResolver {
    pub fn new() -> Self {
        Self { directory: Vec::new(), fetch_attempted: false, offline: false }
    }

    /// Create a resolver with a preloaded directory (for testing).
    pub fn with_directory(directory: Vec<Station>) -> Self {
        Self { directory, fetch_attempted: true, offline: false }
    }

    /// Set offline mode — skip network calls, built-in dataset only.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Fetch the open-data directory once. A failure is isolated: it is
    /// surfaced as a status message and the built-in tier takes over.
    fn ensure_fetched(&mut self) {
        if self.offline || self.fetch_attempted {
            return;
        }
        self.fetch_attempted = true;
        match fetch::load_stations() {
            Ok(list) => {
                eprintln!("  Loaded {} MRT stations from Taipei open data.", list.len());
                self.directory = list;
            }
            Err(e) => {
                eprintln!("  Warning: station fetch failed ({}); using built-in directory.", e);
            }
        }
    }

    /// All known stations: the fetched directory when available, otherwise
    /// the built-in list.
    pub fn stations(&mut self) -> Vec<Station> {
        self.ensure_fetched();
        if self.directory.is_empty() {
            builtin_station_list()
        } else {
            self.directory.clone()
        }
    }

    /// Resolve a station name through the full chain.
    pub fn resolve(&mut self, query: &str) -> Result<Station, StationError> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Err(StationError::NoInput);
        }

        self.ensure_fetched();

        // 1. Exact match in the fetched directory
        if let Some(st) = self.directory.iter().find(|s| s.name.to_lowercase() == q) {
            return Ok(st.clone());
        }

        // 2. Substring match in the fetched directory
        if let Some(st) = self
            .directory
            .iter()
            .find(|s| s.name.to_lowercase().contains(&q))
        {
            return Ok(st.clone());
        }

        // 3. Fuzzy match in the fetched directory
        let mut best: Option<(&Station, usize)> = None;
        for st in &self.directory {
            let dist = edit_distance(&q, &st.name.to_lowercase());
            if dist <= 2 && (best.is_none() || dist < best.unwrap().1) {
                best = Some((st, dist));
            }
        }
        if let Some((st, _)) = best {
            return Ok(st.clone());
        }

        // 4. Built-in dataset (always available, alias-aware)
        if let Some(st) = builtin_lookup(query) {
            return Ok(st);
        }

        Err(StationError::NotFound(query.to_string()))
    }

    /// A manual reference from raw coordinates.
    pub fn from_manual(lat: f64, lon: f64) -> Station {
        Station {
            name: format!("{:.4}, {:.4}", lat, lon),
            lat,
            lon,
            source: StationSource::Manual,
            lines: Vec::new(),
        }
    }
}

impl Default for StationResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_resolver() -> StationResolver {
        let mut resolver = StationResolver::new();
        resolver.set_offline(true);
        resolver
    }

    #[test]
    fn test_resolve_builtin_exact() {
        let mut resolver = offline_resolver();
        let st = resolver.resolve("Xiangshan").unwrap();
        assert_eq!(st.source, StationSource::Builtin);
        assert!((st.lat - 25.0327).abs() < 0.001);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let mut resolver = offline_resolver();
        let st = resolver.resolve("XIMEN").unwrap();
        assert_eq!(st.name, "Ximen");
    }

    #[test]
    fn test_resolve_chinese_alias() {
        let mut resolver = offline_resolver();
        let st = resolver.resolve("龍山寺").unwrap();
        assert_eq!(st.name, "Longshan Temple");
    }

    #[test]
    fn test_resolve_alias() {
        let mut resolver = offline_resolver();
        let st = resolver.resolve("taipei 101").unwrap();
        assert_eq!(st.name, "Taipei 101/World Trade Center");
    }

    #[test]
    fn test_resolve_substring() {
        let mut resolver = offline_resolver();
        let st = resolver.resolve("memorial").unwrap();
        assert_eq!(st.name, "Chiang Kai-Shek Memorial Hall");
    }

    #[test]
    fn test_resolve_fuzzy() {
        // "ximan" → "ximen" (edit distance 1, no substring overlap)
        let mut resolver = offline_resolver();
        let st = resolver.resolve("ximan").unwrap();
        assert_eq!(st.name, "Ximen");
    }

    #[test]
    fn test_resolve_not_found() {
        let mut resolver = offline_resolver();
        assert!(matches!(
            resolver.resolve("xyznonexistent123"),
            Err(StationError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_empty_is_no_input() {
        let mut resolver = offline_resolver();
        assert!(matches!(resolver.resolve("  "), Err(StationError::NoInput)));
    }

    #[test]
    fn test_resolve_prefers_fetched_directory() {
        let fetched = vec![Station {
            name: "Xiangshan".to_string(),
            lat: 25.0329,
            lon: 121.5702,
            source: StationSource::OpenData,
            lines: Vec::new(),
        }];
        let mut resolver = StationResolver::with_directory(fetched);
        let st = resolver.resolve("xiangshan").unwrap();
        assert_eq!(st.source, StationSource::OpenData);
    }

    #[test]
    fn test_directory_miss_falls_back_to_builtin() {
        let fetched = vec![Station {
            name: "Somewhere Else".to_string(),
            lat: 25.0,
            lon: 121.5,
            source: StationSource::OpenData,
            lines: Vec::new(),
        }];
        let mut resolver = StationResolver::with_directory(fetched);
        let st = resolver.resolve("Tamsui").unwrap();
        assert_eq!(st.source, StationSource::Builtin);
    }

    #[test]
    fn test_from_manual() {
        let st = StationResolver::from_manual(25.0340, 121.5645);
        assert_eq!(st.source, StationSource::Manual);
        assert_eq!(st.name, "25.0340, 121.5645");
    }

    #[test]
    fn test_builtin_list_covers_spot_neighborhoods() {
        let list = builtin_station_list();
        assert!(list.len() >= 15);
        assert!(list.iter().any(|s| s.name == "Taipei Zoo"));
        assert!(list.iter().all(|s| !s.lines.is_empty()));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("ximen", "ximenn"), 1);
        assert_eq!(edit_distance("tamsui", "tamsui"), 0);
        assert_eq!(edit_distance("shilin", "shillin"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }
}
