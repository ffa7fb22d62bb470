//! The proximity filter engine — primary public API.
//!
//! Pure and stateless: every recomputation passes the full `FilterState`
//! in, nothing is remembered between calls.

use crate::geo::{self, GeoError, LatLng};
use crate::spots::PointOfInterest;
use crate::station::StationSource;
use serde::Serialize;
use std::collections::BTreeSet;

/// Fallback search radius when the requested one is unusable.
pub const DEFAULT_RADIUS_M: i64 = 1200;

/// Active filter predicates, passed per call.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Allowed categories; empty means no restriction.
    pub categories: BTreeSet<String>,
    /// Case-insensitive substring matched against name, category, and notes;
    /// empty means no restriction.
    pub search: String,
    /// Search radius in meters around the reference; only applied when a
    /// reference location is set. Zero or negative falls back to the default.
    pub radius_m: i64,
}

impl FilterState {
    pub fn new() -> Self {
        Self { categories: BTreeSet::new(), search: String::new(), radius_m: DEFAULT_RADIUS_M }
    }

    /// Radius actually used: non-positive input falls back to 1200 m.
    pub fn effective_radius_m(&self) -> f64 {
        if self.radius_m > 0 {
            self.radius_m as f64
        } else {
            DEFAULT_RADIUS_M as f64
        }
    }

    fn category_allowed(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.contains(category)
    }

    fn matches_search(&self, spot: &PointOfInterest) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let q = self.search.to_lowercase();
        spot.name.to_lowercase().contains(&q)
            || spot.category.to_lowercase().contains(&q)
            || spot
                .notes
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&q))
    }
}

/// A spot that passed all filters, with its distance when a reference is set.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSpot {
    #[serde(flatten)]
    pub spot: PointOfInterest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

/// Filter the spot list and rank it by proximity.
///
/// Without a reference: category and search predicates only, input order
/// preserved. With a reference: additionally keep spots within the effective
/// radius, annotate each with its distance, and sort ascending by distance
/// (stable — ties keep input order). An empty result is `Ok`, not an error.
pub fn filter_and_rank(
    points: &[PointOfInterest],
    filter: &FilterState,
    reference: Option<LatLng>,
) -> Result<Vec<RankedSpot>, GeoError> {
    let mut out = Vec::new();

    match reference {
        None => {
            for sp in points {
                if filter.category_allowed(&sp.category) && filter.matches_search(sp) {
                    out.push(RankedSpot { spot: sp.clone(), distance_m: None });
                }
            }
        }
        Some(origin) => {
            let radius = filter.effective_radius_m();
            for sp in points {
                if !filter.category_allowed(&sp.category) || !filter.matches_search(sp) {
                    continue;
                }
                let dist = geo::haversine_m(origin, sp.latlng())?;
                if dist <= radius {
                    out.push(RankedSpot { spot: sp.clone(), distance_m: Some(dist) });
                }
            }
            // Vec::sort_by is stable, so equal distances keep input order.
            out.sort_by(|a, b| {
                a.distance_m
                    .partial_cmp(&b.distance_m)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }

    Ok(out)
}

// ─── Report output ──────────────────────────────────────────────

/// The reference location a search was ranked against.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceInfo {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub source: StationSource,
}

/// Full engine report: what was asked, what matched.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceInfo>,
    pub radius_m: i64,
    pub categories: Vec<String>,
    pub search: String,
    pub matches: Vec<RankedSpot>,
}

impl NearbyOutput {
    pub fn new(
        reference: Option<ReferenceInfo>,
        filter: &FilterState,
        matches: Vec<RankedSpot>,
    ) -> Self {
        Self {
            reference,
            radius_m: filter.effective_radius_m() as i64,
            categories: filter.categories.iter().cloned().collect(),
            search: filter.search.clone(),
            matches,
        }
    }
}

// ─── Text panel ─────────────────────────────────────────────────

/// Render the nearby list as a text panel (goes to stderr in the CLI).
pub fn render_nearby_panel(output: &NearbyOutput) -> String {
    let mut out = String::new();

    match &output.reference {
        Some(r) => {
            out.push_str(&format!("  ── {} ──\n", r.name));
            out.push_str(&format!(
                "  Spots within {} m (filtered)\n\n",
                output.radius_m
            ));
        }
        None => {
            out.push_str("  ── All spots ──\n");
            out.push_str("  No reference selected; showing the filtered list.\n\n");
        }
    }

    if output.matches.is_empty() {
        out.push_str("  No matches nearby.\n");
        out.push_str("  Try a bigger radius or toggle categories.\n");
        return out;
    }

    for m in &output.matches {
        match m.distance_m {
            Some(d) => out.push_str(&format!(
                "  {:<32} {:<14} {:>6.2} km\n",
                m.spot.name,
                m.spot.category,
                d / 1000.0
            )),
            None => out.push_str(&format!("  {:<32} {}\n", m.spot.name, m.spot.category)),
        }
        if let Some(ref notes) = m.spot.notes {
            out.push_str(&format!("  {:<32} {}\n", "", notes));
        }
    }

    out
}
