use clap::Parser;
use std::collections::BTreeSet;
use taipei_nearby::engine::{self, FilterState, NearbyOutput, ReferenceInfo};
use taipei_nearby::geo::LatLng;
use taipei_nearby::spots;
use taipei_nearby::station::{fetch, Station, StationResolver};

/// Taipei Nearby — MRT & tourist-spot proximity explorer
///
/// Filters a curated Taipei spot list by category and free text, and ranks
/// spots by distance from a selected MRT station or raw coordinates.
/// Station positions come from Taipei open data, with a built-in fallback.
///
/// Examples:
///   tpenearby --station Xiangshan
///   tpenearby temple
///   tpenearby --station "Taipei 101" --radius 2000 --category "Night Market"
///   tpenearby --lat 25.0340 --lon 121.5645
///   tpenearby --stations --offline
#[derive(Parser)]
#[command(name = "tpenearby", version, about, long_about = None)]
struct Cli {
    /// Free-text search over spot names, categories, and notes.
    #[arg(index = 1)]
    search: Option<String>,

    /// Reference MRT station by name (English or Chinese, fuzzy).
    #[arg(long, short = 's')]
    station: Option<String>,

    /// Reference latitude (-90 to 90). Use with --lon.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Reference longitude (-180 to 180). Use with --lat.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Only show spots in this category (repeatable).
    #[arg(long, short = 'c')]
    category: Vec<String>,

    /// Search radius in meters around the reference.
    #[arg(long, short = 'r', default_value_t = engine::DEFAULT_RADIUS_M)]
    radius: i64,

    /// Offline mode: built-in station data only, no fetch.
    #[arg(long)]
    offline: bool,

    /// List known MRT stations and exit.
    #[arg(long)]
    stations: bool,

    /// List MRT lines from open data and exit.
    #[arg(long)]
    lines: bool,

    /// List spot categories and exit.
    #[arg(long)]
    categories: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut resolver = StationResolver::new();
    if cli.offline {
        resolver.set_offline(true);
    }

    // ── Listing modes ───────────────────────────────────────────

    if cli.categories {
        for cat in spots::categories() {
            println!("{}", cat);
        }
        return;
    }

    if cli.stations {
        let stations = resolver.stations();
        eprintln!("  {} stations known.", stations.len());
        println!("{}", serde_json::to_string_pretty(&stations).unwrap());
        return;
    }

    if cli.lines {
        list_lines(cli.offline);
        return;
    }

    // ── Resolve reference location ──────────────────────────────

    let reference = resolve_reference(&cli, &mut resolver);

    if let Some(ref st) = reference {
        eprintln!("  \u{1F4CD} {} ({}) — {}", st.name, st.source, st.latlng());
        if !st.lines.is_empty() {
            eprintln!("  \u{1F687} Lines: {}", st.lines.join(", "));
        }
    }

    // ── Filter and rank ─────────────────────────────────────────

    let filter = FilterState {
        categories: cli.category.iter().cloned().collect::<BTreeSet<_>>(),
        search: cli.search.clone().unwrap_or_default().trim().to_string(),
        radius_m: cli.radius,
    };

    if cli.radius <= 0 {
        eprintln!(
            "  Warning: radius {} is not positive; using default {} m.",
            cli.radius,
            engine::DEFAULT_RADIUS_M
        );
    }

    let all = spots::all_spots();
    let origin = reference.as_ref().map(Station::latlng);
    let matches = match engine::filter_and_rank(&all, &filter, origin) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let output = NearbyOutput::new(
        reference.map(|st| ReferenceInfo {
            name: st.name,
            lat: st.lat,
            lon: st.lon,
            source: st.source,
        }),
        &filter,
        matches,
    );

    // Panel to stderr, JSON to stdout
    eprint!("{}", engine::render_nearby_panel(&output));
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn resolve_reference(cli: &Cli, resolver: &mut StationResolver) -> Option<Station> {
    // Priority: --station > --lat/--lon > none. No reference is valid:
    // the filtered list is shown unranked.

    if let Some(ref name) = cli.station {
        match resolver.resolve(name) {
            Ok(st) => return Some(st),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        if LatLng::new(lat, lon).is_err() {
            eprintln!("Error: Invalid coordinates. Lat: -90..90, Lon: -180..180");
            std::process::exit(1);
        }
        return Some(StationResolver::from_manual(lat, lon));
    }

    if cli.lat.is_some() != cli.lon.is_some() {
        eprintln!("Error: --lat and --lon must be given together.");
        std::process::exit(1);
    }

    None
}

fn list_lines(offline: bool) {
    if offline {
        eprintln!("  MRT line geometry requires open data; not available offline.");
        return;
    }
    match fetch::load_routes() {
        Ok(routes) => {
            for r in &routes {
                eprintln!("  {}  {} ({} points)", r.color, r.name, r.points.len());
            }
            println!("{}", serde_json::to_string_pretty(&routes).unwrap());
        }
        Err(e) => {
            // A failed fetch is terminal for this run but never an error
            // exit for the rest of the tool.
            eprintln!("  Warning: route fetch failed ({}).", e);
        }
    }
}
