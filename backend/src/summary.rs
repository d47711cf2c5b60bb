use shared::{Coordinate, EnrichedPoint, TrackBounds, TrackSummary};

/// Reduce an enriched track to the figures shown next to the map.
///
/// `total_km` and `max_height_m` are rounded half away from zero.
pub fn summarize(name: &str, points: &[EnrichedPoint]) -> TrackSummary {
    let last = points.last();
    let total_km = last
        .map(|p| round_half_away(p.cumulative_distance_m / 1000.0))
        .unwrap_or(0);
    let estimated_duration_s = last.map(|p| p.elapsed_seconds).unwrap_or(0.0);

    let elevations = || points.iter().filter_map(|p| p.elevation);
    let max_elevation = elevations().fold(None, |acc: Option<f64>, e| {
        Some(acc.map_or(e, |m| m.max(e)))
    });
    let min_elevation_m = elevations().fold(None, |acc: Option<f64>, e| {
        Some(acc.map_or(e, |m| m.min(e)))
    });

    let (total_ascent_m, total_descent_m) = points
        .windows(2)
        .filter_map(|w| Some(w[1].elevation? - w[0].elevation?))
        .fold((0.0, 0.0), |(up, down), diff| {
            if diff > 0.0 {
                (up + diff, down)
            } else {
                (up, down - diff)
            }
        });

    TrackSummary {
        name: name.to_string(),
        point_count: points.len(),
        total_km,
        max_height_m: max_elevation.map(round_half_away),
        min_elevation_m,
        total_ascent_m,
        total_descent_m,
        estimated_duration_s,
        center: center(points),
        bounds: bounds(points),
    }
}

fn round_half_away(value: f64) -> i64 {
    // f64::round rounds half-way cases away from zero
    value.round() as i64
}

/// Mean position, used to centre the map.
fn center(points: &[EnrichedPoint]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Some(Coordinate {
        lat: lat / n,
        lon: lon / n,
    })
}

fn bounds(points: &[EnrichedPoint]) -> Option<TrackBounds> {
    let first = points.first()?;
    let start = TrackBounds {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
    };
    Some(points.iter().fold(start, |b, p| TrackBounds {
        min_lat: b.min_lat.min(p.lat),
        max_lat: b.max_lat.max(p.lat),
        min_lon: b.min_lon.min(p.lon),
        max_lon: b.max_lon.max(p.lon),
    }))
}
