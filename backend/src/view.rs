use shared::{EnrichedPoint, MapPoint, ProfilePoint, TrackSummary, TrackView};

pub const PAGE_TITLE: &str = "Overview of route";

/// Slopes outside this range share the colour of the nearest bound.
pub const SLOPE_DISPLAY_RANGE: (f64, f64) = (-10.0, 10.0);

const DESCENT_RGB: [u8; 3] = [0x21, 0x66, 0xac];
const FLAT_RGB: [u8; 3] = [0xf7, 0xf7, 0xf7];
const CLIMB_RGB: [u8; 3] = [0xb2, 0x18, 0x2b];

pub fn build_view(summary: TrackSummary, points: &[EnrichedPoint]) -> TrackView {
    let path = points
        .iter()
        .map(|p| {
            let slope = clip_slope(p.slope_percent);
            MapPoint {
                lat: p.lat,
                lon: p.lon,
                slope_percent: slope,
                color: slope_color(slope),
            }
        })
        .collect();

    let profile = points
        .iter()
        .filter_map(|p| {
            Some(ProfilePoint {
                distance_km: p.cumulative_distance_m / 1000.0,
                elevation_m: p.elevation?,
            })
        })
        .collect();

    TrackView {
        title: PAGE_TITLE.to_string(),
        track_name: summary.name.clone(),
        summary_lines: summary_lines(&summary),
        summary,
        slope_range: SLOPE_DISPLAY_RANGE,
        path,
        profile,
    }
}

pub fn summary_lines(summary: &TrackSummary) -> Vec<String> {
    let height = summary
        .max_height_m
        .map_or_else(|| "n/a".to_string(), |h| format!("{h} m"));
    vec![
        format!("Total Distance: {} km", summary.total_km),
        format!("Maximum Height: {height}"),
    ]
}

/// Unknown slopes are drawn as flat.
pub fn clip_slope(slope_percent: Option<f64>) -> f64 {
    let (low, high) = SLOPE_DISPLAY_RANGE;
    match slope_percent {
        Some(s) if s.is_finite() => s.clamp(low, high),
        _ => 0.0,
    }
}

/// Diverging scale: descent blue, flat near-white, climb red.
pub fn slope_color(clipped: f64) -> String {
    let (low, high) = SLOPE_DISPLAY_RANGE;
    let [r, g, b] = if clipped >= 0.0 {
        lerp_rgb(FLAT_RGB, CLIMB_RGB, clipped / high)
    } else {
        lerp_rgb(FLAT_RGB, DESCENT_RGB, clipped / low)
    };
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn lerp_rgb(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for (channel, (a, b)) in out.iter_mut().zip(from.iter().zip(to.iter())) {
        let value = f64::from(*a) + (f64::from(*b) - f64::from(*a)) * t;
        *channel = value.round() as u8;
    }
    out
}
