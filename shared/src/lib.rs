use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// One recorded sample as read from the track file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl RawPoint {
    pub fn new(lat: f64, lon: f64, elevation: Option<f64>) -> Self {
        Self {
            lat,
            lon,
            elevation,
            time: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// A [`RawPoint`] with the values derived by the enrichment pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    pub cumulative_distance_m: f64,
    /// Travel time from the first point at the assumed average speed, in seconds.
    pub elapsed_seconds: f64,
    /// `None` when the elevation of this point or its predecessor is unknown.
    pub slope_percent: Option<f64>,
}

impl EnrichedPoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// Saturates at [`Duration::MAX`] for estimates too large to represent.
    pub fn elapsed_time_estimate(&self) -> Duration {
        Duration::try_from_secs_f64(self.elapsed_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub name: String,
    pub point_count: usize,
    /// Whole kilometers, rounded half away from zero.
    pub total_km: i64,
    /// Whole meters, rounded half away from zero. `None` when no point has an elevation.
    pub max_height_m: Option<i64>,
    pub min_elevation_m: Option<f64>,
    pub total_ascent_m: f64,
    pub total_descent_m: f64,
    pub estimated_duration_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<TrackBounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    /// Slope clipped to the display range.
    pub slope_percent: f64,
    /// `#rrggbb` on a diverging scale centred at 0 %.
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub distance_km: f64,
    pub elevation_m: f64,
}

/// Everything the page needs to draw the map, the profile and the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackView {
    pub title: String,
    pub track_name: String,
    pub summary_lines: Vec<String>,
    pub summary: TrackSummary,
    pub slope_range: (f64, f64),
    pub path: Vec<MapPoint>,
    pub profile: Vec<ProfilePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
