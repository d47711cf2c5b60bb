use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use chrono::{DateTime, Utc};
use gpx::{Gpx, Waypoint};
use shared::RawPoint;
use time::OffsetDateTime;

use crate::error::TrackError;

pub const UNTITLED_TRACK: &str = "Untitled track";

/// Points of a track file, flattened across tracks and segments in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFile {
    pub name: String,
    pub points: Vec<RawPoint>,
}

pub fn read_track_file(path: impl AsRef<Path>) -> Result<TrackFile, TrackError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TrackError::Io {
        source,
        path: path.into(),
    })?;
    let track = read_track(BufReader::new(file))?;
    tracing::debug!(
        "read {} points of {:?} from {}",
        track.points.len(),
        track.name,
        path.display()
    );
    Ok(track)
}

pub fn read_track<R: Read>(reader: R) -> Result<TrackFile, TrackError> {
    let gpx = gpx::read(reader)?;
    Ok(from_gpx(gpx))
}

fn from_gpx(gpx: Gpx) -> TrackFile {
    if gpx.tracks.len() > 1 {
        tracing::debug!("document holds {} tracks, concatenating", gpx.tracks.len());
    }

    let name = gpx
        .tracks
        .first()
        .and_then(|track| track.name.clone())
        .or_else(|| gpx.metadata.as_ref().and_then(|meta| meta.name.clone()))
        .unwrap_or_else(|| UNTITLED_TRACK.to_string());

    let points = gpx
        .tracks
        .into_iter()
        .flat_map(|track| track.segments)
        .flat_map(|segment| segment.points)
        .map(to_raw_point)
        .collect();

    TrackFile { name, points }
}

fn to_raw_point(waypoint: Waypoint) -> RawPoint {
    let point = waypoint.point();
    RawPoint {
        lat: point.y(),
        lon: point.x(),
        elevation: waypoint.elevation,
        time: waypoint.time.and_then(|t| to_utc(t.into())),
    }
}

fn to_utc(time: OffsetDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.unix_timestamp(), time.nanosecond())
}
