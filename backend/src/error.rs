use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("failed to open track file {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("point {index} has invalid coordinates (lat={lat}, lon={lon})")]
    InvalidGeometry { index: usize, lat: f64, lon: f64 },
    #[error("point {index} has no elevation")]
    MissingElevation { index: usize },
    #[error("average speed must be a finite, non-negative number of km/h (got {0})")]
    InvalidSpeed(f64),
}
