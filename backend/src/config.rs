use std::path::PathBuf;

use crate::enrich::EnrichOptions;

/// Everything one run needs: which file to read and how to enrich it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackConfig {
    pub input_path: PathBuf,
    pub enrich: EnrichOptions,
}

impl TrackConfig {
    pub fn new(input_path: impl Into<PathBuf>, speed_kmh: f64) -> Self {
        Self {
            input_path: input_path.into(),
            enrich: EnrichOptions::with_speed(speed_kmh),
        }
    }
}
