//! Single left-to-right pass deriving cumulative distance, estimated elapsed time and slope for
//! every point of a track.

use shared::{EnrichedPoint, RawPoint};

use crate::{error::TrackError, geodesy::DistanceFormula};

/// Assumed average speed when none is given.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// What to do with a point that carries no elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ElevationPolicy {
    /// Keep the elevation unknown; slopes touching the point are unknown too
    #[default]
    Propagate,
    /// Treat a missing elevation as 0 m
    Zero,
    /// Fail the whole run
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichOptions {
    pub speed_kmh: f64,
    pub elevation_policy: ElevationPolicy,
    pub distance_formula: DistanceFormula,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            elevation_policy: ElevationPolicy::default(),
            distance_formula: DistanceFormula::default(),
        }
    }
}

impl EnrichOptions {
    pub fn with_speed(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            ..Self::default()
        }
    }

    /// Speed in m/s, or an error when the configured speed is negative or not finite.
    pub fn speed_mps(&self) -> Result<f64, TrackError> {
        let speed_mps = self.speed_kmh * 1000.0 / 3600.0;
        if !self.speed_kmh.is_finite() || self.speed_kmh < 0.0 || !speed_mps.is_finite() {
            return Err(TrackError::InvalidSpeed(self.speed_kmh));
        }
        Ok(speed_mps)
    }
}

/// Fold state: the last enriched point and the output built so far.
struct Accumulator {
    points: Vec<EnrichedPoint>,
    total_distance_m: f64,
}

impl Accumulator {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            total_distance_m: 0.0,
        }
    }

    fn push(
        mut self,
        index: usize,
        point: &RawPoint,
        options: &EnrichOptions,
        speed_mps: f64,
    ) -> Result<Self, TrackError> {
        validate_coordinates(index, point)?;
        let elevation = resolve_elevation(index, point.elevation, options.elevation_policy)?;

        let (delta_m, slope_percent) = match self.points.last() {
            None => (0.0, Some(0.0)),
            Some(previous) => {
                let delta_m = options
                    .distance_formula
                    .distance_m(previous.coordinate(), point.coordinate());
                let coincident = previous.lat == point.lat && previous.lon == point.lon;
                let slope = if coincident || delta_m <= 0.0 {
                    Some(0.0)
                } else {
                    slope_percent(previous.elevation, elevation, delta_m)
                };
                (delta_m, slope)
            }
        };

        self.total_distance_m += delta_m;
        let elapsed_seconds = if speed_mps > 0.0 {
            self.total_distance_m / speed_mps
        } else {
            0.0
        };
        // a vanishingly small speed overflows the estimate
        if !elapsed_seconds.is_finite() {
            return Err(TrackError::InvalidSpeed(options.speed_kmh));
        }

        self.points.push(EnrichedPoint {
            lat: point.lat,
            lon: point.lon,
            elevation,
            time: point.time,
            cumulative_distance_m: self.total_distance_m,
            elapsed_seconds,
            slope_percent,
        });
        Ok(self)
    }
}

/// Enrich `points` in order. Either every point is enriched or an error is returned.
pub fn enrich(
    points: &[RawPoint],
    options: &EnrichOptions,
) -> Result<Vec<EnrichedPoint>, TrackError> {
    let speed_mps = options.speed_mps()?;
    let acc = points.iter().enumerate().try_fold(
        Accumulator::with_capacity(points.len()),
        |acc, (index, point)| acc.push(index, point, options, speed_mps),
    )?;

    tracing::debug!(
        "enriched {} points, {:.0} m at {} km/h",
        acc.points.len(),
        acc.total_distance_m,
        options.speed_kmh
    );
    Ok(acc.points)
}

fn validate_coordinates(index: usize, point: &RawPoint) -> Result<(), TrackError> {
    let lat_ok = point.lat.is_finite() && (-90.0..=90.0).contains(&point.lat);
    let lon_ok = point.lon.is_finite() && (-180.0..=180.0).contains(&point.lon);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(TrackError::InvalidGeometry {
            index,
            lat: point.lat,
            lon: point.lon,
        })
    }
}

fn resolve_elevation(
    index: usize,
    elevation: Option<f64>,
    policy: ElevationPolicy,
) -> Result<Option<f64>, TrackError> {
    match (elevation, policy) {
        (Some(value), _) => Ok(Some(value)),
        (None, ElevationPolicy::Propagate) => Ok(None),
        (None, ElevationPolicy::Zero) => Ok(Some(0.0)),
        (None, ElevationPolicy::Reject) => Err(TrackError::MissingElevation { index }),
    }
}

/// Non-finite results (a subnormal run) count as flat, like a zero run.
fn slope_percent(from: Option<f64>, to: Option<f64>, horizontal_m: f64) -> Option<f64> {
    let slope = (to? - from?) / horizontal_m * 100.0;
    Some(if slope.is_finite() { slope } else { 0.0 })
}
