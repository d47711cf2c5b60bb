use geo::GeodesicDistance;
use geo_types::Point;
use shared::Coordinate;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Formula used for the horizontal distance between two consecutive points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DistanceFormula {
    /// Great-circle distance on a sphere
    #[default]
    Haversine,
    /// Ellipsoidal (WGS84) distance
    Geodesic,
}

impl DistanceFormula {
    pub fn distance_m(self, a: Coordinate, b: Coordinate) -> f64 {
        match self {
            Self::Haversine => haversine_m(a, b),
            Self::Geodesic => geodesic_m(a, b),
        }
    }
}

pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

pub fn geodesic_m(a: Coordinate, b: Coordinate) -> f64 {
    to_point(a).geodesic_distance(&to_point(b))
}

fn to_point(coord: Coordinate) -> Point<f64> {
    Point::new(coord.lon, coord.lat)
}
