//! Great-circle distance and bearing on a spherical Earth.
//!
//! Uses the Haversine formula with the WGS84 equatorial radius as the sphere
//! radius. Results are rounded to two decimals.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::dms::round_to;

/// Sphere radius used for distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Distance and bearings between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodesicResult {
    /// Great-circle distance in meters.
    pub distance_meters: f64,
    /// Initial bearing from the first point, degrees clockwise from north in `[0, 360)`.
    pub forward_bearing_deg: f64,
    /// `(forward + 180) mod 360`.
    pub reverse_bearing_deg: f64,
}

impl GeodesicResult {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

/// Haversine distance in meters, unrounded.
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.longitude() - from.longitude()).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding error can push `a` slightly past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial great-circle bearing in degrees, normalized into `[0, 360)`, unrounded.
///
/// Coincident points yield 0.
pub fn initial_bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let dlon = (to.longitude() - from.longitude()).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Distance, forward bearing and reverse bearing from `from` to `to`.
///
/// # Examples
///
/// ```
/// use geocoord::Coordinate;
/// use geocoord::geodesic::calculate;
///
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(0.0, 1.0).unwrap();
/// let r = calculate(&a, &b);
/// assert_eq!(r.distance_meters, 111319.49);
/// assert_eq!(r.forward_bearing_deg, 90.0);
/// assert_eq!(r.reverse_bearing_deg, 270.0);
/// ```
pub fn calculate(from: &Coordinate, to: &Coordinate) -> GeodesicResult {
    let distance_meters = round_to(haversine_distance(from, to), 2);

    let mut forward = round_to(initial_bearing(from, to), 2);
    if forward >= 360.0 {
        forward = 0.0;
    }
    let reverse = (forward + 180.0) % 360.0;

    GeodesicResult {
        distance_meters,
        forward_bearing_deg: forward,
        reverse_bearing_deg: round_to(reverse, 2),
    }
}
