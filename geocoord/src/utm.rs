//! Universal Transverse Mercator projection.
//!
//! This module provides an approximate forward projection from WGS84
//! latitude/longitude to UTM zone, hemisphere, easting and northing, using the
//! standard truncated series expansion (fourth-order meridian arc, fifth-order
//! Transverse Mercator terms).
//!
//! # Constants
//!
//! - Equatorial radius: 6378137 m
//! - Flattening: 1/298.257223563
//! - Scale factor on the central meridian: 0.9996
//! - False easting: 500000 m
//! - False northing: 10000000 m (southern hemisphere only)
//!
//! Polar inputs are not special-cased; they produce a finite but meaningless
//! result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{CoordError, Field, Result};
use crate::format::UTM_PATTERN;

/// WGS84 equatorial radius in meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// UTM scale factor on the central meridian.
pub const UTM_K0: f64 = 0.9996;

const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING: f64 = 10_000_000.0;

/// Hemisphere of a UTM coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    N,
    S,
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::N => f.write_str("N"),
            Hemisphere::S => f.write_str("S"),
        }
    }
}

/// A projected UTM position. Easting and northing are whole meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    /// Zone number, 1 to 60.
    pub zone: u8,
    pub hemisphere: Hemisphere,
    /// Meters east, including the 500 km false easting.
    pub easting: f64,
    /// Meters north, including the 10000 km false northing in the south.
    pub northing: f64,
}

impl fmt::Display for UtmCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.zone, self.hemisphere, self.easting, self.northing
        )
    }
}

/// UTM zone number for a longitude.
///
/// Longitude 180 belongs to zone 60.
///
/// # Examples
///
/// ```
/// use geocoord::utm::zone_for_longitude;
///
/// assert_eq!(zone_for_longitude(-74.006), 18);
/// assert_eq!(zone_for_longitude(-180.0), 1);
/// assert_eq!(zone_for_longitude(180.0), 60);
/// ```
pub fn zone_for_longitude(longitude: f64) -> u8 {
    let zone = ((longitude + 180.0) / 6.0).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

/// Project a validated coordinate to UTM.
///
/// Never fails for a coordinate built with [`Coordinate::new`]. Easting and
/// northing are rounded to the nearest meter.
///
/// # Example
///
/// ```ignore
/// let nyc = Coordinate::new(40.7128, -74.0060)?;
/// let utm = to_utm(&nyc);
/// assert_eq!(utm.to_string(), "18N 583959 4507351");
/// ```
pub fn to_utm(coord: &Coordinate) -> UtmCoordinate {
    let zone = zone_for_longitude(coord.longitude());
    let hemisphere = if coord.latitude() >= 0.0 {
        Hemisphere::N
    } else {
        Hemisphere::S
    };

    let central_meridian = f64::from(zone - 1) * 6.0 - 180.0 + 3.0;

    let e2 = WGS84_F * (2.0 - WGS84_F);
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);

    let phi = coord.latitude().to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let tan_phi = phi.tan();

    let n = WGS84_A / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = cos_phi * (coord.longitude() - central_meridian).to_radians();

    // Meridian arc length from the equator
    let m = WGS84_A
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let easting = UTM_K0
        * n
        * (a + (1.0 - t + c) * a3 / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
        + FALSE_EASTING;

    let mut northing = UTM_K0
        * (m + n
            * tan_phi
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

    if coord.latitude() < 0.0 {
        northing += FALSE_NORTHING;
    }

    UtmCoordinate {
        zone,
        hemisphere,
        easting: easting.round(),
        northing: northing.round(),
    }
}

/// Parse a UTM string such as `18T 583959 4507351`.
///
/// The band letter only selects the hemisphere (`N` and later bands are
/// northern). No inverse projection is performed.
///
/// # Errors
///
/// - [`CoordError::EmptyInput`] for blank text
/// - [`CoordError::UnrecognizedFormat`] when the text is not UTM
/// - [`CoordError::OutOfRange`] when the zone is outside 1 to 60
pub fn parse_utm(input: &str) -> Result<UtmCoordinate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoordError::EmptyInput);
    }

    let unrecognized = || CoordError::UnrecognizedFormat {
        input: input.to_string(),
    };

    let caps = UTM_PATTERN.captures(input).ok_or_else(unrecognized)?;

    let zone: u8 = caps[1].parse().map_err(|_| unrecognized())?;
    if !(1..=60).contains(&zone) {
        return Err(CoordError::OutOfRange {
            field: Field::Zone,
            value: f64::from(zone),
        });
    }

    let band = caps[2]
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .ok_or_else(unrecognized)?;
    let hemisphere = if band >= 'N' {
        Hemisphere::N
    } else {
        Hemisphere::S
    };

    Ok(UtmCoordinate {
        zone,
        hemisphere,
        easting: caps[3].parse().map_err(|_| unrecognized())?,
        northing: caps[4].parse().map_err(|_| unrecognized())?,
    })
}
