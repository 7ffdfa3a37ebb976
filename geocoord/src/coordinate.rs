//! Core coordinate value types.
//!
//! [`Coordinate`] is the validated output of every successful parse.
//! [`SexagesimalValue`] only exists while a DMS token is being parsed or
//! formatted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoordError, Field, Result};

/// A validated geographic position in decimal degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`.
/// Values are only built through [`Coordinate::new`], including when
/// deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    altitude: Option<f64>,
}

/// Unchecked wire form of [`Coordinate`].
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: Option<f64>,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        let coordinate = Coordinate::new(raw.latitude, raw.longitude)?;
        Ok(match raw.altitude {
            Some(alt) => coordinate.with_altitude(alt),
            None => coordinate,
        })
    }
}

impl Coordinate {
    /// Create a coordinate, checking both axes against their valid range.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::OutOfRange`] naming the first offending axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocoord::Coordinate;
    ///
    /// assert!(Coordinate::new(45.5, -122.6).is_ok());
    /// assert!(Coordinate::new(95.0, 10.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordError::OutOfRange {
                field: Field::Latitude,
                value: latitude,
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordError::OutOfRange {
                field: Field::Longitude,
                value: longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
            altitude: None,
        })
    }

    /// Latitude in decimal degrees, positive north.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees, positive east.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Altitude in meters, if known.
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    /// Attach an altitude in meters.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }
}

/// Which axis a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// The pair of direction letters valid for this axis.
    pub fn expected_directions(&self) -> &'static str {
        match self {
            Axis::Latitude => "N or S",
            Axis::Longitude => "E or W",
        }
    }

    /// The range-checked field for the final signed value on this axis.
    pub fn field(&self) -> Field {
        match self {
            Axis::Latitude => Field::Latitude,
            Axis::Longitude => Field::Longitude,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Compass direction letter attached to a sexagesimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    /// Parse a direction letter, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Direction::N),
            'S' => Some(Direction::S),
            'E' => Some(Direction::E),
            'W' => Some(Direction::W),
            _ => None,
        }
    }

    /// The axis this letter belongs to.
    pub fn axis(&self) -> Axis {
        match self {
            Direction::N | Direction::S => Axis::Latitude,
            Direction::E | Direction::W => Axis::Longitude,
        }
    }

    /// `true` for S and W, whose decimal value is negative.
    pub fn is_negative(&self) -> bool {
        matches!(self, Direction::S | Direction::W)
    }

    /// Direction letter for a signed decimal value on `axis`.
    ///
    /// Zero maps to the positive letter (N or E).
    pub fn for_value(value: f64, axis: Axis) -> Self {
        match (axis, value < 0.0) {
            (Axis::Latitude, false) => Direction::N,
            (Axis::Latitude, true) => Direction::S,
            (Axis::Longitude, false) => Direction::E,
            (Axis::Longitude, true) => Direction::W,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Direction::N => 'N',
            Direction::S => 'S',
            Direction::E => 'E',
            Direction::W => 'W',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Degrees, minutes and seconds with a direction letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexagesimalValue {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub direction: Direction,
}

impl SexagesimalValue {
    /// Check the component bounds in order: degrees, minutes, seconds.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::OutOfRange`] for the first field outside its range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=180.0).contains(&self.degrees) {
            return Err(CoordError::OutOfRange {
                field: Field::Degrees,
                value: self.degrees,
            });
        }
        if !(0.0..60.0).contains(&self.minutes) {
            return Err(CoordError::OutOfRange {
                field: Field::Minutes,
                value: self.minutes,
            });
        }
        if !(0.0..60.0).contains(&self.seconds) {
            return Err(CoordError::OutOfRange {
                field: Field::Seconds,
                value: self.seconds,
            });
        }
        Ok(())
    }

    /// Signed decimal degrees: negative for S and W.
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;
        if self.direction.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}
