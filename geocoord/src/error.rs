//! Error types for the geocoord library.

use std::fmt;

use thiserror::Error;

use crate::coordinate::{Axis, Direction};
use crate::format::CoordinateFormat;

/// A numeric field that is range-checked during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Degrees component of a sexagesimal value.
    Degrees,
    /// Minutes component of a sexagesimal value.
    Minutes,
    /// Seconds component of a sexagesimal value.
    Seconds,
    /// Final signed latitude.
    Latitude,
    /// Final signed longitude.
    Longitude,
    /// UTM zone number.
    Zone,
}

impl Field {
    /// Human-readable description of the accepted interval.
    pub fn valid_range(&self) -> &'static str {
        match self {
            Field::Degrees => "[0, 180]",
            Field::Minutes | Field::Seconds => "[0, 60)",
            Field::Latitude => "[-90, 90]",
            Field::Longitude => "[-180, 180]",
            Field::Zone => "[1, 60]",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Degrees => "Degrees",
            Field::Minutes => "Minutes",
            Field::Seconds => "Seconds",
            Field::Latitude => "Latitude",
            Field::Longitude => "Longitude",
            Field::Zone => "Zone",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when interpreting or converting coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Blank or whitespace-only input.
    #[error("Empty input")]
    EmptyInput,

    /// The text matches none of the supported grammars.
    #[error("Unrecognized coordinate format: {input}")]
    UnrecognizedFormat { input: String },

    /// A pair input did not contain both latitude and longitude.
    #[error("Missing coordinate component: expected latitude and longitude, found {found} part(s)")]
    MissingComponent { found: usize },

    /// A numeric field violates its bound.
    #[error("{field} out of range: {value} (valid range {})", .field.valid_range())]
    OutOfRange { field: Field, value: f64 },

    /// A latitude carries E/W or a longitude carries N/S.
    #[error("Invalid direction '{direction}' for {axis} (expected {})", .axis.expected_directions())]
    WrongAxisDirection { axis: Axis, direction: Direction },

    /// The input format was recognized but cannot be converted to the target.
    #[error("Conversion from {format} to {target} is not supported")]
    UnsupportedOperation {
        format: CoordinateFormat,
        target: &'static str,
    },
}

impl CoordError {
    /// Stable machine-readable code for this error category.
    pub fn code(&self) -> &'static str {
        match self {
            CoordError::EmptyInput => "empty_input",
            CoordError::UnrecognizedFormat { .. } => "unrecognized_format",
            CoordError::MissingComponent { .. } => "missing_component",
            CoordError::OutOfRange { .. } => "out_of_range",
            CoordError::WrongAxisDirection { .. } => "wrong_axis_direction",
            CoordError::UnsupportedOperation { .. } => "unsupported_operation",
        }
    }
}

/// Result type alias using [`CoordError`].
pub type Result<T> = std::result::Result<T, CoordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoordError::OutOfRange {
            field: Field::Latitude,
            value: 95.0,
        };
        assert_eq!(
            err.to_string(),
            "Latitude out of range: 95 (valid range [-90, 90])"
        );

        let err = CoordError::OutOfRange {
            field: Field::Minutes,
            value: 61.5,
        };
        assert!(err.to_string().contains("Minutes"));
        assert!(err.to_string().contains("61.5"));
        assert!(err.to_string().contains("[0, 60)"));

        let err = CoordError::WrongAxisDirection {
            axis: Axis::Latitude,
            direction: Direction::E,
        };
        assert_eq!(
            err.to_string(),
            "Invalid direction 'E' for latitude (expected N or S)"
        );

        let err = CoordError::UnsupportedOperation {
            format: CoordinateFormat::Utm,
            target: "decimal degrees",
        };
        assert_eq!(
            err.to_string(),
            "Conversion from UTM to decimal degrees is not supported"
        );

        assert_eq!(CoordError::EmptyInput.to_string(), "Empty input");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CoordError::EmptyInput.code(), "empty_input");
        assert_eq!(
            CoordError::UnrecognizedFormat {
                input: "bogus".to_string()
            }
            .code(),
            "unrecognized_format"
        );
        assert_eq!(
            CoordError::MissingComponent { found: 1 }.code(),
            "missing_component"
        );
    }
}
