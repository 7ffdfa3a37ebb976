//! Single-input operations: parse, convert, validate and measure.
//!
//! Every function here classifies its input with [`detect_format`] first and
//! dispatches on the result. Only DMS and decimal-degree inputs can be
//! converted; UTM and MGRS are recognized but fail with
//! [`CoordError::UnsupportedOperation`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::dms::format_dms;
use crate::error::{CoordError, Result};
use crate::format::{detect_format, CoordinateFormat};
use crate::geodesic::{self, GeodesicResult};
use crate::pair::{parse_decimal_pair, resolve_pair_with, SplitStrategy};
use crate::utm::{self, parse_utm, UtmCoordinate};

/// Fraction digits for decimal-degree output.
pub const DEFAULT_DECIMAL_PRECISION: usize = 9;

/// Fraction digits for the seconds field of DMS output.
pub const DEFAULT_DMS_PRECISION: usize = 2;

/// Batch items processed between cooperative yields.
pub const DEFAULT_YIELD_INTERVAL: usize = 100;

/// Tunables shared by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub decimal_precision: usize,
    pub dms_precision: usize,
    pub split_strategy: SplitStrategy,
    /// Items between yields in [`BatchPipeline::run_async`](crate::batch::BatchPipeline).
    pub yield_interval: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            decimal_precision: DEFAULT_DECIMAL_PRECISION,
            dms_precision: DEFAULT_DMS_PRECISION,
            split_strategy: SplitStrategy::default(),
            yield_interval: DEFAULT_YIELD_INTERVAL,
        }
    }
}

/// Output representation for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Decimal,
    Dms,
    Utm,
}

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Target::Decimal => "Decimal Degrees",
            Target::Dms => "DMS",
            Target::Utm => "UTM",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "decimal" | "dd" | "decimal_degrees" => Ok(Target::Decimal),
            "dms" => Ok(Target::Dms),
            "utm" => Ok(Target::Utm),
            other => Err(format!(
                "Unknown target: {other} (expected decimal, dms or utm)"
            )),
        }
    }
}

/// A successful conversion of one input string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub input: String,
    pub format: CoordinateFormat,
    /// Parsed position, absent for inputs that are only structurally checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm: Option<UtmCoordinate>,
    /// Rendered result.
    pub output: String,
}

/// Result of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub format: CoordinateFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm: Option<UtmCoordinate>,
}

/// Parse DMS or decimal-degree text into a coordinate, splitting DMS pairs at the midpoint.
///
/// # Examples
///
/// ```
/// use geocoord::convert::parse_coordinate;
///
/// let c = parse_coordinate("N45°30'15\" W122°40'30\"").unwrap();
/// assert!((c.latitude() - 45.504167).abs() < 1e-6);
/// ```
pub fn parse_coordinate(input: &str) -> Result<Coordinate> {
    parse_coordinate_with(input, SplitStrategy::Midpoint).map(|(_, c)| c)
}

/// Parse DMS or decimal-degree text, returning the detected format alongside.
///
/// # Errors
///
/// - [`CoordError::EmptyInput`] for blank text
/// - [`CoordError::UnrecognizedFormat`] when no grammar matches
/// - [`CoordError::UnsupportedOperation`] for UTM and MGRS input
/// - Any error from the pair resolver or decimal parse
pub fn parse_coordinate_with(
    input: &str,
    strategy: SplitStrategy,
) -> Result<(CoordinateFormat, Coordinate)> {
    let format = classify(input)?;
    let coordinate = match format {
        CoordinateFormat::Dms => resolve_pair_with(input, strategy)?,
        CoordinateFormat::DecimalDegrees => parse_decimal_pair(input)?,
        CoordinateFormat::Utm | CoordinateFormat::Mgrs => {
            return Err(CoordError::UnsupportedOperation {
                format,
                target: "coordinates",
            })
        }
        CoordinateFormat::Unknown => return Err(unrecognized(input)),
    };
    Ok((format, coordinate))
}

/// Render a coordinate as `"<lat> <lon>"` with `precision` fraction digits.
///
/// ```
/// use geocoord::Coordinate;
/// use geocoord::convert::format_decimal;
///
/// let c = Coordinate::new(45.504167, -122.675).unwrap();
/// assert_eq!(format_decimal(&c, 6), "45.504167 -122.675000");
/// ```
pub fn format_decimal(coordinate: &Coordinate, precision: usize) -> String {
    format!(
        "{:.prec$} {:.prec$}",
        coordinate.latitude(),
        coordinate.longitude(),
        prec = precision
    )
}

/// Convert `input` to `target`, keeping the parsed intermediate values.
pub fn convert(input: &str, target: Target, options: &ConvertOptions) -> Result<ConversionRecord> {
    let (format, coordinate) =
        parse_coordinate_with(input, options.split_strategy).map_err(|e| retarget(e, target))?;

    let (output, utm) = match target {
        Target::Decimal => (format_decimal(&coordinate, options.decimal_precision), None),
        Target::Dms => (
            format_dms(
                coordinate.latitude(),
                coordinate.longitude(),
                options.dms_precision,
            ),
            None,
        ),
        Target::Utm => {
            let utm = utm::to_utm(&coordinate);
            (utm.to_string(), Some(utm))
        }
    };

    Ok(ConversionRecord {
        input: input.trim().to_string(),
        format,
        coordinate: Some(coordinate),
        utm,
        output,
    })
}

/// Convert to a decimal-degree string.
///
/// # Examples
///
/// ```
/// use geocoord::convert::{to_decimal, ConvertOptions};
///
/// let options = ConvertOptions {
///     decimal_precision: 6,
///     ..Default::default()
/// };
/// let out = to_decimal("N45°30'15\" W122°40'30\"", &options).unwrap();
/// assert_eq!(out, "45.504167 -122.675000");
/// ```
pub fn to_decimal(input: &str, options: &ConvertOptions) -> Result<String> {
    convert(input, Target::Decimal, options).map(|r| r.output)
}

/// Convert to a DMS string.
pub fn to_dms(input: &str, options: &ConvertOptions) -> Result<String> {
    convert(input, Target::Dms, options).map(|r| r.output)
}

/// Project to UTM.
pub fn to_utm(input: &str, options: &ConvertOptions) -> Result<UtmCoordinate> {
    let (_, coordinate) = parse_coordinate_with(input, options.split_strategy)
        .map_err(|e| retarget(e, Target::Utm))?;
    Ok(utm::to_utm(&coordinate))
}

/// Check that `input` is a well-formed coordinate in any known notation.
///
/// DMS and decimal input must fully parse, UTM input must structurally parse,
/// and MGRS input only has to match its grammar.
///
/// # Errors
///
/// - [`CoordError::EmptyInput`] for blank text
/// - [`CoordError::UnrecognizedFormat`] when no grammar matches
/// - Any parse error for the detected format
pub fn validate(input: &str, options: &ConvertOptions) -> Result<Validation> {
    let format = classify(input)?;

    let validation = match format {
        CoordinateFormat::Dms | CoordinateFormat::DecimalDegrees => {
            let (_, coordinate) = parse_coordinate_with(input, options.split_strategy)?;
            Validation {
                format,
                coordinate: Some(coordinate),
                utm: None,
            }
        }
        CoordinateFormat::Utm => Validation {
            format,
            coordinate: None,
            utm: Some(parse_utm(input)?),
        },
        CoordinateFormat::Mgrs => Validation {
            format,
            coordinate: None,
            utm: None,
        },
        CoordinateFormat::Unknown => return Err(unrecognized(input)),
    };

    Ok(validation)
}

/// Great-circle distance and bearings between two coordinate strings.
///
/// # Errors
///
/// Any error from parsing either input.
pub fn distance(from: &str, to: &str, options: &ConvertOptions) -> Result<GeodesicResult> {
    let (_, a) = parse_coordinate_with(from, options.split_strategy)?;
    let (_, b) = parse_coordinate_with(to, options.split_strategy)?;
    Ok(geodesic::calculate(&a, &b))
}

/// Detect the format, rejecting blank and unrecognized text.
fn classify(input: &str) -> Result<CoordinateFormat> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoordError::EmptyInput);
    }

    match detect_format(trimmed) {
        CoordinateFormat::Unknown => Err(unrecognized(trimmed)),
        format => Ok(format),
    }
}

fn unrecognized(input: &str) -> CoordError {
    CoordError::UnrecognizedFormat {
        input: input.trim().to_string(),
    }
}

/// Name the requested target in unsupported-source errors.
fn retarget(err: CoordError, target: Target) -> CoordError {
    match err {
        CoordError::UnsupportedOperation { format, .. } => CoordError::UnsupportedOperation {
            format,
            target: target.name(),
        },
        other => other,
    }
}
