//! Degrees-minutes-seconds parsing and formatting.
//!
//! # Accepted Token Grammars
//!
//! Two grammars are tried in order; the first match wins.
//!
//! - **Compact**: `<dir><DD|DDD><MM><SS[.frac]>`, fixed-width fields with a
//!   leading direction letter (`N453015`, `W1224030.5`). The seconds field may
//!   be replaced by a minute fraction (`N4530.25` is 45°30.25′).
//! - **Loose**: direction letter leading or trailing; fields separated by any
//!   mix of symbols (`°`, `′`, `″`, `'`, `"`), letters (`d`, `m`, `s`) or
//!   whitespace. Minutes and seconds are optional and default to 0.
//!
//! Parsed components are then checked in order: degrees `[0, 180]`, minutes
//! `[0, 60)`, seconds `[0, 60)`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::coordinate::{Axis, Direction, SexagesimalValue};
use crate::error::{CoordError, Result};

static COMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([NSEW])(\d{2,3})(\d{2})(\d{2}(?:\.\d+)?|\.\d+)?$")
        .expect("Invalid compact DMS regex")
});

const LOOSE_BODY: &str = concat!(
    r"(?P<deg>\d{1,3}(?:\.\d+)?)\s*(?:[°º˚d]\s*)?",
    r"(?:(?P<min>\d{1,2}(?:\.\d+)?)\s*(?:[′’'m]\s*)?)?",
    r#"(?:(?P<sec>\d{1,2}(?:\.\d+)?)\s*(?:''|′′|[″”"s])?)?"#,
);

static LOOSE_LEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?P<dir>[NSEW])\s*{LOOSE_BODY}$"))
        .expect("Invalid leading DMS regex")
});

static LOOSE_TRAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{LOOSE_BODY}\s*(?P<dir>[NSEW])$"))
        .expect("Invalid trailing DMS regex")
});

/// Parse a single DMS token into its validated components.
///
/// # Errors
///
/// - [`CoordError::EmptyInput`] for blank text
/// - [`CoordError::UnrecognizedFormat`] when neither grammar matches
/// - [`CoordError::OutOfRange`] naming the first field outside its bound
///
/// # Examples
///
/// ```
/// use geocoord::dms::parse_sexagesimal;
/// use geocoord::Direction;
///
/// let v = parse_sexagesimal("45°30'15\"N").unwrap();
/// assert_eq!((v.degrees, v.minutes, v.seconds), (45.0, 30.0, 15.0));
/// assert_eq!(v.direction, Direction::N);
/// ```
pub fn parse_sexagesimal(input: &str) -> Result<SexagesimalValue> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoordError::EmptyInput);
    }

    let value = parse_compact(input)
        .or_else(|| parse_loose(input))
        .ok_or_else(|| CoordError::UnrecognizedFormat {
            input: input.to_string(),
        })?;

    value.validate()?;
    Ok(value)
}

/// Parse a single DMS token into signed decimal degrees and its direction.
///
/// The value is negative for `S` and `W`.
///
/// # Errors
///
/// Same as [`parse_sexagesimal`].
pub fn parse_dms(input: &str) -> Result<(f64, Direction)> {
    let value = parse_sexagesimal(input)?;
    Ok((value.to_decimal(), value.direction))
}

fn parse_compact(input: &str) -> Option<SexagesimalValue> {
    let caps = COMPACT.captures(input)?;
    let direction = direction_from(caps.get(1)?.as_str())?;
    let degrees: f64 = caps.get(2)?.as_str().parse().ok()?;
    let mut minutes: f64 = caps.get(3)?.as_str().parse().ok()?;
    let mut seconds = 0.0;

    if let Some(tail) = caps.get(4) {
        let tail = tail.as_str();
        if tail.starts_with('.') {
            // DDMM.mmm: fractional minutes
            minutes += format!("0{tail}").parse::<f64>().ok()?;
        } else {
            seconds = tail.parse().ok()?;
        }
    }

    Some(SexagesimalValue {
        degrees,
        minutes,
        seconds,
        direction,
    })
}

fn parse_loose(input: &str) -> Option<SexagesimalValue> {
    let caps = LOOSE_LEADING
        .captures(input)
        .or_else(|| LOOSE_TRAILING.captures(input))?;

    Some(SexagesimalValue {
        degrees: caps.name("deg")?.as_str().parse().ok()?,
        minutes: optional_field(&caps, "min")?,
        seconds: optional_field(&caps, "sec")?,
        direction: direction_from(caps.name("dir")?.as_str())?,
    })
}

fn optional_field(caps: &Captures<'_>, name: &str) -> Option<f64> {
    match caps.name(name) {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0.0),
    }
}

fn direction_from(letter: &str) -> Option<Direction> {
    letter.chars().next().and_then(Direction::from_char)
}

/// Split a signed decimal value into degrees, minutes and rounded seconds.
///
/// Seconds are rounded to `precision` fraction digits. A rounding result of
/// 60 seconds (or 60 minutes) is carried into the next field.
pub fn to_sexagesimal(value: f64, axis: Axis, precision: usize) -> SexagesimalValue {
    let abs = value.abs();
    let mut degrees = abs.floor();
    let minutes_float = (abs - degrees) * 60.0;
    let mut minutes = minutes_float.floor();
    let mut seconds = round_to((minutes_float - minutes) * 60.0, precision);

    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes -= 60.0;
        degrees += 1.0;
    }

    SexagesimalValue {
        degrees,
        minutes,
        seconds,
        direction: Direction::for_value(value, axis),
    }
}

/// Render one axis as `<dir><deg>°<min>'<sec>"`.
pub fn format_axis(value: f64, axis: Axis, precision: usize) -> String {
    let v = to_sexagesimal(value, axis, precision);
    format!(
        "{}{}°{}'{:.prec$}\"",
        v.direction,
        v.degrees as u32,
        v.minutes as u32,
        v.seconds,
        prec = precision
    )
}

/// Format a decimal latitude/longitude pair as a DMS string.
///
/// # Arguments
///
/// * `latitude` - Validated latitude in decimal degrees
/// * `longitude` - Validated longitude in decimal degrees
/// * `precision` - Fraction digits for the seconds field
///
/// # Examples
///
/// ```
/// use geocoord::dms::format_dms;
///
/// assert_eq!(
///     format_dms(45.504167, -122.675, 0),
///     "N45°30'15\" W122°40'30\""
/// );
/// ```
pub fn format_dms(latitude: f64, longitude: f64, precision: usize) -> String {
    format!(
        "{} {}",
        format_axis(latitude, Axis::Latitude, precision),
        format_axis(longitude, Axis::Longitude, precision)
    )
}

/// Round to `precision` decimal places.
///
/// Beyond 15 places an `f64` carries no further decimal digits, so the value
/// is returned unchanged.
pub(crate) fn round_to(value: f64, precision: usize) -> f64 {
    if precision > 15 {
        return value;
    }
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
