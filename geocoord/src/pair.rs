//! Latitude/longitude pair resolution.
//!
//! A pair string is tokenized on runs of whitespace and commas, split into a
//! latitude half and a longitude half, and each half is parsed as a single
//! DMS token.
//!
//! # Split Strategies
//!
//! [`SplitStrategy::Midpoint`] splits the token list at `floor(count / 2)`.
//! It only splits correctly when both halves have the same number of tokens:
//! `N45 30 15 W122 40` is split as `N45 30` / `15 W122 40` and fails.
//!
//! [`SplitStrategy::DirectionAnchored`] splits after the first token ending in
//! `N`/`S`, or before the first later token starting with `E`/`W`, and falls
//! back to the midpoint when neither anchor is present.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinate::{Axis, Coordinate, Direction};
use crate::dms::parse_dms;
use crate::error::{CoordError, Result};
use crate::format::DECIMAL_PATTERN;

/// How a tokenized pair is divided into latitude and longitude halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Split at the middle token.
    #[default]
    Midpoint,
    /// Split at the direction letters, falling back to the midpoint.
    DirectionAnchored,
}

impl FromStr for SplitStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "midpoint" | "mid" => Ok(SplitStrategy::Midpoint),
            "direction" | "direction-anchored" | "direction_anchored" | "anchored" => {
                Ok(SplitStrategy::DirectionAnchored)
            }
            other => Err(format!(
                "Unknown split strategy: {other} (expected midpoint or direction)"
            )),
        }
    }
}

/// Resolve a DMS pair using the midpoint split.
///
/// # Errors
///
/// - [`CoordError::EmptyInput`] for blank text
/// - [`CoordError::MissingComponent`] when fewer than two tokens are present
/// - [`CoordError::UnrecognizedFormat`] / [`CoordError::OutOfRange`] from
///   parsing either half
/// - [`CoordError::WrongAxisDirection`] when a half carries the other axis' letter
/// - [`CoordError::OutOfRange`] when the final latitude or longitude is out of range
///
/// # Examples
///
/// ```
/// use geocoord::pair::resolve_pair;
///
/// let c = resolve_pair("N45°30'15\" W122°40'30\"").unwrap();
/// assert!((c.latitude() - 45.504167).abs() < 1e-6);
/// assert!((c.longitude() + 122.675).abs() < 1e-6);
/// ```
pub fn resolve_pair(input: &str) -> Result<Coordinate> {
    resolve_pair_with(input, SplitStrategy::Midpoint)
}

/// Resolve a DMS pair using the given split strategy.
///
/// # Errors
///
/// Same as [`resolve_pair`].
pub fn resolve_pair_with(input: &str, strategy: SplitStrategy) -> Result<Coordinate> {
    if input.trim().is_empty() {
        return Err(CoordError::EmptyInput);
    }

    let tokens = tokenize(input);
    if tokens.len() < 2 {
        return Err(CoordError::MissingComponent {
            found: tokens.len(),
        });
    }

    let split = match strategy {
        SplitStrategy::Midpoint => tokens.len() / 2,
        SplitStrategy::DirectionAnchored => {
            direction_anchor(&tokens).unwrap_or(tokens.len() / 2)
        }
    };

    // Both halves parse before either direction is checked
    let latitude = parse_dms(&tokens[..split].join(" "))?;
    let longitude = parse_dms(&tokens[split..].join(" "))?;

    let latitude = check_axis(latitude, Axis::Latitude)?;
    let longitude = check_axis(longitude, Axis::Longitude)?;

    Coordinate::new(latitude, longitude)
}

/// Parse two signed decimal numbers separated by a comma or whitespace.
///
/// # Errors
///
/// - [`CoordError::EmptyInput`] for blank text
/// - [`CoordError::MissingComponent`] when only one number is present
/// - [`CoordError::UnrecognizedFormat`] when the text is not two numbers
/// - [`CoordError::OutOfRange`] when latitude or longitude is out of range
pub fn parse_decimal_pair(input: &str) -> Result<Coordinate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoordError::EmptyInput);
    }

    let unrecognized = || CoordError::UnrecognizedFormat {
        input: input.to_string(),
    };

    let Some(caps) = DECIMAL_PATTERN.captures(input) else {
        let tokens = tokenize(input);
        if tokens.len() < 2 {
            return Err(CoordError::MissingComponent {
                found: tokens.len(),
            });
        }
        return Err(unrecognized());
    };

    let latitude: f64 = caps[1].parse().map_err(|_| unrecognized())?;
    let longitude: f64 = caps[2].parse().map_err(|_| unrecognized())?;

    Coordinate::new(latitude, longitude)
}

fn tokenize(input: &str) -> Vec<&str> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Check that a parsed half's direction letter belongs to `axis`.
fn check_axis((value, direction): (f64, Direction), axis: Axis) -> Result<f64> {
    if direction.axis() != axis {
        return Err(CoordError::WrongAxisDirection { axis, direction });
    }
    Ok(value)
}

/// Index at which the longitude half starts, if the tokens carry direction anchors.
fn direction_anchor(tokens: &[&str]) -> Option<usize> {
    let last = tokens.len() - 1;

    let after_latitude = tokens[..last]
        .iter()
        .position(|t| t.ends_with(['N', 'S']))
        .map(|i| i + 1);

    after_latitude.or_else(|| {
        tokens
            .iter()
            .skip(1)
            .position(|t| t.starts_with(['E', 'W']))
            .map(|i| i + 1)
    })
}
