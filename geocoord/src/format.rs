//! Coordinate notation detection.
//!
//! [`detect_format`] inspects free-form text and reports which notation it
//! uses. Grammars overlap (a decimal-looking token can also satisfy a loose
//! DMS degree pattern), so they are tested in a fixed order:
//!
//! 1. DMS
//! 2. UTM
//! 3. MGRS
//! 4. Decimal degrees
//!
//! Anything else is [`CoordinateFormat::Unknown`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Notation detected for a coordinate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateFormat {
    /// Degrees-minutes-seconds, e.g. `N45°30'15" W122°40'30"`.
    #[serde(rename = "DMS")]
    Dms,
    /// Signed decimal degrees, e.g. `45.5042, -122.6751`.
    #[serde(rename = "DecimalDegrees")]
    DecimalDegrees,
    /// UTM zone/band, easting and northing, e.g. `18T 583959 4507351`.
    #[serde(rename = "UTM")]
    Utm,
    /// Military Grid Reference System, e.g. `18TWL8395907350`.
    #[serde(rename = "MGRS")]
    Mgrs,
    /// No known grammar matched.
    Unknown,
}

impl CoordinateFormat {
    /// Display name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            CoordinateFormat::Dms => "DMS",
            CoordinateFormat::DecimalDegrees => "Decimal Degrees",
            CoordinateFormat::Utm => "UTM",
            CoordinateFormat::Mgrs => "MGRS",
            CoordinateFormat::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CoordinateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A digit followed by a degree/minute/second symbol, or by `d`/`m` letter markers.
static DMS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\d\s*(?:[°º˚′’″”'"]|[dm]\s*\d)"#).expect("Invalid DMS marker regex")
});

static DIRECTION_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[NSEW]").expect("Invalid direction regex"));

/// Direction letter at the start of the text beside 2-3 digits.
///
/// Single-digit degrees separated only by whitespace (`N5 30 15 W5 30 15`)
/// are not detected; pad the degrees (`N05 30 15`) or add symbols
/// (`N5°30'15"`). [`crate::dms::parse_sexagesimal`] still accepts the
/// single-digit token on its own.
static DMS_LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[NSEW]\s*\d{2,3}").expect("Invalid leading DMS regex"));

/// Direction letter at the end of the text after 2-3 digits.
static DMS_TRAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d{2,3}(?:\.\d+)?\s*[NSEW]$").expect("Invalid trailing DMS regex")
});

/// `<zone><band> <easting> <northing>`; bands exclude I and O.
pub(crate) static UTM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})([C-HJ-NP-X])\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)$")
        .expect("Invalid UTM regex")
});

/// `<zone><band><column><row><digits>`, tested with whitespace removed.
static MGRS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d{1,2}[C-HJ-NP-X][A-HJ-NP-Z][A-HJ-NP-V]\d{2,10}$")
        .expect("Invalid MGRS regex")
});

pub(crate) static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*(?:,\s*|\s+)([+-]?(?:\d+(?:\.\d*)?|\.\d+))$")
        .expect("Invalid decimal regex")
});

/// Detect the notation used by `input`.
///
/// Never fails: text that matches no grammar, including empty text, yields
/// [`CoordinateFormat::Unknown`].
///
/// # Examples
///
/// ```
/// use geocoord::format::{detect_format, CoordinateFormat};
///
/// assert_eq!(detect_format("N45°30'15\" W122°40'30\""), CoordinateFormat::Dms);
/// assert_eq!(detect_format("18T 583959 4507351"), CoordinateFormat::Utm);
/// assert_eq!(detect_format("18TWL8395907350"), CoordinateFormat::Mgrs);
/// assert_eq!(detect_format("40.7128, -74.0060"), CoordinateFormat::DecimalDegrees);
/// assert_eq!(detect_format("bogus"), CoordinateFormat::Unknown);
/// ```
pub fn detect_format(input: &str) -> CoordinateFormat {
    let input = input.trim();
    if input.is_empty() {
        return CoordinateFormat::Unknown;
    }

    let format = if is_dms(input) {
        CoordinateFormat::Dms
    } else if UTM_PATTERN.is_match(input) {
        CoordinateFormat::Utm
    } else if is_mgrs(input) {
        CoordinateFormat::Mgrs
    } else if DECIMAL_PATTERN.is_match(input) {
        CoordinateFormat::DecimalDegrees
    } else {
        CoordinateFormat::Unknown
    };

    tracing::debug!(input, format = %format, "Detected coordinate format");
    format
}

fn is_dms(input: &str) -> bool {
    (DMS_MARKER.is_match(input) && DIRECTION_LETTER.is_match(input))
        || DMS_LEADING.is_match(input)
        || DMS_TRAILING.is_match(input)
}

fn is_mgrs(input: &str) -> bool {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    MGRS_PATTERN.is_match(&compact)
}
