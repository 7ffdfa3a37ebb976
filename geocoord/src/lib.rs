//! # geocoord - Coordinate Interpretation and Transformation
//!
//! Detects the notation of free-form coordinate text, parses it into a
//! validated [`Coordinate`], and converts it to decimal degrees, DMS or UTM.
//! Great-circle distance and bearings are computed with the Haversine formula.
//!
//! ## Features
//!
//! - **Detection**: DMS, decimal degrees, UTM and MGRS (detection only)
//! - **Parsing**: compact (`N453015`) and loose (`45°30'15"N`, `N45 30 15`) DMS
//! - **Projection**: WGS84 UTM forward projection
//! - **Batch**: per-line isolation of failures with progress reporting
//!
//! ## Quick Start
//!
//! ```
//! use geocoord::{detect_format, CoordinateFormat, Converter};
//!
//! let input = "N45°30'15\" W122°40'30\"";
//! assert_eq!(detect_format(input), CoordinateFormat::Dms);
//!
//! let converter = Converter::builder().decimal_precision(6).build();
//! assert_eq!(converter.to_decimal(input).unwrap(), "45.504167 -122.675000");
//!
//! let utm = converter.to_utm("40.7128, -74.0060").unwrap();
//! assert_eq!(utm.to_string(), "18N 583959 4507351");
//! ```
//!
//! ## Cargo Features
//!
//! - `async`: `BatchPipeline::run_async` with cooperative tokio yields
//! - `geojson`: export of batch results as a GeoJSON FeatureCollection

pub mod batch;
pub mod convert;
pub mod converter;
pub mod coordinate;
pub mod dms;
pub mod error;
pub mod format;
pub mod geodesic;
pub mod pair;
pub mod utm;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use batch::{BatchItemOutcome, BatchItemReport, BatchPipeline, BatchSummary, Operation};
pub use convert::{ConversionRecord, ConvertOptions, Target, Validation};
pub use converter::{Converter, ConverterBuilder};
pub use coordinate::{Axis, Coordinate, Direction, SexagesimalValue};
pub use error::{CoordError, Field, Result};
pub use format::{detect_format, CoordinateFormat};
pub use geodesic::GeodesicResult;
pub use pair::SplitStrategy;
pub use utm::{Hemisphere, UtmCoordinate};
