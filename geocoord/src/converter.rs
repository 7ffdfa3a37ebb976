//! Configured entry point to the engine.
//!
//! [`Converter`] bundles a [`ConvertOptions`] with the free functions of
//! [`crate::convert`], so callers configure precision and split strategy once.
//!
//! ```
//! use geocoord::{ConverterBuilder, SplitStrategy};
//!
//! let converter = ConverterBuilder::new()
//!     .decimal_precision(4)
//!     .split_strategy(SplitStrategy::DirectionAnchored)
//!     .build();
//!
//! assert_eq!(
//!     converter.to_decimal("N45 30 15 W122 40").unwrap(),
//!     "45.5042 -122.6667"
//! );
//! ```

use crate::batch::{BatchPipeline, Operation};
use crate::convert::{self, ConversionRecord, ConvertOptions, Target, Validation};
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::format::{detect_format, CoordinateFormat};
use crate::geodesic::GeodesicResult;
use crate::pair::SplitStrategy;
use crate::utm::UtmCoordinate;

/// Coordinate converter with fixed options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Detect the notation of `input`. Never fails.
    pub fn detect(&self, input: &str) -> CoordinateFormat {
        detect_format(input)
    }

    /// Parse DMS or decimal text into a coordinate.
    pub fn parse(&self, input: &str) -> Result<Coordinate> {
        convert::parse_coordinate_with(input, self.options.split_strategy).map(|(_, c)| c)
    }

    pub fn convert(&self, input: &str, target: Target) -> Result<ConversionRecord> {
        convert::convert(input, target, &self.options)
    }

    pub fn to_decimal(&self, input: &str) -> Result<String> {
        convert::to_decimal(input, &self.options)
    }

    pub fn to_dms(&self, input: &str) -> Result<String> {
        convert::to_dms(input, &self.options)
    }

    pub fn to_utm(&self, input: &str) -> Result<UtmCoordinate> {
        convert::to_utm(input, &self.options)
    }

    pub fn validate(&self, input: &str) -> Result<Validation> {
        convert::validate(input, &self.options)
    }

    /// Distance and bearings between two coordinate strings.
    pub fn distance(&self, from: &str, to: &str) -> Result<GeodesicResult> {
        convert::distance(from, to, &self.options)
    }

    /// A batch pipeline sharing this converter's options.
    pub fn batch(&self, operation: Operation) -> BatchPipeline {
        BatchPipeline::new(operation, self.options)
    }
}

/// Builder for [`Converter`].
///
/// # Example
///
/// ```ignore
/// use geocoord::ConverterBuilder;
///
/// let converter = ConverterBuilder::from_env()
///     .dms_precision(0)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConverterBuilder {
    options: ConvertOptions,
}

impl ConverterBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GEOCOORD_DECIMAL_PRECISION` | Fraction digits for decimal output | 9 |
    /// | `GEOCOORD_DMS_PRECISION` | Fraction digits for DMS seconds | 2 |
    /// | `GEOCOORD_SPLIT` | `midpoint` or `direction` | midpoint |
    /// | `GEOCOORD_YIELD_INTERVAL` | Batch items between async yields | 100 |
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_env() -> Self {
        let mut options = ConvertOptions::default();

        if let Some(v) = env_value("GEOCOORD_DECIMAL_PRECISION") {
            options.decimal_precision = v;
        }
        if let Some(v) = env_value("GEOCOORD_DMS_PRECISION") {
            options.dms_precision = v;
        }
        if let Some(v) = env_value::<SplitStrategy>("GEOCOORD_SPLIT") {
            options.split_strategy = v;
        }
        if let Some(v) = env_value("GEOCOORD_YIELD_INTERVAL") {
            options.yield_interval = v;
        }

        Self { options }
    }

    pub fn decimal_precision(mut self, precision: usize) -> Self {
        self.options.decimal_precision = precision;
        self
    }

    pub fn dms_precision(mut self, precision: usize) -> Self {
        self.options.dms_precision = precision;
        self
    }

    pub fn split_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.options.split_strategy = strategy;
        self
    }

    /// Set how many batch items run between async yields. Zero disables yielding.
    pub fn yield_interval(mut self, interval: usize) -> Self {
        self.options.yield_interval = interval;
        self
    }

    pub fn build(self) -> Converter {
        Converter::new(self.options)
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{DEFAULT_DECIMAL_PRECISION, DEFAULT_DMS_PRECISION};

    const ENV_KEYS: [&str; 4] = [
        "GEOCOORD_DECIMAL_PRECISION",
        "GEOCOORD_DMS_PRECISION",
        "GEOCOORD_SPLIT",
        "GEOCOORD_YIELD_INTERVAL",
    ];

    #[test]
    fn test_builder_defaults() {
        let converter = Converter::builder().build();
        assert_eq!(converter.options().decimal_precision, DEFAULT_DECIMAL_PRECISION);
        assert_eq!(converter.options().dms_precision, DEFAULT_DMS_PRECISION);
        assert_eq!(converter.options().split_strategy, SplitStrategy::Midpoint);
        assert_eq!(converter, Converter::default());
    }

    #[test]
    fn test_builder_setters() {
        let converter = ConverterBuilder::new()
            .decimal_precision(2)
            .dms_precision(0)
            .yield_interval(10)
            .build();

        assert_eq!(converter.to_decimal("45.504167, -122.676").unwrap(), "45.50 -122.68");
        assert_eq!(
            converter.to_dms("45.504167, -122.675").unwrap(),
            "N45°30'15\" W122°40'30\""
        );
        assert_eq!(converter.batch(Operation::ToDms).options().yield_interval, 10);
    }

    #[test]
    fn test_converter_operations() {
        let converter = Converter::default();
        assert_eq!(converter.detect("18T 583959 4507351"), CoordinateFormat::Utm);
        assert_eq!(converter.to_utm("40.7128, -74.0060").unwrap().zone, 18);
        assert!(converter.validate("18TWL8395907350").is_ok());

        let c = converter.parse("45°30'15\"N 122°40'30\"W").unwrap();
        assert!((c.longitude() + 122.675).abs() < 1e-9);

        let r = converter.distance("0, 0", "0, 1").unwrap();
        assert_eq!(r.forward_bearing_deg, 90.0);
    }

    // All environment cases live in one test so parallel tests never see
    // each other's variables.
    #[test]
    fn test_from_env() {
        let originals: Vec<_> = ENV_KEYS.iter().map(|k| std::env::var(k).ok()).collect();

        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        let converter = ConverterBuilder::from_env().build();
        assert_eq!(converter, Converter::default());

        std::env::set_var("GEOCOORD_DECIMAL_PRECISION", "6");
        std::env::set_var("GEOCOORD_DMS_PRECISION", "1");
        std::env::set_var("GEOCOORD_SPLIT", "direction");
        std::env::set_var("GEOCOORD_YIELD_INTERVAL", "25");
        let options = *ConverterBuilder::from_env().build().options();
        assert_eq!(options.decimal_precision, 6);
        assert_eq!(options.dms_precision, 1);
        assert_eq!(options.split_strategy, SplitStrategy::DirectionAnchored);
        assert_eq!(options.yield_interval, 25);

        // Invalid values keep the default
        std::env::set_var("GEOCOORD_DECIMAL_PRECISION", "lots");
        std::env::set_var("GEOCOORD_SPLIT", "diagonal");
        let options = *ConverterBuilder::from_env().build().options();
        assert_eq!(options.decimal_precision, DEFAULT_DECIMAL_PRECISION);
        assert_eq!(options.split_strategy, SplitStrategy::Midpoint);
        assert_eq!(options.dms_precision, 1);

        for (key, original) in ENV_KEYS.iter().zip(originals) {
            match original {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}
