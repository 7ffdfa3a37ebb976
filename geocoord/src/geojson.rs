//! GeoJSON export of batch results.
//!
//! Enable the `geojson` feature to use this module.
//!
//! Each successful item that carries a parsed coordinate becomes a `Point`
//! feature. Failed items and items without a position (UTM or MGRS input under
//! [`Operation::Validate`](crate::batch::Operation::Validate)) are skipped.
//!
//! # Example
//!
//! ```ignore
//! use geocoord::batch::{BatchPipeline, Operation};
//! use geocoord::geojson::to_feature_collection;
//!
//! let outcomes = BatchPipeline::default().run(&["40.7128, -74.0060"]);
//! let collection = to_feature_collection(&outcomes);
//! // {"type": "FeatureCollection", "features": [{"type": "Feature",
//! //   "geometry": {"type": "Point", "coordinates": [-74.006, 40.7128]}, ...}]}
//! println!("{}", collection);
//! ```

use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};

use crate::batch::BatchItemOutcome;
use crate::convert::ConversionRecord;
use crate::coordinate::Coordinate;

/// GeoJSON position for a coordinate: `[longitude, latitude]`, plus altitude when present.
pub fn position(coordinate: &Coordinate) -> Vec<f64> {
    let mut pos = vec![coordinate.longitude(), coordinate.latitude()];
    if let Some(alt) = coordinate.altitude() {
        pos.push(alt);
    }
    pos
}

/// Build a `Point` feature for a conversion record.
///
/// Returns `None` when the record has no coordinate.
///
/// Properties: `index`, `input`, `format` and `output`.
pub fn record_to_feature(index: usize, record: &ConversionRecord) -> Option<Feature> {
    let coordinate = record.coordinate.as_ref()?;

    let mut feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::Point(position(coordinate)))),
        id: None,
        properties: None,
        foreign_members: None,
    };
    feature.set_property("index", index);
    feature.set_property("input", record.input.clone());
    feature.set_property("format", record.format.name());
    feature.set_property("output", record.output.clone());

    Some(feature)
}

/// Collect every successful, positioned batch item into a FeatureCollection.
pub fn to_feature_collection(outcomes: &[BatchItemOutcome]) -> FeatureCollection {
    let features: Vec<Feature> = outcomes
        .iter()
        .filter_map(|o| {
            let record = o.outcome.as_ref().ok()?;
            record_to_feature(o.index, record)
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
