//! Batch processing of coordinate lines.
//!
//! [`BatchPipeline`] applies one [`Operation`] to every line of an input, in
//! order. A failing line is recorded as that item's outcome and never stops the
//! batch, so the output always has one [`BatchItemOutcome`] per input line with
//! `outcome[i].index == i`.
//!
//! # Example
//!
//! ```
//! use geocoord::batch::{BatchPipeline, Operation};
//! use geocoord::ConvertOptions;
//!
//! let pipeline = BatchPipeline::new(Operation::ToDecimal, ConvertOptions::default());
//! let results = pipeline.run(&["", "40.7,-74.0", "bogus"]);
//!
//! assert_eq!(results.len(), 3);
//! assert!(results[0].outcome.is_err());
//! assert!(results[1].outcome.is_ok());
//! assert!(results[2].outcome.is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::convert::{self, ConversionRecord, ConvertOptions, Target};
use crate::error::Result;

/// Operation applied to every line of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "validate")]
    Validate,
    #[default]
    #[serde(rename = "decimal", alias = "to_decimal")]
    ToDecimal,
    #[serde(rename = "utm", alias = "to_utm")]
    ToUtm,
    #[serde(rename = "dms", alias = "to_dms")]
    ToDms,
}

impl Operation {
    /// Conversion target, or `None` for [`Operation::Validate`].
    pub fn target(&self) -> Option<Target> {
        match self {
            Operation::Validate => None,
            Operation::ToDecimal => Some(Target::Decimal),
            Operation::ToUtm => Some(Target::Utm),
            Operation::ToDms => Some(Target::Dms),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Validate => "validate",
            Operation::ToDecimal => "decimal",
            Operation::ToUtm => "utm",
            Operation::ToDms => "dms",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "validate" => Ok(Operation::Validate),
            "decimal" | "to_decimal" | "to-decimal" => Ok(Operation::ToDecimal),
            "utm" | "to_utm" | "to-utm" => Ok(Operation::ToUtm),
            "dms" | "to_dms" | "to-dms" => Ok(Operation::ToDms),
            other => Err(format!(
                "Unknown operation: {other} (expected validate, decimal, utm or dms)"
            )),
        }
    }
}

/// Outcome of one batch line, tagged with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItemOutcome {
    /// Zero-based line index.
    pub index: usize,
    pub input: String,
    pub outcome: Result<ConversionRecord>,
}

impl BatchItemOutcome {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Serializable view of this outcome.
    pub fn report(&self) -> BatchItemReport {
        match &self.outcome {
            Ok(record) => BatchItemReport {
                index: self.index,
                input: self.input.clone(),
                success: true,
                data: Some(record.clone()),
                error: None,
                code: None,
            },
            Err(e) => BatchItemReport {
                index: self.index,
                input: self.input.clone(),
                success: false,
                data: None,
                error: Some(e.to_string()),
                code: Some(e.code().to_string()),
            },
        }
    }
}

/// Flat, serializable form of a [`BatchItemOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemReport {
    pub index: usize,
    pub input: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ConversionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchItemOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    /// Fraction of items that succeeded (0.0 to 1.0).
    ///
    /// Returns 0.0 for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total as f64
        }
    }
}

/// Applies an [`Operation`] to an ordered list of lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchPipeline {
    operation: Operation,
    options: ConvertOptions,
}

impl BatchPipeline {
    pub fn new(operation: Operation, options: ConvertOptions) -> Self {
        Self { operation, options }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Process every line.
    pub fn run<S: AsRef<str>>(&self, lines: &[S]) -> Vec<BatchItemOutcome> {
        self.run_with_progress(lines, |_| {})
    }

    /// Process every line, calling `progress` with the completed percentage
    /// (`completed / total * 100`) after each item.
    pub fn run_with_progress<S, F>(&self, lines: &[S], mut progress: F) -> Vec<BatchItemOutcome>
    where
        S: AsRef<str>,
        F: FnMut(f64),
    {
        let total = lines.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, line) in lines.iter().enumerate() {
            outcomes.push(self.process_line(index, line.as_ref()));
            progress(percent(index + 1, total));
        }

        self.log_summary(&outcomes);
        outcomes
    }

    /// Process every line, yielding to the tokio scheduler every
    /// `yield_interval` items.
    ///
    /// Dropping the returned future cancels the batch at its next yield point;
    /// items already processed are discarded.
    #[cfg(feature = "async")]
    pub async fn run_async<S, F>(&self, lines: &[S], mut progress: F) -> Vec<BatchItemOutcome>
    where
        S: AsRef<str>,
        F: FnMut(f64),
    {
        let total = lines.len();
        let interval = self.options.yield_interval;
        let mut outcomes = Vec::with_capacity(total);

        for (index, line) in lines.iter().enumerate() {
            outcomes.push(self.process_line(index, line.as_ref()));
            progress(percent(index + 1, total));

            if interval > 0 && (index + 1) % interval == 0 {
                tokio::task::yield_now().await;
            }
        }

        self.log_summary(&outcomes);
        outcomes
    }

    /// Apply the operation to a single line.
    pub fn process_line(&self, index: usize, line: &str) -> BatchItemOutcome {
        let outcome = match self.operation.target() {
            Some(target) => convert::convert(line, target, &self.options),
            None => validate_record(line, &self.options),
        };

        if let Err(e) = &outcome {
            tracing::debug!(index, input = line, error = %e, "Batch item failed");
        }

        BatchItemOutcome {
            index,
            input: line.to_string(),
            outcome,
        }
    }

    fn log_summary(&self, outcomes: &[BatchItemOutcome]) {
        let summary = BatchSummary::from_outcomes(outcomes);
        tracing::info!(
            operation = %self.operation,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch complete"
        );
    }
}

fn validate_record(line: &str, options: &ConvertOptions) -> Result<ConversionRecord> {
    let validation = convert::validate(line, options)?;
    Ok(ConversionRecord {
        input: line.trim().to_string(),
        format: validation.format,
        coordinate: validation.coordinate,
        utm: validation.utm,
        output: format!("Valid {}", validation.format),
    })
}

fn percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoordError;
    use crate::format::CoordinateFormat;

    fn failure_at(outcomes: &[BatchItemOutcome], index: usize) -> Option<&CoordError> {
        outcomes.get(index).and_then(|o| o.outcome.as_ref().err())
    }

    fn pipeline(operation: Operation) -> BatchPipeline {
        BatchPipeline::new(operation, ConvertOptions::default())
    }

    #[test]
    fn test_mixed_batch_keeps_order() {
        let results = pipeline(Operation::ToDecimal).run(&["", "40.7,-74.0", "bogus"]);

        assert_eq!(results.len(), 3);
        assert_eq!(failure_at(&results, 0), Some(&CoordError::EmptyInput));
        assert!(results[1].is_success());
        assert!(matches!(
            failure_at(&results, 2),
            Some(CoordError::UnrecognizedFormat { .. })
        ));
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.index, i);
        }
    }

    #[test]
    fn test_empty_line_message() {
        let results = pipeline(Operation::ToUtm).run(&["   "]);
        let report = results[0].report();
        assert!(!report.success);
        assert_eq!(report.error.as_deref(), Some("Empty input"));
        assert_eq!(report.code.as_deref(), Some("empty_input"));
    }

    #[test]
    fn test_all_failures_still_produce_outcomes() {
        let lines = vec!["x"; 250];
        let results = pipeline(Operation::ToDms).run(&lines);
        assert_eq!(results.len(), 250);
        assert!(results.iter().all(|r| !r.is_success()));
        assert_eq!(results[249].index, 249);
    }

    #[test]
    fn test_progress_callback() {
        let mut seen = Vec::new();
        pipeline(Operation::ToDecimal)
            .run_with_progress(&["1, 2", "3, 4", "5, 6", "7, 8"], |p| seen.push(p));
        assert_eq!(seen, vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_empty_batch() {
        let mut calls = 0;
        let results =
            pipeline(Operation::Validate).run_with_progress(&[] as &[&str], |_| calls += 1);
        assert!(results.is_empty());
        assert_eq!(calls, 0);
        assert_eq!(BatchSummary::from_outcomes(&results).success_rate(), 0.0);
    }

    #[test]
    fn test_validate_operation() {
        let results = pipeline(Operation::Validate).run(&[
            "N45°30'15\" W122°40'30\"",
            "18T 583959 4507351",
            "18TWL8395907350",
            "95, 0",
        ]);

        let record = results[0].outcome.as_ref().unwrap();
        assert_eq!(record.output, "Valid DMS");
        assert!(record.coordinate.is_some());

        let record = results[1].outcome.as_ref().unwrap();
        assert_eq!(record.format, CoordinateFormat::Utm);
        assert_eq!(record.output, "Valid UTM");

        assert_eq!(
            results[2].outcome.as_ref().unwrap().format,
            CoordinateFormat::Mgrs
        );
        assert!(!results[3].is_success());
    }

    #[test]
    fn test_utm_operation_records_projection() {
        let results = pipeline(Operation::ToUtm).run(&["40.7128, -74.0060", "18T 583959 4507351"]);

        let record = results[0].outcome.as_ref().unwrap();
        assert_eq!(record.output, "18N 583959 4507351");
        assert_eq!(record.utm.map(|u| u.zone), Some(18));

        assert!(matches!(
            failure_at(&results, 1),
            Some(CoordError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_summary() {
        let results = pipeline(Operation::ToDecimal).run(&["1, 2", "", "3, 4", "nope"]);
        let summary = BatchSummary::from_outcomes(&results);
        assert_eq!(
            summary,
            BatchSummary {
                total: 4,
                succeeded: 2,
                failed: 2,
            }
        );
        assert_eq!(summary.success_rate(), 0.5);
    }

    #[test]
    fn test_report_serialization() {
        let results = pipeline(Operation::ToDecimal).run(&["1, 2", ""]);
        let ok = serde_json::to_value(results[0].report()).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"]["format"], "DecimalDegrees");
        assert!(ok.get("error").is_none());

        let err = serde_json::to_value(results[1].report()).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["code"], "empty_input");
        assert!(err.get("data").is_none());
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("validate".parse(), Ok(Operation::Validate));
        assert_eq!("UTM".parse(), Ok(Operation::ToUtm));
        assert_eq!("to-dms".parse(), Ok(Operation::ToDms));
        assert!("kml".parse::<Operation>().is_err());

        let op: Operation = serde_json::from_str("\"to_decimal\"").unwrap();
        assert_eq!(op, Operation::ToDecimal);
        assert_eq!(serde_json::to_string(&Operation::ToDms).unwrap(), "\"dms\"");
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_run_async_matches_sync() {
        let options = ConvertOptions {
            yield_interval: 2,
            ..ConvertOptions::default()
        };
        let pipeline = BatchPipeline::new(Operation::ToDecimal, options);
        let lines = ["", "40.7,-74.0", "bogus", "1, 2", "3, 4"];

        let mut last = 0.0;
        let async_results = pipeline.run_async(&lines, |p| last = p).await;
        assert_eq!(async_results, pipeline.run(&lines));
        assert_eq!(last, 100.0);
    }
}
