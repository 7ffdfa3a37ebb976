use anyhow::{Context, Result};
use clap::ValueEnum;
use geocoord::geojson::to_feature_collection;
use geocoord::{BatchItemOutcome, BatchItemReport, BatchSummary, Converter, Operation};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Batch output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
    Geojson,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Geojson => "geojson",
        }
    }
}

#[derive(Serialize)]
struct BatchResponse {
    results: Vec<BatchItemReport>,
    summary: BatchSummary,
}

pub fn run(
    converter: &Converter,
    input: PathBuf,
    operation: Operation,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    let lines: Vec<&str> = text.lines().collect();
    let total = lines.len() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let outcomes = converter
        .batch(operation)
        .run_with_progress(&lines, |percent| {
            pb.set_position((percent / 100.0 * total as f64).round() as u64);
        });
    pb.finish_with_message("done");

    let output_path = output.unwrap_or_else(|| default_output_path(&input, format));
    let output_file = File::create(&output_path).context("Failed to create output file")?;
    let mut writer = BufWriter::new(output_file);

    match format {
        OutputFormat::Csv => write_csv(&mut writer, &outcomes)?,
        OutputFormat::Json => write_json(&mut writer, &outcomes)?,
        OutputFormat::Geojson => write_geojson(&mut writer, &outcomes)?,
    }
    writer.flush()?;

    let summary = BatchSummary::from_outcomes(&outcomes);
    println!(
        "Processed {} lines: {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    );
    println!("Output written to: {}", output_path.display());
    Ok(())
}

/// `<stem>_converted.<ext>` next to the input file.
fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_converted.{}", stem, format.extension()))
}

fn write_csv<W: Write>(writer: W, outcomes: &[BatchItemOutcome]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "index",
        "input",
        "success",
        "format",
        "output",
        "latitude",
        "longitude",
        "error",
    ])?;

    for outcome in outcomes {
        let index = outcome.index.to_string();
        let record = match &outcome.outcome {
            Ok(record) => {
                let (lat, lon) = record
                    .coordinate
                    .map(|c| (c.latitude().to_string(), c.longitude().to_string()))
                    .unwrap_or_default();
                [
                    index,
                    outcome.input.clone(),
                    "true".to_string(),
                    record.format.name().to_string(),
                    record.output.clone(),
                    lat,
                    lon,
                    String::new(),
                ]
            }
            Err(e) => [
                index,
                outcome.input.clone(),
                "false".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                e.to_string(),
            ],
        };
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(writer: W, outcomes: &[BatchItemOutcome]) -> Result<()> {
    let response = BatchResponse {
        results: outcomes.iter().map(BatchItemOutcome::report).collect(),
        summary: BatchSummary::from_outcomes(outcomes),
    };
    serde_json::to_writer_pretty(writer, &response)?;
    Ok(())
}

fn write_geojson<W: Write>(writer: W, outcomes: &[BatchItemOutcome]) -> Result<()> {
    let geojson = geojson::GeoJson::FeatureCollection(to_feature_collection(outcomes));
    serde_json::to_writer_pretty(writer, &geojson)?;
    Ok(())
}
