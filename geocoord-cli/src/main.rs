use anyhow::Result;
use clap::{Parser, Subcommand};
use geocoord::{Converter, ConverterBuilder, Operation, SplitStrategy, Target};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::batch::OutputFormat;

/// Coordinate detection and conversion CLI tool
#[derive(Parser)]
#[command(name = "geocoord")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fraction digits for decimal-degree output
    #[arg(long, env = "GEOCOORD_DECIMAL_PRECISION", global = true)]
    decimal_precision: Option<usize>,

    /// Fraction digits for the seconds field of DMS output
    #[arg(long, env = "GEOCOORD_DMS_PRECISION", global = true)]
    dms_precision: Option<usize>,

    /// How DMS pairs are split into latitude and longitude (midpoint or direction)
    #[arg(long, env = "GEOCOORD_SPLIT", global = true)]
    split: Option<SplitStrategy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the notation of a coordinate string
    Detect {
        /// Coordinate text, e.g. "N45°30'15\" W122°40'30\""
        input: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Convert a coordinate string to another notation
    Convert {
        /// Coordinate text (DMS or decimal degrees)
        input: String,

        /// Target notation: decimal, dms or utm
        #[arg(short, long, default_value = "decimal")]
        to: Target,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Great-circle distance and bearings between two coordinates
    Distance {
        /// Start coordinate
        from: String,

        /// End coordinate
        to: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Process one coordinate per line from a text file
    Batch {
        /// Input file, one coordinate per line
        input: PathBuf,

        /// Operation: validate, decimal, utm or dms
        #[arg(long, default_value = "decimal")]
        operation: Operation,

        /// Output file (defaults to <input>_converted.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
}

impl Cli {
    fn converter(&self) -> Converter {
        let mut builder = ConverterBuilder::new();
        if let Some(p) = self.decimal_precision {
            builder = builder.decimal_precision(p);
        }
        if let Some(p) = self.dms_precision {
            builder = builder.dms_precision(p);
        }
        if let Some(s) = self.split {
            builder = builder.split_strategy(s);
        }
        builder.build()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let converter = cli.converter();

    match cli.command {
        Commands::Detect { input, json } => commands::detect::run(&converter, &input, json),
        Commands::Convert { input, to, json } => {
            commands::convert::run(&converter, &input, to, json)
        }
        Commands::Distance { from, to, json } => {
            commands::distance::run(&converter, &from, &to, json)
        }
        Commands::Batch {
            input,
            operation,
            output,
            format,
        } => commands::batch::run(&converter, input, operation, output, format),
    }
}
