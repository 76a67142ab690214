//! Command-line driver for rec-hit combination.
//!
//! Reads a JSON event file, combines every event and writes the result.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use clap::{Parser, Subcommand};

use hitcomb_algorithms::{combine_events, CombinerConfig, DuplicatePolicy, HitCombiner};
use hitcomb_io::{CombinationWriter, EventFileReader, EventRecord};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    HitcombIo(#[from] hitcomb_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] hitcomb_core::Error),
}

/// Output format of the `combine` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Picks the format from the output extension, falling back to CSV.
    fn from_path(path: &std::path::Path) -> (Self, bool) {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("csv") => (Self::Csv, true),
            Some("json") => (Self::Json, true),
            _ => (Self::Csv, false),
        }
    }
}

/// Tracker rec-hit combiner for fast simulation.
#[derive(Parser)]
#[command(name = "hitcomb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine the rec hits of every event in an event file
    Combine {
        /// Input event file (JSON)
        input: PathBuf,

        /// Output file path (.csv or .json)
        #[arg(short, long)]
        output: PathBuf,

        /// Minimum number of rec hits for a combination to be kept
        #[arg(long, default_value = "1")]
        min_hits: usize,

        /// Fake match radius (cm)
        #[arg(long, default_value_t = hitcomb_algorithms::DEFAULT_MATCH_RADIUS)]
        match_radius: f64,

        /// Attach each fake rec hit at most once per combination
        #[arg(long)]
        skip_duplicate_fakes: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about an event file
    Info {
        /// Input event file (JSON)
        input: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Combine {
            input,
            output,
            min_hits,
            match_radius,
            skip_duplicate_fakes,
            verbose,
        } => {
            init_logging(verbose);

            let duplicate_fakes = if skip_duplicate_fakes {
                DuplicatePolicy::Skip
            } else {
                DuplicatePolicy::Keep
            };
            let config = CombinerConfig::new()
                .with_min_hits(min_hits)
                .with_match_radius(match_radius)
                .with_duplicate_fakes(duplicate_fakes);
            let combiner = HitCombiner::try_new(config)?;

            info!("Reading: {}", input.display());
            info!("Min hits: {}", min_hits);
            info!("Match radius: {} cm", match_radius);

            let start = Instant::now();
            let file = EventFileReader::open(&input)?.read()?;
            let combined = combine_events(
                &combiner,
                file.events.iter().map(EventRecord::hits),
                &file.geometry,
            )?;

            let (format, known) = OutputFormat::from_path(&output);
            if !known {
                warn!(
                    "Unknown extension on '{}', defaulting to CSV",
                    output.display()
                );
            }

            let mut writer = CombinationWriter::create(&output)?;
            match format {
                OutputFormat::Csv => {
                    for (index, (combinations, event)) in
                        combined.events.iter().zip(&file.events).enumerate()
                    {
                        writer.write_event_csv(index, combinations, &event.rec_hits, index == 0)?;
                    }
                }
                OutputFormat::Json => writer.write_json(&combined.events)?,
            }
            writer.flush()?;
            info!("Wrote output to: {}", output.display());

            let stats = combined.statistics;
            let elapsed = start.elapsed();
            println!(
                "Processed {} events in {:.2}s",
                stats.events_processed,
                elapsed.as_secs_f64()
            );
            println!("Sim hits: {}", stats.sim_hits_processed);
            println!("Track groups: {}", stats.track_groups);
            println!(
                "Combinations: {} kept, {} rejected",
                stats.combinations_kept, stats.combinations_rejected
            );
            println!(
                "Rec hits: {} true, {} fake ({:.1}% fake)",
                stats.true_hits,
                stats.fake_hits,
                stats.fake_fraction() * 100.0
            );
            if stats.duplicate_fakes_skipped > 0 {
                println!("Duplicate fakes skipped: {}", stats.duplicate_fakes_skipped);
            }
        }

        Commands::Info { input } => {
            init_logging(false);

            let reader = EventFileReader::open(&input)?;
            let file_size = reader.file_size();
            let file = reader.read()?;
            let summary = file.summary();

            println!("File: {}", input.display());
            println!(
                "Size: {} bytes ({:.2} MB)",
                file_size,
                file_size as f64 / 1_000_000.0
            );
            println!("Events: {}", summary.events);
            println!("Detector elements: {}", summary.detectors);
            println!("Sim hits: {}", summary.sim_hits);
            println!("Rec hits: {}", summary.rec_hits);
            println!("Sim hits without rec hit: {}", summary.unmatched_sim_hits);
            println!("Readout errors: {}", summary.readout_errors);

            for error in file.readout_errors() {
                println!(
                    "  FED {:>5} type {:>3} word {:#010x}/{:#018x}: {}",
                    error.fed_id(),
                    error.error_type(),
                    error.word32(),
                    error.word64(),
                    error.message()
                );
            }
        }
    }

    Ok(())
}
