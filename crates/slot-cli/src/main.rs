//! `slots` CLI — recommend appointment slots from a clinic dataset.
//!
//! ## Usage
//!
//! ```sh
//! # Recommend 30-minute slots for physician p001 at clinic c001
//! slots recommend -i clinic.json --clinic c001 --provider p001 --date 2025-07-10 --duration 30
//!
//! # Read the dataset from stdin and write the result to a file
//! cat clinic.json | slots recommend --clinic c001 --provider p001 \
//!     --date 2025-07-10 --duration 30 -o result.json
//!
//! # Use another region's billing rule
//! SLOTS_REGION=Quebec slots recommend -i clinic.json ...
//!
//! # Show every ranked slot with its score terms
//! slots explain -i clinic.json --clinic c001 --provider p001 --date 2025-07-10 --duration 30
//! ```
//!
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`).

mod dataset;

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slot_engine::{ProviderSchedule, SlotRequest};
use tracing_subscriber::EnvFilter;

use crate::dataset::Dataset;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Recommend bookable appointment slots for a clinic provider"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Region whose billing rule (gap and buffers) applies
    #[arg(long, global = true, env = "SLOTS_REGION", default_value = "Ontario")]
    region: String,
}

#[derive(Args)]
struct QueryArgs {
    /// Clinic dataset JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Clinic identifier
    #[arg(long)]
    clinic: String,
    /// Physician business code (e.g. "p001")
    #[arg(long)]
    provider: String,
    /// Requested date, YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Appointment length in minutes
    #[arg(long, allow_negative_numbers = true)]
    duration: i64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the recommended slots as JSON
    Recommend {
        #[command(flatten)]
        query: QueryArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print every ranked slot with its score breakdown
    Explain {
        #[command(flatten)]
        query: QueryArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { query, output } => {
            let (request, schedule, _) = prepare(&query, &cli.region)?;
            let result = slot_engine::recommend_slots(&request, &schedule)
                .context("Failed to recommend slots")?;
            let json = serde_json::to_string_pretty(&result)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Explain { query } => {
            let (request, schedule, header) = prepare(&query, &cli.region)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            finish_stdout(explain(&mut out, &header, &request, &schedule))?;
        }
    }

    Ok(())
}

/// Write the ranked slots and their score terms as plain text.
fn explain(
    out: &mut impl Write,
    header: &str,
    request: &SlotRequest,
    schedule: &ProviderSchedule,
) -> io::Result<()> {
    writeln!(out, "{}", header)?;
    let window = match slot_engine::resolve_window(request.date, &schedule.working_hours) {
        Ok(window) => window,
        Err(unavailable) => {
            return writeln!(
                out,
                "{} ({}): {}",
                request.date,
                slot_engine::weekday_label(request.date),
                unavailable
            );
        }
    };

    writeln!(
        out,
        "Window: {} - {}  gap rule: {:?}",
        window.start,
        window.end,
        schedule.gap_rule()
    )?;
    let ranked = slot_engine::rank_candidates(&window, request.duration_minutes, schedule);
    if ranked.is_empty() {
        writeln!(out, "No bookable slots.")?;
    }
    for (rank, c) in ranked.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {}  score {:>7.1}  (adjacency {:.0}, edge {:.0}, squeeze {:.0}, spacing {:.1})",
            rank + 1,
            slot_engine::interval::format_slot(c.start),
            c.score,
            c.breakdown.adjacency,
            c.breakdown.edge_of_day,
            c.breakdown.squeeze,
            c.breakdown.spacing,
        )?;
    }
    out.flush()
}

/// A reader that closed the pipe early (`slots explain ... | head`) is a
/// normal way to stop, not a failure.
fn finish_stdout(result: io::Result<()>) -> Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("Failed to write to stdout"),
    }
}

/// Load the dataset, validate the request and collect the provider's schedule.
///
/// Also returns a one-line description of the provider for human output.
fn prepare(query: &QueryArgs, region: &str) -> Result<(SlotRequest, ProviderSchedule, String)> {
    let json = read_input(query.input.as_deref())?;
    let dataset = Dataset::from_json(&json)?;

    let request = SlotRequest::new(&query.provider, &query.clinic, &query.date, query.duration)
        .context("Invalid slot request")?;

    let physician = dataset
        .find_physician(&query.clinic, &query.provider)
        .with_context(|| {
            format!(
                "Provider not found: '{}' in clinic '{}'",
                query.provider, query.clinic
            )
        })?;

    let header = match &physician.specialty {
        Some(specialty) => format!("{} ({}, {})", physician.name, physician.code, specialty),
        None => format!("{} ({})", physician.name, physician.code),
    };
    let schedule = dataset.schedule_for(physician, &query.clinic, request.date, region);

    Ok((request, schedule, header))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            finish_stdout(writeln!(out, "{}", content).and_then(|()| out.flush()))?;
        }
    }
    Ok(())
}
