// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Notabilis CLI - unexpected-species reports from iNaturalist data.
//!
//! # Examples
//!
//! ```bash
//! # Scan backward from today for unexpected species (default place)
//! notabilis
//!
//! # Bounded scan over another place
//! notabilis rarities --place 962 --days 14
//!
//! # Retry transient failures during a long scan
//! notabilis rarities --retries 3
//!
//! # Observer leaderboard for the last month
//! notabilis observers --order-by species
//!
//! # Week-of-year seasonality for a taxon
//! notabilis seasonality --taxon 14886
//!
//! # Find a place id
//! notabilis places "prospect park"
//!
//! # JSON output
//! notabilis --format json observers
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{observers, places, rarities, seasonality};

/// Place id used when none is given: New York City on the upstream site.
pub const DEFAULT_PLACE_ID: u64 = 674;

// ============================================================================
// CLI Definition
// ============================================================================

/// Notabilis CLI - unexpected-species reports.
#[derive(Parser)]
#[command(name = "notabilis")]
#[command(about = "Finds locally unexpected species in iNaturalist observation data")]
#[command(long_about = r#"
Notabilis scans iNaturalist observations backward from today, one day at
a time, and reports species with no covering record in the preceding
year at the same place.

Examples:
  notabilis                          # Unbounded backward scan (Ctrl-C stops)
  notabilis rarities --days 14       # Bounded scan
  notabilis observers                # Observer leaderboard, last month
  notabilis seasonality --taxon 14886
  notabilis places "prospect park"   # Place search
  notabilis --format json observers  # JSON output
"#)]
#[command(version)]
#[command(author = "Notabilis Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'rarities' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Scan backward from today for unexpected species (default).
    #[command(visible_alias = "r")]
    Rarities(rarities::RaritiesArgs),

    /// Rank the most active observers for a place.
    #[command(visible_alias = "o")]
    Observers(observers::ObserversArgs),

    /// Show a taxon's week-of-year observation histogram.
    #[command(visible_alias = "s")]
    Seasonality(seasonality::SeasonalityArgs),

    /// Look up a place by id or search by name.
    #[command(visible_alias = "p")]
    Places(places::PlacesArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("notabilis=debug,info")
    } else {
        EnvFilter::new("notabilis=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Rarities(args)) => rarities::run(args, &cli).await,
        Some(Commands::Observers(args)) => observers::run(args, &cli).await,
        Some(Commands::Seasonality(args)) => seasonality::run(args, &cli).await,
        Some(Commands::Places(args)) => places::run(args, &cli).await,
        None => {
            // Default to the rarities scan
            rarities::run(&rarities::RaritiesArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
