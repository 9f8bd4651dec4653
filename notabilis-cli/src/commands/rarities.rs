//! Rarities command - the backward unexpected-species scan.

use anyhow::Result;
use clap::Args;
use notabilis_api::{ApiClient, RetryPolicy};
use notabilis_detect::{DateCursor, NotableSink, RarityDetector};
use tracing::info;

use crate::output::{JsonLines, ReportRenderer};
use crate::{Cli, OutputFormat, DEFAULT_PLACE_ID};

/// Arguments for the rarities command.
#[derive(Args)]
pub struct RaritiesArgs {
    /// Place id to scan.
    #[arg(long, short, default_value_t = DEFAULT_PLACE_ID)]
    pub place: u64,

    /// Number of days to scan before stopping (unbounded when omitted).
    #[arg(long, short)]
    pub days: Option<u64>,

    /// Retry attempts for transient API failures (default: fail fast).
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

impl Default for RaritiesArgs {
    fn default() -> Self {
        Self {
            place: DEFAULT_PLACE_ID,
            days: None,
            retries: 0,
        }
    }
}

/// Runs the rarities command.
pub async fn run(args: &RaritiesArgs, cli: &Cli) -> Result<()> {
    let mut client = ApiClient::new()?;
    if args.retries > 0 {
        client = client.with_retry_policy(RetryPolicy::attempts(args.retries + 1));
    }
    let detector = RarityDetector::new(client, args.place);

    let mut cursor = DateCursor::from_today();
    if let Some(days) = args.days {
        cursor = cursor.limit_days(days);
    }

    // Ctrl-C ends the scan between days instead of killing the process.
    let stop = cursor.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Stop requested; finishing the current day");
            stop.stop();
        }
    });

    let mut sink: Box<dyn NotableSink> = match cli.format {
        OutputFormat::Text => Box::new(ReportRenderer::new(!cli.no_color)),
        OutputFormat::Json => Box::new(JsonLines::new(cli.pretty)),
    };

    let summary = detector.run(cursor, sink.as_mut()).await?;

    if !cli.quiet && cli.format == OutputFormat::Text {
        println!(
            "Scanned {} days, {} notable observations.",
            summary.days_scanned, summary.notables_emitted
        );
    }

    Ok(())
}
