//! Seasonality command - week-of-year observation histogram for a taxon.

use anyhow::Result;
use clap::Args;
use notabilis_api::endpoint::{DateField, HistogramParams, ObservationHistogram};
use notabilis_api::ApiClient;
use tracing::info;

use crate::{Cli, OutputFormat, DEFAULT_PLACE_ID};

/// Arguments for the seasonality command.
#[derive(Args)]
pub struct SeasonalityArgs {
    /// Taxon id to chart.
    #[arg(long, short)]
    pub taxon: u64,

    /// Place id.
    #[arg(long, short, default_value_t = DEFAULT_PLACE_ID)]
    pub place: u64,
}

const BAR_WIDTH: u64 = 40;
const BAR_FULL: &str = "█";

/// Runs the seasonality command.
pub async fn run(args: &SeasonalityArgs, cli: &Cli) -> Result<()> {
    let client = ApiClient::new()?;
    info!(taxon = args.taxon, place = args.place, "Fetching histogram");

    let params = HistogramParams {
        taxon_id: args.taxon,
        place_id: args.place,
        preferred_place_id: Some(args.place),
        verifiable: Some(true),
        date_field: Some(DateField::Observed),
        ..HistogramParams::default()
    };
    let response = client.call::<ObservationHistogram>(&params).await?;
    let buckets = &response.results.week_of_year;

    if cli.format == OutputFormat::Json {
        let text = if cli.pretty {
            serde_json::to_string_pretty(buckets)?
        } else {
            serde_json::to_string(buckets)?
        };
        println!("{text}");
        return Ok(());
    }

    let mut weeks: Vec<(u32, u64)> = buckets
        .iter()
        .filter_map(|(week, count)| week.parse().ok().map(|w| (w, *count)))
        .collect();
    weeks.sort_unstable_by_key(|(week, _)| *week);

    let max = weeks.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if max == 0 {
        println!("No observations recorded.");
        return Ok(());
    }

    for (week, count) in weeks {
        let filled = usize::try_from(count * BAR_WIDTH / max).unwrap_or(0);
        println!("week {week:>2}  {:<40} {count}", BAR_FULL.repeat(filled));
    }

    Ok(())
}
