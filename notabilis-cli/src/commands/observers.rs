//! Observers command - ranked observer leaderboard for a place.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use notabilis_api::endpoint::{ObserverOrder, Observers, ObserversParams};
use notabilis_api::ApiClient;
use notabilis_core::dates::{local_today, previous_month};
use tracing::info;

use crate::{Cli, OutputFormat, DEFAULT_PLACE_ID};

/// Arguments for the observers command.
#[derive(Args)]
pub struct ObserversArgs {
    /// Place id to rank observers for.
    #[arg(long, short, default_value_t = DEFAULT_PLACE_ID)]
    pub place: u64,

    /// Start of the ranking window (defaults to one month ago).
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Ranking order.
    #[arg(long, value_enum, default_value = "observations")]
    pub order_by: OrderChoice,

    /// Number of observers to list.
    #[arg(long, default_value_t = 10)]
    pub top: u32,
}

/// Leaderboard orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderChoice {
    /// Rank by observation count.
    Observations,
    /// Rank by distinct species count.
    Species,
}

impl OrderChoice {
    fn to_order(self) -> ObserverOrder {
        match self {
            Self::Observations => ObserverOrder::ObservationCount,
            Self::Species => ObserverOrder::SpeciesCount,
        }
    }
}

/// Runs the observers command.
pub async fn run(args: &ObserversArgs, cli: &Cli) -> Result<()> {
    let client = ApiClient::new()?;
    let since = args.since.unwrap_or_else(|| previous_month(local_today()));
    info!(place = args.place, since = %since, "Fetching observer leaderboard");

    let params = ObserversParams {
        place_id: args.place,
        d1: Some(since),
        order_by: Some(args.order_by.to_order()),
        per_page: Some(args.top),
        ..ObserversParams::default()
    };
    let response = client.call::<Observers>(&params).await?;

    if cli.format == OutputFormat::Json {
        let text = if cli.pretty {
            serde_json::to_string_pretty(&response.results)?
        } else {
            serde_json::to_string(&response.results)?
        };
        println!("{text}");
        return Ok(());
    }

    if response.results.is_empty() {
        println!("No observers found.");
        return Ok(());
    }

    println!("Top observers since {since}:");
    for (rank, row) in response.results.iter().enumerate() {
        println!(
            "{:>3}. {:<24} {:>6} observations {:>5} species",
            rank + 1,
            row.user.login,
            row.observation_count,
            row.species_count
        );
    }

    Ok(())
}
