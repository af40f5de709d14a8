//! Pokédex CLI - browse the PokéAPI from the terminal.
//!
//! Every subcommand goes through the `Pokedex` session facade and prints its
//! result as pretty JSON on stdout. Failures are logged and turn into a
//! non-zero exit status.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use pokedex_core::{Identifier, PokeApiClient, PokeApiConfig, Pokedex};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse Pokémon data from the PokéAPI")]
struct Args {
    /// Base URL of the REST API
    #[arg(long, env = "POKEDEX_API_BASE", default_value = PokeApiConfig::API_BASE)]
    base_url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of Pokémon
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show detail, species, evolution chain and locations
    Show { identifier: String },
    /// Search by id, name, or name substring
    Search {
        query: String,
        /// Maximum number of results
        #[arg(long)]
        max: Option<usize>,
    },
    /// Show the flattened evolution chain of a Pokémon
    Evolution { identifier: String },
    /// Fetch full details for every Pokémon on a page
    Batch {
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
        /// Number of concurrent requests
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let client = PokeApiClient::builder()
        .base_url(&args.base_url)
        .request_timeout(Duration::from_secs(args.timeout_secs))
        .build()?;
    debug!("Using API at {}", client.base_url());
    let pokedex = Pokedex::new(Arc::new(client));

    match args.command {
        Command::List { page, page_size } => {
            let response = pokedex.list(Some(page), page_size).await;
            finish(&pokedex, &response).await
        }
        Command::Show { identifier } => {
            let complete = pokedex.complete(Identifier::parse(&identifier)).await;
            finish(&pokedex, &complete).await
        }
        Command::Search { query, max } => {
            let matches = pokedex.search(&query, max).await;
            info!("{} result(s) for '{}'", matches.len(), query.trim());
            finish(&pokedex, &matches).await
        }
        Command::Evolution { identifier } => {
            let Some(species) = pokedex.species(Identifier::parse(&identifier)).await else {
                return finish(&pokedex, &Vec::<()>::new()).await;
            };
            let Some(chain_id) = species.evolution_chain_id() else {
                bail!("{} has no evolution chain", species.name);
            };
            let stages = pokedex
                .evolution_chain(chain_id)
                .await
                .map(|chain| chain.stages())
                .unwrap_or_default();
            finish(&pokedex, &stages).await
        }
        Command::Batch {
            page,
            page_size,
            concurrency,
        } => {
            let listing = pokedex.list(Some(page), page_size).await;
            if let Some(e) = pokedex.error().await {
                bail!(e);
            }
            let details = pokedex.fetch_details(&listing.results, concurrency).await;
            info!(
                "Fetched {} of {} Pokémon on page {}",
                details.len(),
                listing.results.len(),
                page
            );
            finish(&pokedex, &details).await
        }
    }
}

/// Print `value` as JSON, or fail with the session's recorded error.
async fn finish<T: Serialize>(pokedex: &Pokedex, value: &T) -> Result<()> {
    if let Some(e) = pokedex.error().await {
        bail!(e);
    }
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
