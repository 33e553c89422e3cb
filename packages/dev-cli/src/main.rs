//! Developer CLI: run the venue pipeline for a query file and print the
//! ranked list.
//!
//! Credentials come from the environment (`GOOGLE_PLACES_API_KEY`,
//! `YELP_API_KEY`); a `.env` file is honored. With no query file, a sample
//! Greenville, NC query runs.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use venue_pipeline::{
    Candidate, GooglePlacesGeocoder, GooglePlacesProvider, Pipeline, PipelineConfig, QuerySpec,
    YelpProvider,
};

#[derive(Parser)]
#[command(name = "venues", about = "Run the venue discovery pipeline")]
struct Args {
    /// Path to a QuerySpec JSON file (defaults to a sample query)
    query: Option<PathBuf>,

    /// Print full records as pretty JSON instead of the summary table
    #[arg(long)]
    json: bool,
}

fn sample_query() -> QuerySpec {
    QuerySpec::new()
        .with_cities(["Greenville, NC"])
        .with_zips(["27834"])
        .with_radius_miles(6.0)
        .with_state("NC")
        .with_attendees(30)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn print_table(ranked: &[Candidate]) {
    println!(
        "{:>4}  {:<40} {:<20} {:>5} {:>6}  {}",
        "Rank", "Venue", "Category", "Mi", "Score", "Why this rank"
    );
    for candidate in ranked {
        println!(
            "{:>4}  {:<40} {:<20} {:>5} {:>6.4}  {}",
            candidate.rank.unwrap_or_default(),
            truncate(&candidate.name, 40),
            truncate(candidate.category.as_deref().unwrap_or("-"), 20),
            candidate
                .distance_miles
                .map(|d| format!("{d:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            candidate.score_total,
            candidate.reason_text.as_deref().unwrap_or(""),
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let query = match &args.query {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&body).context("query file is not a valid QuerySpec")?
        }
        None => sample_query(),
    };

    let config = PipelineConfig::from_env();
    if config.google_api_key.is_none() && config.yelp_api_key.is_none() {
        eprintln!("warning: no provider API keys set; discovery will return nothing");
    }

    let geocoder = Arc::new(GooglePlacesGeocoder::new(
        config.google_api_key.clone(),
        config.request_timeout,
    ));

    let pipeline = Pipeline::new()
        .with_provider(GooglePlacesProvider::new(&config, geocoder.clone()))
        .with_provider(YelpProvider::new(&config, geocoder));

    let ranked = pipeline.run(&query).await;

    if ranked.is_empty() {
        println!("no venues found");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print_table(&ranked);
    }

    Ok(())
}
